pub mod instance;

pub use instance::{MeshInstance, RenderBuffer};

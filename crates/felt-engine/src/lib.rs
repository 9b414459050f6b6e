pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod table;

#[cfg(test)]
mod testing;

// Re-export key types at crate root for convenience
pub use api::config::{OptionsPatch, TableConfig, CUE_FORCE_RANGE, DROP_COUNT_RANGE};
pub use api::error::TableError;
pub use api::session::{LoopState, TableSession};
pub use api::types::{BodyHandle, NodeId, Transform};
pub use assets::textures::{TableTextures, TextureCatalog, TextureEntry, TextureId};
pub use components::light::AmbientLight;
pub use components::mesh::{Geometry, MeshComponent, Shading, VisualMaterial};
pub use components::node::RenderNode;
pub use core::backend::{PhysicsBackend, SceneGraph};
pub use core::body::{BodyDesc, BodyType, ShapeDesc, SleepParams};
pub use core::materials::{ContactMaterial, MaterialId, MaterialRegistry, PhysicsMaterial};
pub use core::paired::PairedObject;
pub use core::rng::{RandomSource, Rng};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use input::triggers::Trigger;
pub use renderer::instance::{MeshInstance, RenderBuffer};
pub use table::cue::CueStrike;
pub use table::rack::{rack_layout, Placement, RACK_SIZE};

#[cfg(feature = "physics")]
pub use api::session::RapierTable;
#[cfg(feature = "physics")]
pub use core::physics::{PhysicsBody, PhysicsWorld};

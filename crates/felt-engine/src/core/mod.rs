pub mod backend;
pub mod body;
pub mod materials;
pub mod paired;
#[cfg(feature = "physics")]
pub mod physics;
pub mod rng;
pub mod scene;
pub mod time;

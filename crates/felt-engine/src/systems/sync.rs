use crate::api::error::TableError;
use crate::core::backend::{PhysicsBackend, SceneGraph};
use crate::core::paired::PairedObject;

/// Copy each object's physical transform onto its visual node, in order.
/// Stops at the first object whose halves are missing. Returns the number
/// of objects synced.
pub fn sync_all<'a, W, S>(
    world: &W,
    scene: &mut S,
    objects: impl IntoIterator<Item = &'a PairedObject>,
) -> Result<usize, TableError>
where
    W: PhysicsBackend + ?Sized,
    S: SceneGraph + ?Sized,
{
    let mut synced = 0;
    for object in objects {
        object.sync(world, scene)?;
        synced += 1;
    }
    Ok(synced)
}

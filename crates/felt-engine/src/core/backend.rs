//! Capability boundaries of the two external engines.
//!
//! The table core never talks to the solver or the renderer directly; it
//! talks to these traits. `PhysicsWorld` (rapier3d) and `Scene` are the
//! production implementations; tests swap in a fake world.

use glam::Vec3;

use crate::api::types::{BodyHandle, NodeId, Transform};
use crate::components::light::AmbientLight;
use crate::components::node::RenderNode;
use crate::core::body::BodyDesc;
use crate::core::materials::ContactMaterial;

/// What the core needs from a rigid-body solver.
pub trait PhysicsBackend {
    /// Register a body. Registration is append-only and never fails.
    fn add_body(&mut self, desc: &BodyDesc) -> BodyHandle;

    /// Register contact properties for a material pair.
    fn add_contact_material(&mut self, contact: ContactMaterial);

    /// Advance by whole `fixed_dt` steps covering `elapsed` seconds plus any
    /// leftover from earlier calls, running at most `max_substeps` steps.
    /// Returns the number of steps run.
    fn step(&mut self, fixed_dt: f32, elapsed: f32, max_substeps: u32) -> u32;

    /// Apply a force at a world-space point for the next step only.
    fn apply_force(&mut self, body: BodyHandle, force: Vec3, world_point: Vec3);

    fn wake_up(&mut self, body: BodyHandle);

    fn is_sleeping(&self, body: BodyHandle) -> bool;

    /// `None` when the handle was never registered with this world.
    fn transform(&self, body: BodyHandle) -> Option<Transform>;

    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec3>;

    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3>;

    fn body_count(&self) -> usize;

    fn contact_material_count(&self) -> usize;
}

/// What the core needs from a scene graph.
pub trait SceneGraph {
    /// Insert a node and return its id. Append-only.
    fn add(&mut self, node: RenderNode) -> NodeId;

    fn get(&self, id: NodeId) -> Option<&RenderNode>;

    fn get_mut(&mut self, id: NodeId) -> Option<&mut RenderNode>;

    fn add_light(&mut self, light: AmbientLight);

    /// Number of nodes (lights are not nodes).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move a node. Returns `false` when the node does not exist.
    fn set_transform(&mut self, id: NodeId, transform: Transform) -> bool {
        match self.get_mut(id) {
            Some(node) => {
                node.set_transform(transform);
                true
            }
            None => false,
        }
    }
}

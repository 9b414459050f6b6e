use glam::{Quat, Vec3};

use crate::api::types::{NodeId, Transform};
use crate::components::mesh::MeshComponent;

/// Visual half of a paired object: a mesh placed in the scene graph.
#[derive(Debug, Clone)]
pub struct RenderNode {
    /// Assigned by the scene graph on insertion.
    pub id: NodeId,
    /// Free-form label ("floor", "rail", "ball-7", ...).
    pub tag: String,
    pub position: Vec3,
    pub orientation: Quat,
    pub mesh: MeshComponent,
}

impl RenderNode {
    /// Create a node at the origin. The id is a placeholder until the node
    /// is added to a scene graph.
    pub fn new(mesh: MeshComponent) -> Self {
        Self {
            id: NodeId(u32::MAX),
            tag: String::new(),
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            mesh,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.set_transform(transform);
        self
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            orientation: self.orientation,
        }
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.position = transform.position;
        self.orientation = transform.orientation;
    }
}

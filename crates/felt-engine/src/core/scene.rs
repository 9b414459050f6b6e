use crate::api::types::NodeId;
use crate::components::light::AmbientLight;
use crate::components::node::RenderNode;
use crate::core::backend::SceneGraph;

/// Scene graph node storage using a flat Vec.
/// Nodes are never removed, so a node's id is its index.
pub struct Scene {
    nodes: Vec<RenderNode>,
    lights: Vec<AmbientLight>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
            lights: Vec::new(),
        }
    }

    /// Iterate over all nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RenderNode> {
        self.nodes.iter()
    }

    pub fn lights(&self) -> &[AmbientLight] {
        &self.lights
    }
}

impl SceneGraph for Scene {
    fn add(&mut self, mut node: RenderNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        node.id = id;
        self.nodes.push(node);
        id
    }

    fn get(&self, id: NodeId) -> Option<&RenderNode> {
        self.nodes.get(id.0 as usize)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut RenderNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    fn add_light(&mut self, light: AmbientLight) {
        self.lights.push(light);
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

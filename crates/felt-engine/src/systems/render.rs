use crate::components::node::RenderNode;
use crate::renderer::instance::{MeshInstance, RenderBuffer};

/// Pack one node into its render record.
pub fn mesh_instance(node: &RenderNode) -> MeshInstance {
    let mesh = &node.mesh;
    let flag = |on: bool| if on { 1.0 } else { 0.0 };
    MeshInstance {
        position: node.position.to_array(),
        orientation: node.orientation.to_array(),
        geometry_kind: mesh.geometry.kind() as f32,
        dimensions: mesh.geometry.dimensions(),
        material_kind: mesh.material.shading.kind() as f32,
        texture: mesh
            .material
            .shading
            .texture()
            .map_or(-1.0, |t| t.0 as f32),
        wireframe: flag(mesh.material.wireframe),
        double_sided: flag(mesh.material.double_sided),
        _pad: 0.0,
    }
}

/// Rebuild the render buffer from a set of nodes, one record per node.
pub fn build_render_buffer<'a>(nodes: impl Iterator<Item = &'a RenderNode>, buffer: &mut RenderBuffer) {
    buffer.clear();
    for node in nodes {
        buffer.push(mesh_instance(node));
    }
}

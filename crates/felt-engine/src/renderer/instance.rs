use bytemuck::{Pod, Zeroable};

/// Per-node render record read by the JS renderer through a raw pointer.
/// 16 floats = 64 bytes stride.
///
/// Kinds and flags are stored as floats so the whole buffer is one
/// `Float32Array` on the JS side.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    /// World-space position.
    pub position: [f32; 3],
    /// Orientation quaternion, `x, y, z, w`.
    pub orientation: [f32; 4],
    /// 0 plane, 1 box, 2 sphere.
    pub geometry_kind: f32,
    /// Full extents: plane `w, h, -`; box `w, h, d`; sphere `r, -, -`.
    pub dimensions: [f32; 3],
    /// 0 basic, 1 diffuse, 2 standard.
    pub material_kind: f32,
    /// Catalog id of the texture, or -1.
    pub texture: f32,
    pub wireframe: f32,
    pub double_sided: f32,
    pub _pad: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// All mesh instances of one frame, in scene order.
pub struct RenderBuffer {
    pub instances: Vec<MeshInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// The instances as one flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for reads from JS memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

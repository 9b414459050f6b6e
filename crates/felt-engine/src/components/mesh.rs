use crate::assets::textures::TextureId;

/// Geometry primitive of a render node. Dimensions are full extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Flat rectangle in the node's local XY plane.
    Plane { width: f32, height: f32 },
    Box { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32 },
}

impl Geometry {
    /// Wire-format kind tag.
    pub fn kind(&self) -> u32 {
        match self {
            Geometry::Plane { .. } => 0,
            Geometry::Box { .. } => 1,
            Geometry::Sphere { .. } => 2,
        }
    }

    /// Dimensions padded to three floats.
    pub fn dimensions(&self) -> [f32; 3] {
        match *self {
            Geometry::Plane { width, height } => [width, height, 0.0],
            Geometry::Box { width, height, depth } => [width, height, depth],
            Geometry::Sphere { radius } => [radius, 0.0, 0.0],
        }
    }
}

/// Shading model of a visual material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Flat, unlit, untextured.
    Basic,
    /// Lit, with a single diffuse texture.
    Diffuse { texture: TextureId },
    /// Lit, with a full map set (ao, diffuse, normal, roughness).
    Standard { textures: TextureId },
}

impl Shading {
    pub fn kind(&self) -> u32 {
        match self {
            Shading::Basic => 0,
            Shading::Diffuse { .. } => 1,
            Shading::Standard { .. } => 2,
        }
    }

    pub fn texture(&self) -> Option<TextureId> {
        match *self {
            Shading::Basic => None,
            Shading::Diffuse { texture } => Some(texture),
            Shading::Standard { textures } => Some(textures),
        }
    }
}

/// Render-side material of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualMaterial {
    pub shading: Shading,
    pub wireframe: bool,
    pub double_sided: bool,
}

impl VisualMaterial {
    pub fn basic() -> Self {
        Self::new(Shading::Basic)
    }

    pub fn new(shading: Shading) -> Self {
        Self {
            shading,
            wireframe: false,
            double_sided: false,
        }
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn with_double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }
}

/// Geometry + material: what the renderer draws for a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub geometry: Geometry,
    pub material: VisualMaterial,
}

impl MeshComponent {
    pub fn new(geometry: Geometry, material: VisualMaterial) -> Self {
        Self { geometry, material }
    }
}

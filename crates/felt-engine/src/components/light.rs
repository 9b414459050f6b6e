/// Uniform light that reaches every surface equally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    /// RGB color (0.0-1.0 each).
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

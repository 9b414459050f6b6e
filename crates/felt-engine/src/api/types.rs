use glam::{Quat, Vec3};

/// Identifier of a node in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Identifier of a rigid body in the physics world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u32);

/// Position + orientation of a rigid entity.
/// The unit exchanged across both the render and the physics boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
        }
    }

    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    /// Component-wise comparison with a tolerance. Quaternions `q` and `-q`
    /// describe the same rotation and compare equal.
    pub fn approx_eq(&self, other: &Transform, eps: f32) -> bool {
        let same_rotation = self.orientation.abs_diff_eq(other.orientation, eps)
            || self.orientation.abs_diff_eq(-other.orientation, eps);
        self.position.abs_diff_eq(other.position, eps) && same_rotation
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negated_quaternion_is_same_rotation() {
        let q = Quat::from_axis_angle(Vec3::X, 0.7);
        let a = Transform::from_position(Vec3::ONE).with_orientation(q);
        let b = Transform::from_position(Vec3::ONE).with_orientation(-q);
        assert!(a.approx_eq(&b, 1e-6));
    }

    #[test]
    fn position_mismatch_detected() {
        let a = Transform::from_position(Vec3::ZERO);
        let b = Transform::from_position(Vec3::new(0.0, 0.01, 0.0));
        assert!(!a.approx_eq(&b, 1e-4));
    }
}

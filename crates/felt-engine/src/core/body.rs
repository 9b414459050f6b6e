use glam::{Quat, Vec3};

use crate::api::types::Transform;
use crate::core::materials::MaterialId;

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    /// Infinite mass, never moves.
    Fixed,
}

/// Collision shape of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeDesc {
    /// Infinite plane through the body origin with local +Z as its normal.
    Plane,
    Cuboid { half_extents: Vec3 },
    Ball { radius: f32 },
}

/// Sleep thresholds. A body falls asleep once its speed stays under
/// `speed_limit` for `time_limit` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepParams {
    pub speed_limit: f32,
    pub time_limit: f32,
}

/// Builder for describing a rigid body before it is added to a world.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    /// Zero for fixed bodies.
    pub mass: f32,
    pub shape: ShapeDesc,
    pub transform: Transform,
    pub angular_velocity: Vec3,
    pub material: Option<MaterialId>,
    /// `None` keeps the body awake forever.
    pub sleep: Option<SleepParams>,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl BodyDesc {
    /// Describe a body the way the physics boundary does: a mass of zero
    /// means static.
    pub fn new(shape: ShapeDesc, mass: f32) -> Self {
        if mass == 0.0 {
            Self::fixed(shape)
        } else {
            Self::dynamic(shape, mass)
        }
    }

    /// Create a dynamic body description with the given shape and mass.
    pub fn dynamic(shape: ShapeDesc, mass: f32) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            mass,
            shape,
            transform: Transform::IDENTITY,
            angular_velocity: Vec3::ZERO,
            material: None,
            sleep: None,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    /// Create a fixed (static) body description with the given shape.
    pub fn fixed(shape: ShapeDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            mass: 0.0,
            ..Self::dynamic(shape, 0.0)
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.transform.orientation = orientation;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: Vec3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_sleep(mut self, sleep: SleepParams) -> Self {
        self.sleep = Some(sleep);
        self
    }

    /// Per-tick linear drag. Keeps balls from sliding across the felt forever.
    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    pub fn with_angular_damping(mut self, damping: f32) -> Self {
        self.angular_damping = damping;
        self
    }

    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_mass_means_static() {
        let desc = BodyDesc::new(ShapeDesc::Plane, 0.0);
        assert!(desc.is_static());
        let desc = BodyDesc::new(ShapeDesc::Ball { radius: 0.5 }, 0.16);
        assert_eq!(desc.body_type, BodyType::Dynamic);
        assert_eq!(desc.mass, 0.16);
    }

    #[test]
    fn builder_pattern() {
        let desc = BodyDesc::dynamic(ShapeDesc::Ball { radius: 1.0 }, 2.0)
            .with_position(Vec3::new(1.0, 2.0, 3.0))
            .with_angular_velocity(Vec3::Y)
            .with_material(MaterialId(1))
            .with_sleep(SleepParams { speed_limit: 1.0, time_limit: 1.0 })
            .with_linear_damping(0.5)
            .with_angular_damping(0.25);

        assert_eq!(desc.transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(desc.angular_velocity, Vec3::Y);
        assert_eq!(desc.material, Some(MaterialId(1)));
        assert!(desc.sleep.is_some());
        assert!((desc.linear_damping - 0.5).abs() < 1e-6);
        assert!((desc.angular_damping - 0.25).abs() < 1e-6);
    }
}

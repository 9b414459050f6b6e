use crate::api::error::TableError;
use crate::api::types::{BodyHandle, NodeId, Transform};
use crate::components::node::RenderNode;
use crate::core::backend::{PhysicsBackend, SceneGraph};
use crate::core::body::BodyDesc;

/// One visual node bound to one physical body.
///
/// The only way to obtain a `PairedObject` is [`PairedObject::register`],
/// which adds both halves in the same call, so neither half can exist in its
/// subsystem without the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairedObject {
    node: NodeId,
    body: BodyHandle,
}

impl PairedObject {
    /// Register `desc` with the world and `node` with the scene. The node
    /// starts at the body's initial transform.
    pub fn register<W, S>(world: &mut W, scene: &mut S, node: RenderNode, desc: &BodyDesc) -> Self
    where
        W: PhysicsBackend + ?Sized,
        S: SceneGraph + ?Sized,
    {
        let body = world.add_body(desc);
        let node = scene.add(node.with_transform(desc.transform));
        Self { node, body }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Copy the physical transform onto the visual node.
    pub fn sync<W, S>(&self, world: &W, scene: &mut S) -> Result<Transform, TableError>
    where
        W: PhysicsBackend + ?Sized,
        S: SceneGraph + ?Sized,
    {
        let transform = world
            .transform(self.body)
            .ok_or_else(|| self.unregistered())?;
        if !scene.set_transform(self.node, transform) {
            return Err(self.unregistered());
        }
        Ok(transform)
    }

    /// Whether both halves currently agree, within `eps`.
    pub fn is_synced<W, S>(&self, world: &W, scene: &S, eps: f32) -> bool
    where
        W: PhysicsBackend + ?Sized,
        S: SceneGraph + ?Sized,
    {
        match (world.transform(self.body), scene.get(self.node)) {
            (Some(physical), Some(visual)) => physical.approx_eq(&visual.transform(), eps),
            _ => false,
        }
    }

    fn unregistered(&self) -> TableError {
        TableError::UnregisteredObject {
            node: self.node,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{Geometry, MeshComponent, VisualMaterial};
    use crate::core::body::ShapeDesc;
    use crate::core::scene::Scene;
    use crate::testing::FakeWorld;
    use glam::{Quat, Vec3};

    fn sphere_node() -> RenderNode {
        RenderNode::new(MeshComponent::new(
            Geometry::Sphere { radius: 0.1 },
            VisualMaterial::basic(),
        ))
    }

    #[test]
    fn register_adds_both_halves() {
        let mut world = FakeWorld::new(Vec3::ZERO);
        let mut scene = Scene::new();
        let desc = BodyDesc::dynamic(ShapeDesc::Ball { radius: 0.1 }, 1.0)
            .with_position(Vec3::new(1.0, 2.0, 3.0))
            .with_orientation(Quat::from_rotation_y(0.3));

        let pair = PairedObject::register(&mut world, &mut scene, sphere_node(), &desc);

        assert_eq!(world.body_count(), 1);
        assert_eq!(scene.len(), 1);
        // Visual half starts where the body starts.
        assert!(pair.is_synced(&world, &scene, 1e-6));
    }

    #[test]
    fn sync_copies_physical_transform() {
        let mut world = FakeWorld::new(Vec3::new(0.0, -10.0, 0.0));
        let mut scene = Scene::new();
        let desc = BodyDesc::dynamic(ShapeDesc::Ball { radius: 0.1 }, 1.0)
            .with_position(Vec3::new(0.0, 3.0, 0.0));
        let pair = PairedObject::register(&mut world, &mut scene, sphere_node(), &desc);

        world.step(1.0 / 60.0, 1.0 / 60.0, 10);
        assert!(!pair.is_synced(&world, &scene, 1e-6));

        let copied = pair.sync(&world, &mut scene).unwrap();
        assert!(copied.position.y < 3.0);
        assert!(pair.is_synced(&world, &scene, 1e-6));
    }

    #[test]
    fn sync_fails_when_halves_live_elsewhere() {
        let mut world = FakeWorld::new(Vec3::ZERO);
        let mut scene = Scene::new();
        let desc = BodyDesc::dynamic(ShapeDesc::Ball { radius: 0.1 }, 1.0);
        let pair = PairedObject::register(&mut world, &mut scene, sphere_node(), &desc);

        let other_world = FakeWorld::new(Vec3::ZERO);
        match pair.sync(&other_world, &mut scene) {
            Err(TableError::UnregisteredObject { node, body }) => {
                assert_eq!(node, pair.node());
                assert_eq!(body, pair.body());
            }
            other => panic!("expected UnregisteredObject, got {:?}", other),
        }

        let mut other_scene = Scene::new();
        assert!(pair.sync(&world, &mut other_scene).is_err());
    }
}

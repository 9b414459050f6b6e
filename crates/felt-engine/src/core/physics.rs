use glam::{Quat, Vec3};
use rapier3d::prelude::*;

use crate::api::types::{BodyHandle, Transform};
use crate::core::backend::PhysicsBackend;
use crate::core::body::{BodyDesc, BodyType, ShapeDesc};
use crate::core::materials::{find_contact, ContactMaterial, MaterialId};
use crate::core::time::FixedTimestep;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam to nalgebra and back
// ---------------------------------------------------------------------------

fn vec3_to_na(v: Vec3) -> nalgebra::Vector3<f32> {
    nalgebra::Vector3::new(v.x, v.y, v.z)
}

fn na_to_vec3(v: &nalgebra::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn quat_to_na(q: Quat) -> nalgebra::UnitQuaternion<f32> {
    nalgebra::UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(q.w, q.x, q.y, q.z))
}

fn transform_to_na_iso(t: &Transform) -> nalgebra::Isometry3<f32> {
    nalgebra::Isometry3::from_parts(
        nalgebra::Translation3::new(t.position.x, t.position.y, t.position.z),
        quat_to_na(t.orientation),
    )
}

fn na_iso_to_transform(iso: &nalgebra::Isometry3<f32>) -> Transform {
    let q = iso.rotation.quaternion();
    Transform {
        position: na_to_vec3(&iso.translation.vector),
        orientation: Quat::from_xyzw(q.i, q.j, q.k, q.w),
    }
}

fn build_collider(shape: &ShapeDesc) -> ColliderBuilder {
    match *shape {
        ShapeDesc::Plane => ColliderBuilder::halfspace(nalgebra::Vector3::z_axis()),
        ShapeDesc::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
        ShapeDesc::Ball { radius } => ColliderBuilder::ball(radius),
    }
}

fn body_type_to_rapier(body_type: BodyType) -> RigidBodyType {
    match body_type {
        BodyType::Dynamic => RigidBodyType::Dynamic,
        BodyType::Fixed => RigidBodyType::Fixed,
    }
}

/// Handle pair for one registered body, referencing Rapier internals.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

// ---------------------------------------------------------------------------
// Pairwise contact materials
// ---------------------------------------------------------------------------

/// Rapier combines per-collider coefficients; the table needs per-pair ones.
/// Every collider carries its material id in `user_data`, and this hook
/// rewrites the solver contacts of each pair from the registered table.
struct ContactMaterialHooks {
    pairs: Vec<ContactMaterial>,
}

impl ContactMaterialHooks {
    fn resolve(&self, a: MaterialId, b: MaterialId) -> ContactMaterial {
        find_contact(&self.pairs, a, b)
            .copied()
            .unwrap_or(ContactMaterial::FALLBACK)
    }
}

impl PhysicsHooks for ContactMaterialHooks {
    fn modify_solver_contacts(&self, context: &mut ContactModificationContext) {
        let (Some(c1), Some(c2)) = (
            context.colliders.get(context.collider1),
            context.colliders.get(context.collider2),
        ) else {
            return;
        };

        let contact = self.resolve(
            MaterialId(c1.user_data as u32),
            MaterialId(c2.user_data as u32),
        );
        for solver_contact in context.solver_contacts.iter_mut() {
            solver_contact.friction = contact.friction;
            solver_contact.restitution = contact.restitution;
        }
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier3D boilerplate into a single struct behind [`PhysicsBackend`].
pub struct PhysicsWorld {
    gravity: nalgebra::Vector3<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    hooks: ContactMaterialHooks,
    timestep: FixedTimestep,
    /// Indexed by `BodyHandle`; bodies are never removed.
    handles: Vec<PhysicsBody>,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector (Y up).
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity: vec3_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            hooks: ContactMaterialHooks { pairs: Vec::new() },
            timestep: FixedTimestep::new(1.0 / 60.0, 10),
            handles: Vec::with_capacity(64),
        }
    }

    /// Look up the Rapier handles of a registered body.
    pub fn physics_body(&self, body: BodyHandle) -> Option<&PhysicsBody> {
        self.handles.get(body.0 as usize)
    }

    /// Query the collider shape of a body.
    /// Returns `None` if the body is unknown or has an unsupported shape.
    #[cfg(test)]
    fn collider_shape(&self, body: BodyHandle) -> Option<ShapeDesc> {
        let handles = self.physics_body(body)?;
        let collider = self.colliders.get(handles.collider_handle)?;
        let shape = collider.shape();
        if let Some(ball) = shape.as_ball() {
            Some(ShapeDesc::Ball { radius: ball.radius })
        } else if let Some(cuboid) = shape.as_cuboid() {
            Some(ShapeDesc::Cuboid {
                half_extents: na_to_vec3(&cuboid.half_extents),
            })
        } else if shape.as_halfspace().is_some() {
            Some(ShapeDesc::Plane)
        } else {
            None
        }
    }

    /// Material id stored on a body's collider.
    #[cfg(test)]
    fn collider_material(&self, body: BodyHandle) -> Option<MaterialId> {
        let handles = self.physics_body(body)?;
        let collider = self.colliders.get(handles.collider_handle)?;
        match collider.user_data as u32 {
            0 => None,
            id => Some(MaterialId(id)),
        }
    }

    fn rigid_body(&self, body: BodyHandle) -> Option<&RigidBody> {
        let handles = self.physics_body(body)?;
        self.bodies.get(handles.body_handle)
    }

    fn rigid_body_mut(&mut self, body: BodyHandle) -> Option<&mut RigidBody> {
        let handles = *self.handles.get(body.0 as usize)?;
        self.bodies.get_mut(handles.body_handle)
    }

    fn step_once(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &self.hooks,
            &(),
        );

        // User forces last for a single step.
        for (_, rb) in self.bodies.iter_mut() {
            rb.reset_forces(false);
            rb.reset_torques(false);
        }
    }
}

impl PhysicsBackend for PhysicsWorld {
    /// The handle index is stored in the body's `user_data`; the material id
    /// in the collider's.
    fn add_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.handles.len() as u32);

        let mut rb = RigidBodyBuilder::new(body_type_to_rapier(desc.body_type))
            .position(transform_to_na_iso(&desc.transform))
            .angvel(vec3_to_na(desc.angular_velocity))
            .linear_damping(desc.linear_damping)
            .angular_damping(desc.angular_damping)
            .can_sleep(desc.sleep.is_some())
            .user_data(handle.0 as u128)
            .build();

        if let Some(sleep) = desc.sleep {
            let activation = rb.activation_mut();
            activation.normalized_linear_threshold = sleep.speed_limit;
            // One limit for both: 1 rad/s on a table ball is a few cm/s of
            // roll, slow enough to count as resting.
            activation.angular_threshold = sleep.speed_limit;
            activation.time_until_sleep = sleep.time_limit;
        }

        let body_handle = self.bodies.insert(rb);

        let mut collider = build_collider(&desc.shape)
            .active_hooks(ActiveHooks::MODIFY_SOLVER_CONTACTS)
            .user_data(desc.material.map(|m| m.0 as u128).unwrap_or(0));
        if desc.body_type == BodyType::Dynamic {
            collider = collider.mass(desc.mass);
        }

        let collider_handle =
            self.colliders
                .insert_with_parent(collider.build(), body_handle, &mut self.bodies);

        self.handles.push(PhysicsBody {
            body_handle,
            collider_handle,
        });
        handle
    }

    fn add_contact_material(&mut self, contact: ContactMaterial) {
        self.hooks.pairs.push(contact);
    }

    fn step(&mut self, fixed_dt: f32, elapsed: f32, max_substeps: u32) -> u32 {
        self.timestep.configure(fixed_dt, max_substeps);
        self.integration_parameters.dt = fixed_dt;

        let steps = self.timestep.accumulate(elapsed);
        for _ in 0..steps {
            self.step_once();
        }
        steps
    }

    fn apply_force(&mut self, body: BodyHandle, force: Vec3, world_point: Vec3) {
        if let Some(rb) = self.rigid_body_mut(body) {
            rb.add_force_at_point(
                vec3_to_na(force),
                nalgebra::Point3::new(world_point.x, world_point.y, world_point.z),
                true,
            );
        }
    }

    fn wake_up(&mut self, body: BodyHandle) {
        if let Some(rb) = self.rigid_body_mut(body) {
            rb.wake_up(true);
        }
    }

    fn is_sleeping(&self, body: BodyHandle) -> bool {
        self.rigid_body(body).map(|rb| rb.is_sleeping()).unwrap_or(false)
    }

    fn transform(&self, body: BodyHandle) -> Option<Transform> {
        self.rigid_body(body).map(|rb| na_iso_to_transform(rb.position()))
    }

    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.rigid_body(body).map(|rb| na_to_vec3(rb.linvel()))
    }

    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.rigid_body(body).map(|rb| na_to_vec3(rb.angvel()))
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn contact_material_count(&self) -> usize {
        self.hooks.pairs.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Solver stand-in for tests: gravity and user forces, no contacts.

use glam::{Quat, Vec3};

use crate::api::types::{BodyHandle, Transform};
use crate::core::backend::PhysicsBackend;
use crate::core::body::{BodyDesc, BodyType};
use crate::core::materials::ContactMaterial;
use crate::core::time::FixedTimestep;

#[derive(Debug, Clone)]
pub(crate) struct FakeBody {
    pub desc: BodyDesc,
    pub transform: Transform,
    pub linvel: Vec3,
    pub angvel: Vec3,
    pub force: Vec3,
    pub sleeping: bool,
}

pub(crate) struct FakeWorld {
    pub gravity: Vec3,
    pub bodies: Vec<FakeBody>,
    pub contacts: Vec<ContactMaterial>,
    pub steps_run: u32,
    timestep: FixedTimestep,
}

impl FakeWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            contacts: Vec::new(),
            steps_run: 0,
            timestep: FixedTimestep::new(1.0 / 60.0, 10),
        }
    }

    pub fn put_to_sleep(&mut self, body: BodyHandle) {
        self.bodies[body.0 as usize].sleeping = true;
    }

    fn integrate(&mut self, dt: f32) {
        for body in &mut self.bodies {
            if body.desc.body_type == BodyType::Fixed || body.sleeping {
                body.force = Vec3::ZERO;
                continue;
            }
            let accel = self.gravity + body.force / body.desc.mass;
            body.linvel += accel * dt;
            body.transform.position += body.linvel * dt;
            let spin = body.angvel * dt;
            if spin.length_squared() > 0.0 {
                body.transform.orientation =
                    (Quat::from_scaled_axis(spin) * body.transform.orientation).normalize();
            }
            body.force = Vec3::ZERO;
        }
    }
}

impl PhysicsBackend for FakeWorld {
    fn add_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        self.bodies.push(FakeBody {
            desc: desc.clone(),
            transform: desc.transform,
            linvel: Vec3::ZERO,
            angvel: desc.angular_velocity,
            force: Vec3::ZERO,
            sleeping: false,
        });
        BodyHandle(self.bodies.len() as u32 - 1)
    }

    fn add_contact_material(&mut self, contact: ContactMaterial) {
        self.contacts.push(contact);
    }

    fn step(&mut self, fixed_dt: f32, elapsed: f32, max_substeps: u32) -> u32 {
        self.timestep.configure(fixed_dt, max_substeps);
        let steps = self.timestep.accumulate(elapsed);
        for _ in 0..steps {
            self.integrate(fixed_dt);
        }
        self.steps_run += steps;
        steps
    }

    fn apply_force(&mut self, body: BodyHandle, force: Vec3, _world_point: Vec3) {
        if let Some(b) = self.bodies.get_mut(body.0 as usize) {
            b.force += force;
        }
    }

    fn wake_up(&mut self, body: BodyHandle) {
        if let Some(b) = self.bodies.get_mut(body.0 as usize) {
            b.sleeping = false;
        }
    }

    fn is_sleeping(&self, body: BodyHandle) -> bool {
        self.bodies
            .get(body.0 as usize)
            .map(|b| b.sleeping)
            .unwrap_or(false)
    }

    fn transform(&self, body: BodyHandle) -> Option<Transform> {
        self.bodies.get(body.0 as usize).map(|b| b.transform)
    }

    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.bodies.get(body.0 as usize).map(|b| b.linvel)
    }

    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.bodies.get(body.0 as usize).map(|b| b.angvel)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn contact_material_count(&self) -> usize {
        self.contacts.len()
    }
}

/// Replays a fixed list of values, cycling.
pub(crate) struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl crate::core::rng::RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

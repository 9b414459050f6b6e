use std::ops::Range;

use crate::api::config::{OptionsPatch, TableConfig};
use crate::api::error::TableError;
use crate::assets::textures::TableTextures;
use crate::core::backend::{PhysicsBackend, SceneGraph};
use crate::core::materials::MaterialRegistry;
use crate::core::paired::PairedObject;
use crate::core::rng::RandomSource;
use crate::input::triggers::Trigger;
use crate::systems::sync::sync_all;
use crate::table::composer::{compose_table, BuildContext};
use crate::table::cue::{self, CueStrike};
use crate::table::injector;

/// Where the simulation loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Composed, not ticked yet.
    Idle,
    Running,
}

/// One billiards table: a physics world, a scene, and the paired objects
/// that live in both.
///
/// Every body and node is created through the session, so each body in the
/// world has exactly one node in the scene. Registration is append-only.
pub struct TableSession<W: PhysicsBackend, S: SceneGraph> {
    world: W,
    scene: S,
    config: TableConfig,
    materials: MaterialRegistry,
    textures: TableTextures,
    floor: PairedObject,
    rails: [PairedObject; 4],
    balls: Vec<PairedObject>,
    state: LoopState,
}

impl<W: PhysicsBackend, S: SceneGraph> TableSession<W, S> {
    /// Compose a table into an empty world and scene.
    pub fn new(mut world: W, mut scene: S, config: TableConfig) -> Result<Self, TableError> {
        let materials = MaterialRegistry::new();
        let textures = TableTextures::new();
        let table = compose_table(
            &mut world,
            &mut scene,
            BuildContext {
                config: &config,
                materials: &materials,
                textures: &textures,
            },
        )?;

        Ok(Self {
            world,
            scene,
            config,
            materials,
            textures,
            floor: table.floor,
            rails: table.rails,
            balls: table.balls,
            state: LoopState::Idle,
        })
    }

    /// Advance the world by `elapsed` seconds of wall-clock time, then copy
    /// every body's transform onto its node. Returns the fixed steps run.
    pub fn tick(&mut self, elapsed: f32) -> Result<u32, TableError> {
        if self.state == LoopState::Idle {
            log::info!("simulation loop running");
            self.state = LoopState::Running;
        }

        let steps = self
            .world
            .step(self.config.fixed_dt, elapsed, self.config.max_substeps);

        let objects = std::iter::once(&self.floor)
            .chain(self.rails.iter())
            .chain(self.balls.iter());
        sync_all(&self.world, &mut self.scene, objects)?;

        Ok(steps)
    }

    /// Drop `drop_count` random balls above the table. Returns their indices
    /// in [`balls`](Self::balls).
    pub fn drop_balls<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Range<usize> {
        let ctx = BuildContext {
            config: &self.config,
            materials: &self.materials,
            textures: &self.textures,
        };
        let range = injector::drop_balls(&mut self.world, &mut self.scene, ctx, &mut self.balls, rng);
        log::info!("dropped {} balls ({} total)", range.len(), self.balls.len());
        range
    }

    /// Strike the cue ball down the table.
    pub fn strike_cue(&mut self) -> CueStrike {
        cue::strike(&mut self.world, &self.balls[0], &self.config)
    }

    /// Set the wireframe flag on every ball, present and future.
    pub fn set_wireframe(&mut self, on: bool) {
        self.config.show_wireframe = on;
        for ball in &self.balls {
            if let Some(node) = self.scene.get_mut(ball.node()) {
                node.mesh.material.wireframe = on;
            }
        }
        log::info!("wireframe {}", if on { "on" } else { "off" });
    }

    /// Apply a debug panel override. On error the configuration is left
    /// as it was. Only objects created afterwards see new dimensions.
    pub fn apply_options(&mut self, patch: &OptionsPatch) -> Result<(), TableError> {
        let next = self.config.patched(patch)?;
        let wireframe_changed = next.show_wireframe != self.config.show_wireframe;
        self.config = next;
        if wireframe_changed {
            self.set_wireframe(self.config.show_wireframe);
        }
        log::info!(
            "options applied: cueForce {}, ballDropNumber {}",
            self.config.cue_force,
            self.config.drop_count
        );
        Ok(())
    }

    /// Parse and apply a JSON options override.
    pub fn apply_options_json(&mut self, json: &str) -> Result<(), TableError> {
        self.apply_options(&OptionsPatch::from_json(json)?)
    }

    /// Run one trigger synchronously.
    pub fn handle_trigger<R: RandomSource + ?Sized>(
        &mut self,
        trigger: Trigger,
        rng: &mut R,
    ) -> Result<(), TableError> {
        match trigger {
            Trigger::DropBalls => {
                self.drop_balls(rng);
            }
            Trigger::CueStrike => {
                self.strike_cue();
            }
            Trigger::SetWireframe(on) => self.set_wireframe(on),
            Trigger::SetCueForce(force) => self.apply_options(&OptionsPatch {
                cue_force: Some(force),
                ..OptionsPatch::default()
            })?,
            Trigger::SetDropCount(count) => self.apply_options(&OptionsPatch {
                drop_count: Some(count),
                ..OptionsPatch::default()
            })?,
        }
        Ok(())
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn textures(&self) -> &TableTextures {
        &self.textures
    }

    pub fn floor(&self) -> &PairedObject {
        &self.floor
    }

    pub fn rails(&self) -> &[PairedObject; 4] {
        &self.rails
    }

    /// Rack balls first (index 0 is the cue ball), then dropped balls in
    /// drop order.
    pub fn balls(&self) -> &[PairedObject] {
        &self.balls
    }

    pub fn cue_ball(&self) -> &PairedObject {
        &self.balls[0]
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Floor, rails and balls.
    pub fn paired_objects(&self) -> impl Iterator<Item = &PairedObject> {
        std::iter::once(&self.floor)
            .chain(self.rails.iter())
            .chain(self.balls.iter())
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }
}

#[cfg(feature = "physics")]
pub type RapierTable = TableSession<crate::core::physics::PhysicsWorld, crate::core::scene::Scene>;

#[cfg(feature = "physics")]
impl RapierTable {
    /// A table on the rapier3d backend.
    pub fn with_rapier(config: TableConfig) -> Result<Self, TableError> {
        let world = crate::core::physics::PhysicsWorld::new(config.gravity);
        Self::new(world, crate::core::scene::Scene::new(), config)
    }
}

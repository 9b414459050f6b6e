//! The cue: a one-shot force on the break ball.

use glam::Vec3;

use crate::api::config::TableConfig;
use crate::core::backend::PhysicsBackend;
use crate::core::paired::PairedObject;

/// A force and the world-space point it acts at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueStrike {
    pub force: Vec3,
    pub point: Vec3,
}

impl CueStrike {
    /// Straight down the table toward -Z with the configured magnitude,
    /// applied at the near end of the table's center line.
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            force: Vec3::new(0.0, 0.0, -config.cue_force),
            point: Vec3::new(0.0, 0.0, config.floor_length / 2.0),
        }
    }
}

/// Wake the cue ball if it sleeps, then apply the strike for one step.
pub fn strike<W>(world: &mut W, cue_ball: &PairedObject, config: &TableConfig) -> CueStrike
where
    W: PhysicsBackend + ?Sized,
{
    let strike = CueStrike::from_config(config);
    let body = cue_ball.body();
    if world.is_sleeping(body) {
        world.wake_up(body);
    }
    world.apply_force(body, strike.force, strike.point);
    log::debug!("cue strike {:?} at {:?}", strike.force, strike.point);
    strike
}

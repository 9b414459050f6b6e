use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::error::TableError;

/// Debug panel range for the cue force slider.
pub const CUE_FORCE_RANGE: (f32, f32) = (0.0, 100.0);
/// Debug panel range for the drop count slider.
pub const DROP_COUNT_RANGE: (u32, u32) = (1, 100);

/// Table configuration. Fixed at startup; only the options panel
/// (see [`OptionsPatch`]) changes it afterwards, and those changes apply to
/// objects created from then on.
///
/// Units are metres, kilograms and newtons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    pub floor_width: f32,
    pub floor_length: f32,
    pub rail_width: f32,
    pub rail_height: f32,
    pub ball_radius: f32,
    pub ball_mass: f32,
    /// Magnitude of the one-shot cue force.
    pub cue_force: f32,
    /// Balls synthesized per "drop balls" trigger.
    pub drop_count: u32,
    pub show_wireframe: bool,
    /// Height dropped balls start from.
    pub drop_height: f32,
    pub gravity: Vec3,
    /// Nominal physics step (default: 1/60).
    pub fixed_dt: f32,
    /// Upper bound on fixed steps run for one frame.
    pub max_substeps: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            floor_width: 1.27,
            floor_length: 2.54,
            rail_width: 0.1778,
            rail_height: 0.01,
            ball_radius: 0.028575,
            ball_mass: 0.16,
            cue_force: 75.0,
            drop_count: 10,
            show_wireframe: false,
            drop_height: 3.0,
            gravity: Vec3::new(0.0, -9.82, 0.0),
            fixed_dt: 1.0 / 60.0,
            max_substeps: 10,
        }
    }
}

impl TableConfig {
    /// Parse a full configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce a degenerate table.
    pub fn validate(&self) -> Result<(), TableError> {
        positive("floorWidth", self.floor_width)?;
        positive("floorLength", self.floor_length)?;
        positive("railWidth", self.rail_width)?;
        non_negative("railHeight", self.rail_height)?;
        positive("ballRadius", self.ball_radius)?;
        positive("ballMass", self.ball_mass)?;
        non_negative("cueForce", self.cue_force)?;
        positive("fixedDt", self.fixed_dt)?;
        positive("dropHeight", self.drop_height)?;

        let diameter = self.ball_radius * 2.0;
        if diameter >= self.floor_width || diameter >= self.floor_length {
            return Err(TableError::invalid(
                "ballRadius",
                format!(
                    "ball diameter {} does not fit a {}x{} floor",
                    diameter, self.floor_width, self.floor_length
                ),
            ));
        }
        if self.max_substeps == 0 {
            return Err(TableError::invalid("maxSubsteps", "must be at least 1"));
        }
        if !self.gravity.is_finite() {
            return Err(TableError::invalid("gravity", "must be finite"));
        }
        Ok(())
    }

    /// Apply a panel override, returning the patched copy. Slider-backed
    /// fields are clamped to their panel ranges. The result is validated;
    /// `self` is never modified.
    pub fn patched(&self, patch: &OptionsPatch) -> Result<TableConfig, TableError> {
        let mut next = self.clone();

        if let Some(v) = patch.floor_width {
            next.floor_width = v;
        }
        if let Some(v) = patch.floor_length {
            next.floor_length = v;
        }
        if let Some(v) = patch.rail_width {
            next.rail_width = v;
        }
        if let Some(v) = patch.rail_height {
            next.rail_height = v;
        }
        if let Some(v) = patch.ball_radius {
            next.ball_radius = v;
        }
        if let Some(v) = patch.ball_mass {
            next.ball_mass = v;
        }
        if let Some(v) = patch.cue_force {
            let clamped = v.clamp(CUE_FORCE_RANGE.0, CUE_FORCE_RANGE.1);
            if clamped != v {
                log::warn!("cueForce {} outside panel range, clamped to {}", v, clamped);
            }
            next.cue_force = clamped;
        }
        if let Some(v) = patch.drop_count {
            let clamped = v.clamp(DROP_COUNT_RANGE.0, DROP_COUNT_RANGE.1);
            if clamped != v {
                log::warn!("ballDropNumber {} outside panel range, clamped to {}", v, clamped);
            }
            next.drop_count = clamped;
        }
        if let Some(v) = patch.show_wireframe {
            next.show_wireframe = v;
        }

        next.validate()?;
        Ok(next)
    }
}

/// A partial options override, as sent by the debug panel.
/// `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionsPatch {
    pub floor_width: Option<f32>,
    pub floor_length: Option<f32>,
    pub rail_width: Option<f32>,
    pub rail_height: Option<f32>,
    pub ball_radius: Option<f32>,
    pub ball_mass: Option<f32>,
    pub cue_force: Option<f32>,
    #[serde(alias = "ballDropNumber")]
    pub drop_count: Option<u32>,
    pub show_wireframe: Option<bool>,
}

impl OptionsPatch {
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TableError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TableError::invalid(field, format!("must be positive, got {}", value)))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TableError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TableError::invalid(field, format!("must be non-negative, got {}", value)))
    }
}

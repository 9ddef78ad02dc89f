//! Tunable game metrics, loadable from JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("setting `{field}` must be {requirement}, got {value}")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
        value: f32,
    },
}

/// Every field is optional in JSON; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world_width: f32,
    pub world_height: f32,
    /// Orb radius. Targets and barriers are sized from it too.
    pub projectile_radius: f32,
    pub rest_position: [f32; 2],
    /// Extra grab margin around the resting orb.
    pub touch_threshold: f32,
    /// Releases this close to the drag start snap back instead of launching.
    pub snap_limit: f32,
    /// Impulse per unit of pull.
    pub force_multiplier: f32,
    /// Maximum pull radius.
    pub r_limit: f32,
    pub round_seconds: u32,
    pub gravity: [f32; 2],
    pub physics_speed: f32,
    pub orb_density: f32,
    pub barrier_amplitude: f32,
    /// Seconds per barrier sweep (one direction).
    pub barrier_period: f32,
    /// Seconds per target pulse leg (dim, then brighten).
    pub target_pulse_period: f32,
    /// A launched orb that has not landed or scored by then is put back.
    pub max_flight_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: 375.0,
            world_height: 667.0,
            projectile_radius: 10.0,
            rest_position: [187.5, 100.0],
            touch_threshold: 10.0,
            snap_limit: 10.0,
            force_multiplier: 0.5,
            r_limit: 50.0,
            round_seconds: 20,
            gravity: [0.0, 0.0],
            physics_speed: 1.5,
            orb_density: 0.0001,
            barrier_amplitude: 70.0,
            barrier_period: 1.0,
            target_pulse_period: 2.0,
            max_flight_seconds: 8.0,
        }
    }
}

const BUNDLED: &str = include_str!("../settings.json");

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings shipped next to the crate.
    pub fn bundled() -> Result<Self, SettingsError> {
        Self::from_json(BUNDLED)
    }

    pub fn rest(&self) -> Vec2 {
        Vec2::from_array(self.rest_position)
    }

    pub fn gravity(&self) -> Vec2 {
        Vec2::from_array(self.gravity)
    }

    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("projectile_radius", self.projectile_radius),
            ("r_limit", self.r_limit),
            ("physics_speed", self.physics_speed),
            ("orb_density", self.orb_density),
            ("barrier_period", self.barrier_period),
            ("target_pulse_period", self.target_pulse_period),
            ("max_flight_seconds", self.max_flight_seconds),
            ("round_seconds", self.round_seconds as f32),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(SettingsError::OutOfRange {
                    field,
                    requirement: "positive",
                    value,
                });
            }
        }
        let non_negative = [
            ("touch_threshold", self.touch_threshold),
            ("snap_limit", self.snap_limit),
            ("force_multiplier", self.force_multiplier),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(SettingsError::OutOfRange {
                    field,
                    requirement: "zero or more",
                    value,
                });
            }
        }
        Ok(())
    }
}

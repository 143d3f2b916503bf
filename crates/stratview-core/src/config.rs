//! Studio configuration.
//!
//! All fields have defaults, so a config file only needs to list the values
//! it overrides:
//!
//! ```json
//! { "arena": { "width_mm": 2000.0, "height_mm": 1500.0 }, "team": "Yellow" }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{HeadingMode, Team};
use crate::error::ConfigError;
use crate::types::{Arena, Pose};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub arena: Arena,
    /// Virtual cursor and live robot pose before any start block.
    pub default_start: Pose,
    /// Hold time of every timed action (seconds).
    pub action_duration_secs: f64,
    /// Curve parameter advance per tick, in (0, 1].
    pub progress_per_tick: f64,
    /// Ticks per second of the run clock.
    pub tick_rate: u32,
    /// Parameter step of the finite-difference heading.
    pub tangent_epsilon: f64,
    pub heading_mode: HeadingMode,
    pub team: Team,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            default_start: Pose::new(DEFAULT_START_X, DEFAULT_START_Y, DEFAULT_START_THETA),
            action_duration_secs: ACTION_DURATION_SECS,
            progress_per_tick: PROGRESS_PER_TICK,
            tick_rate: TICK_RATE,
            tangent_epsilon: TANGENT_EPSILON,
            heading_mode: HeadingMode::default(),
            team: Team::default(),
        }
    }
}

impl StudioConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.arena.width_mm > 0.0) {
            return Err(invalid("arena.width_mm", self.arena.width_mm));
        }
        if !(self.arena.height_mm > 0.0) {
            return Err(invalid("arena.height_mm", self.arena.height_mm));
        }
        if !(self.progress_per_tick > 0.0 && self.progress_per_tick <= 1.0) {
            return Err(invalid("progress_per_tick", self.progress_per_tick));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_rate",
                reason: "must be positive".into(),
            });
        }
        if !(self.action_duration_secs >= 0.0) {
            return Err(invalid("action_duration_secs", self.action_duration_secs));
        }
        if !(self.tangent_epsilon > 0.0) {
            return Err(invalid("tangent_epsilon", self.tangent_epsilon));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, value: f64) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: format!("{value} is out of range"),
    }
}

//! Fundamental geometric and timing types.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Robot pose in arena coordinates.
/// x = right, y = up (millimetres, origin at the bottom-left corner).
/// theta in degrees, counter-clockwise from +x, any range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

/// Rectangular playing area in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Opaque identifier of the editor element a command came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(pub String);

/// Run clock. Reset at the start of every simulation run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Ticks elapsed in the current run.
    pub tick: u64,
    /// Elapsed run time in seconds.
    pub elapsed_secs: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Unit vector along the heading.
    pub fn direction(&self) -> DVec2 {
        let rad = self.theta.to_radians();
        DVec2::new(rad.cos(), rad.sin())
    }

    /// Heading wrapped to [0, 360) for display.
    pub fn display_theta(&self) -> f64 {
        self.theta.rem_euclid(360.0)
    }

    /// Same heading, new position.
    pub fn with_position(self, position: DVec2) -> Self {
        Self {
            x: position.x,
            y: position.y,
            theta: self.theta,
        }
    }

    /// Reflect about the vertical centre line of an arena `arena_width` wide.
    /// Used to turn a blue-side strategy into its yellow-side equivalent.
    pub fn mirrored(&self, arena_width: f64) -> Self {
        Self {
            x: arena_width - self.x,
            y: self.y,
            theta: (180.0 - self.theta).rem_euclid(360.0),
        }
    }
}

impl Arena {
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(
            crate::constants::ARENA_WIDTH_MM,
            crate::constants::ARENA_HEIGHT_MM,
        )
    }
}

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Number of whole ticks needed to cover `secs` at `tick_rate` Hz.
/// Always at least one tick for a positive duration.
pub fn secs_to_ticks(secs: f64, tick_rate: u32) -> u64 {
    if secs <= 0.0 {
        return 0;
    }
    ((secs * tick_rate as f64).ceil() as u64).max(1)
}

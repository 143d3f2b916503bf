//! Enumeration types used throughout the studio.

use serde::{Deserialize, Serialize};

/// Sequencer state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackPhase {
    /// Nothing queued, or the queue has been fully consumed.
    #[default]
    Idle,
    /// Transient: popping the next queue entry.
    Advance,
    /// Following a curve segment.
    Moving,
    /// Holding for a timed action.
    Pausing,
}

/// Whether a parse is for display only or feeds a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    /// Build curves for inspection. Never touches the live robot.
    Preview,
    /// Build the action queue for a run. Start blocks reset the live robot.
    Execute,
}

/// How the robot heading is derived from the curve while moving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingMode {
    /// Direction between `B(t)` and `B(t + ε)`.
    #[default]
    FiniteDifference,
    /// Direction of the exact derivative `B'(t)`.
    Analytic,
}

/// Side of the table the robot plays on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    /// Reference side; strategies are authored in blue coordinates.
    #[default]
    Blue,
    /// Mirror image of blue about the table's vertical centre line.
    Yellow,
}

/// Severity of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConsoleLevel {
    Info,
    Warning,
}

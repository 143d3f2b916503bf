//! Default tuning values. Every one of these can be overridden through
//! [`StudioConfig`](crate::config::StudioConfig).

/// Playback tick rate (Hz). One tick stands in for one animation frame.
pub const TICK_RATE: u32 = 60;

// --- Arena ---

/// Table width in millimetres.
pub const ARENA_WIDTH_MM: f64 = 3000.0;

/// Table height in millimetres.
pub const ARENA_HEIGHT_MM: f64 = 2000.0;

/// Pose used when a program has no start block.
pub const DEFAULT_START_X: f64 = 250.0;
pub const DEFAULT_START_Y: f64 = 1000.0;
pub const DEFAULT_START_THETA: f64 = 0.0;

// --- Playback ---

/// Curve parameter advance per tick. At 60 Hz a segment takes ~1.1 s.
pub const PROGRESS_PER_TICK: f64 = 0.015;

/// Real-world duration of every timed action (seconds).
pub const ACTION_DURATION_SECS: f64 = 1.0;

/// Parameter step for the finite-difference heading estimate.
pub const TANGENT_EPSILON: f64 = 0.01;

/// Tangents shorter than this (mm) carry no usable heading.
pub const MIN_TANGENT_LENGTH: f64 = 1e-9;

// --- Editor ---

/// Default control-point distance offered by the move block (mm).
pub const DEFAULT_FORCE: f64 = 400.0;

/// Warning attached to editor blocks whose path leaves the table.
pub const OUT_OF_BOUNDS_MESSAGE: &str = "Out of arena!";

/// Maximum console lines kept between snapshots.
pub const MAX_CONSOLE_LINES: usize = 64;

//! Playback snapshot: the complete visible state sent to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::curve::{CubicCurve, CurveSegment};
use crate::enums::{PlaybackPhase, Team};
use crate::events::{ConsoleLine, EditorFeedback, PlaybackEvent};
use crate::types::{Pose, SimTime, SourceId};

/// Complete playback state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub time: SimTime,
    pub run_id: u64,
    pub phase: PlaybackPhase,
    pub paused: bool,
    pub team: Team,
    pub robot: RobotView,
    /// Curve parameter of the active segment; 0 outside `Moving`.
    pub progress: f64,
    pub active_source_id: Option<SourceId>,
    /// Curve being followed, for the highlighted path.
    pub active_curve: Option<CubicCurve>,
    /// Current action indicator (icon + label), only while `Pausing`.
    pub active_action: Option<ActiveActionView>,
    /// Entries not yet started.
    pub queue_remaining: usize,
    pub preview: PreviewView,
    pub events: Vec<PlaybackEvent>,
    pub feedback: Vec<EditorFeedback>,
    pub console: Vec<ConsoleLine>,
}

/// Live simulated robot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RobotView {
    pub pose: Pose,
    /// Heading wrapped to [0, 360).
    pub display_theta: f64,
}

/// Indicator shown above the robot during a timed action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveActionView {
    pub icon: String,
    pub label: String,
    pub remaining_secs: f64,
}

/// Preview curves for the path overlay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewView {
    pub curves: Vec<PreviewCurveView>,
    pub violation_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewCurveView {
    pub segment: CurveSegment,
    pub out_of_bounds: bool,
}

impl RobotView {
    pub fn from_pose(pose: Pose) -> Self {
        Self {
            pose,
            display_theta: pose.display_theta(),
        }
    }
}

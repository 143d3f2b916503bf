//! Commands: strategy steps authored in the editor, and control commands
//! sent from the frontend to the playback engine.
//!
//! Control commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::Team;
use crate::types::{Pose, SourceId};

/// One strategy step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StrategyCommand {
    /// Place the robot. Takes no time.
    StartPose { x: f64, y: f64, theta: f64 },
    /// Curve to a target pose. `force` is the control-point distance (mm).
    MoveTo {
        x: f64,
        y: f64,
        theta: f64,
        force: f64,
    },
    /// Discrete actuator action with a fixed duration.
    TimedAction { action: ActionKind },
    /// A step kind this build does not know. Ignored by the parser.
    #[serde(other)]
    Unsupported,
}

/// A strategy step with the id of the editor block that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorCommand {
    pub source_id: SourceId,
    pub command: StrategyCommand,
}

/// Actuator actions available to a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ActionKind {
    /// Grab a plank at the given lift height.
    TakeKapla { height_mm: f64 },
    /// Turn the held plank over.
    FlipKapla,
    /// Release the held plank at the given lift height.
    PlaceKapla { height_mm: f64 },
    /// Stop the drive motors.
    Stop,
    /// Any other named action.
    Named { label: String },
}

/// Frontend requests to the playback engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlCommand {
    /// Discard any run in progress, parse `program` and play it.
    RunSimulation { program: Vec<EditorCommand> },
    /// Parse `program` for display and flag out-of-arena segments.
    GeneratePreview { program: Vec<EditorCommand> },
    /// Drop the preview curves.
    ClearPreview,
    /// Freeze the run clock.
    Pause,
    /// Continue a paused run.
    Resume,
    /// Switch table side for subsequent parses.
    SetTeam { team: Team },
}

impl StrategyCommand {
    /// Pose carried by pose-bearing steps.
    pub fn pose(&self) -> Option<Pose> {
        match *self {
            StrategyCommand::StartPose { x, y, theta } => Some(Pose::new(x, y, theta)),
            StrategyCommand::MoveTo { x, y, theta, .. } => Some(Pose::new(x, y, theta)),
            StrategyCommand::TimedAction { .. } | StrategyCommand::Unsupported => None,
        }
    }
}

impl EditorCommand {
    pub fn new(source_id: impl Into<String>, command: StrategyCommand) -> Self {
        Self {
            source_id: SourceId::new(source_id),
            command,
        }
    }

    pub fn start_pose(source_id: impl Into<String>, x: f64, y: f64, theta: f64) -> Self {
        Self::new(source_id, StrategyCommand::StartPose { x, y, theta })
    }

    pub fn move_to(
        source_id: impl Into<String>,
        x: f64,
        y: f64,
        theta: f64,
        force: f64,
    ) -> Self {
        Self::new(
            source_id,
            StrategyCommand::MoveTo {
                x,
                y,
                theta,
                force,
            },
        )
    }

    pub fn action(source_id: impl Into<String>, action: ActionKind) -> Self {
        Self::new(source_id, StrategyCommand::TimedAction { action })
    }
}

impl ActionKind {
    /// Console / indicator text.
    pub fn label(&self) -> &str {
        match self {
            ActionKind::TakeKapla { .. } => "Take kapla",
            ActionKind::FlipKapla => "Flip kapla",
            ActionKind::PlaceKapla { .. } => "Place kapla",
            ActionKind::Stop => "STOP",
            ActionKind::Named { label } => label,
        }
    }

    /// Glyph drawn above the robot while the action runs.
    pub fn icon(&self) -> &'static str {
        match self {
            ActionKind::TakeKapla { .. } => "✊",
            ActionKind::FlipKapla => "🤌",
            ActionKind::PlaceKapla { .. } => "🖐️",
            ActionKind::Stop => "🛑",
            ActionKind::Named { .. } => "⚙️",
        }
    }
}

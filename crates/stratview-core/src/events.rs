//! Events emitted by the playback engine for the UI and the block editor.

use serde::{Deserialize, Serialize};

use crate::commands::ActionKind;
use crate::enums::{ConsoleLevel, PlaybackPhase};
use crate::types::{Pose, SourceId};

/// Playback lifecycle events, drained into every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlaybackEvent {
    /// A run was (re)started with a freshly parsed queue.
    RunStarted { run_id: u64, queue_len: usize },
    /// A start block placed the live robot.
    StartPoseApplied { pose: Pose },
    /// The sequencer entered a new phase.
    PhaseEntered { phase: PlaybackPhase },
    /// A curve segment became active.
    SegmentStarted { source_id: SourceId, target: Pose },
    /// The robot reached the end of a segment.
    SegmentFinished { source_id: SourceId, pose: Pose },
    /// A timed action started.
    ActionStarted {
        source_id: SourceId,
        action: ActionKind,
        duration_secs: f64,
    },
    /// A timed action's hold expired.
    ActionFinished { source_id: SourceId },
    /// The queue was fully consumed.
    RunCompleted { run_id: u64 },
    /// A preview was rebuilt.
    PreviewGenerated { curves: usize, violations: usize },
}

/// Imperative instructions for the block editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EditorFeedback {
    /// Highlight one block, or none.
    Highlight { source_id: Option<SourceId> },
    /// Attach a warning to a block.
    MarkError { source_id: SourceId, message: String },
    /// Remove all warnings and highlighting.
    ClearWarnings,
}

/// A line for the simulation console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleLine {
    pub level: ConsoleLevel,
    pub message: String,
    pub tick: u64,
}

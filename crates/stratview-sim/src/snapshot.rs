//! Snapshot builder: turns engine state into a `PlaybackSnapshot`.
//!
//! Read-only; never touches the engine.

use stratview_core::enums::{PlaybackPhase, Team};
use stratview_core::events::{ConsoleLine, EditorFeedback, PlaybackEvent};
use stratview_core::state::{ActiveActionView, PlaybackSnapshot, PreviewView, RobotView};
use stratview_core::types::{Pose, SimTime};

use crate::engine::ActiveEntry;

/// Build a complete PlaybackSnapshot from the current engine state.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_snapshot(
    time: &SimTime,
    run_id: u64,
    phase: PlaybackPhase,
    paused: bool,
    team: Team,
    robot: Pose,
    progress: f64,
    active: Option<&ActiveEntry>,
    queue_remaining: usize,
    preview: &PreviewView,
    dt: f64,
    events: Vec<PlaybackEvent>,
    feedback: Vec<EditorFeedback>,
    console: Vec<ConsoleLine>,
) -> PlaybackSnapshot {
    PlaybackSnapshot {
        time: *time,
        run_id,
        phase,
        paused,
        team,
        robot: RobotView::from_pose(robot),
        progress,
        active_source_id: active.map(|entry| entry.source_id().clone()),
        active_curve: active_curve(active),
        active_action: build_active_action(active, time, dt),
        queue_remaining,
        preview: preview.clone(),
        events,
        feedback,
        console,
    }
}

fn active_curve(active: Option<&ActiveEntry>) -> Option<stratview_core::curve::CubicCurve> {
    match active {
        Some(ActiveEntry::Move { segment, .. }) => Some(segment.curve),
        _ => None,
    }
}

/// Icon, label and countdown for the action being held.
fn build_active_action(
    active: Option<&ActiveEntry>,
    time: &SimTime,
    dt: f64,
) -> Option<ActiveActionView> {
    let Some(ActiveEntry::Action {
        action, due_tick, ..
    }) = active
    else {
        return None;
    };
    let remaining_ticks = due_tick.saturating_sub(time.tick);
    Some(ActiveActionView {
        icon: action.icon().to_string(),
        label: action.label().to_string(),
        remaining_secs: remaining_ticks as f64 * dt,
    })
}

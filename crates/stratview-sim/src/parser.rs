//! Command parser: turns an editor program into an action queue and a list
//! of preview curves.
//!
//! A virtual cursor tracks where the robot will be at each step of the
//! program. Every call starts from a fresh cursor, so repeated parses of the
//! same program give identical output.

use serde::{Deserialize, Serialize};
use tracing::warn;

use stratview_core::commands::{ActionKind, EditorCommand, StrategyCommand};
use stratview_core::config::StudioConfig;
use stratview_core::curve::{CubicCurve, CurveSegment};
use stratview_core::enums::{ParseMode, Team};
use stratview_core::types::{Pose, SourceId};

/// One step of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QueueEntry {
    /// Follow `segment`, finishing exactly on `target`.
    Move { segment: CurveSegment, target: Pose },
    /// Hold in place for `duration_secs`.
    Action {
        source_id: SourceId,
        action: ActionKind,
        duration_secs: f64,
    },
}

/// Output of [`parse`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedProgram {
    /// Execution order equals editor order.
    pub queue: Vec<QueueEntry>,
    /// Every motion curve, for display.
    pub preview: Vec<CurveSegment>,
    /// Pose the live robot must take before the queue runs. Only ever set in
    /// `Execute` mode; a preview never moves the live robot.
    pub live_reset: Option<Pose>,
}

impl QueueEntry {
    pub fn source_id(&self) -> &SourceId {
        match self {
            QueueEntry::Move { segment, .. } => &segment.source_id,
            QueueEntry::Action { source_id, .. } => source_id,
        }
    }
}

/// Pose of the robot before any start block, on the configured side.
pub fn initial_pose(config: &StudioConfig) -> Pose {
    orient(config.default_start, config)
}

/// Map a blue-side pose onto the configured team's side.
fn orient(pose: Pose, config: &StudioConfig) -> Pose {
    match config.team {
        Team::Blue => pose,
        Team::Yellow => pose.mirrored(config.arena.width_mm),
    }
}

/// Parse `commands` in order.
pub fn parse(commands: &[EditorCommand], mode: ParseMode, config: &StudioConfig) -> ParsedProgram {
    let mut program = ParsedProgram::default();
    let mut cursor = initial_pose(config);

    for EditorCommand {
        source_id,
        command,
    } in commands
    {
        match command {
            StrategyCommand::StartPose { x, y, theta } => {
                if ![x, y, theta].iter().all(|v| v.is_finite()) {
                    warn!(%source_id, "skipping start pose with non-finite field");
                    continue;
                }
                cursor = orient(Pose::new(*x, *y, *theta), config);
                if mode == ParseMode::Execute {
                    program.live_reset = Some(cursor);
                }
            }
            StrategyCommand::MoveTo {
                x,
                y,
                theta,
                force,
            } => {
                if ![x, y, theta, force].iter().all(|v| v.is_finite()) || *force < 0.0 {
                    warn!(%source_id, force, "skipping malformed move");
                    continue;
                }
                let target = orient(Pose::new(*x, *y, *theta), config);
                let segment = CurveSegment::new(
                    CubicCurve::from_poses(&cursor, &target, *force),
                    source_id.clone(),
                );
                program.preview.push(segment.clone());
                program.queue.push(QueueEntry::Move { segment, target });
                cursor = target;
            }
            StrategyCommand::TimedAction { action } => {
                program.queue.push(QueueEntry::Action {
                    source_id: source_id.clone(),
                    action: action.clone(),
                    duration_secs: config.action_duration_secs,
                });
            }
            StrategyCommand::Unsupported => {}
        }
    }

    program
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn sample_program() -> Vec<EditorCommand> {
        vec![
            EditorCommand::move_to("g1", 1000.0, 1000.0, 90.0, 400.0),
            EditorCommand::action("a1", ActionKind::TakeKapla { height_mm: 0.0 }),
            EditorCommand::move_to("g2", 1500.0, 1500.0, 0.0, 200.0),
        ]
    }

    #[test]
    fn test_cursor_starts_at_default_pose() {
        let config = StudioConfig::default();
        let parsed = parse(&sample_program(), ParseMode::Preview, &config);
        let first = &parsed.preview[0].curve;
        assert_eq!(first.p0.x, 250.0);
        assert_eq!(first.p0.y, 1000.0);
        // Default heading is 0 degrees: p1 projects along +x.
        assert_relative_eq!(first.p1.x, 650.0, epsilon = 1e-9);
    }

    #[test]
    fn test_actions_do_not_move_cursor() {
        let config = StudioConfig::default();
        let parsed = parse(&sample_program(), ParseMode::Preview, &config);
        assert_eq!(parsed.preview.len(), 2);
        assert_eq!(parsed.queue.len(), 3);
        let second = &parsed.preview[1].curve;
        assert_eq!(second.p0.x, 1000.0);
        assert_eq!(second.p0.y, 1000.0);
        // Starts with the previous target heading (90 degrees).
        assert_relative_eq!(second.p1.x, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(second.p1.y, 1200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_preview_never_resets_live_pose() {
        let config = StudioConfig::default();
        let program = vec![
            EditorCommand::start_pose("s", 100.0, 200.0, 90.0),
            EditorCommand::move_to("g", 500.0, 200.0, 0.0, 100.0),
        ];
        let preview = parse(&program, ParseMode::Preview, &config);
        assert!(preview.live_reset.is_none());
        assert_eq!(preview.preview[0].curve.p0.x, 100.0);

        let execute = parse(&program, ParseMode::Execute, &config);
        assert_eq!(execute.live_reset, Some(Pose::new(100.0, 200.0, 90.0)));
        assert_eq!(execute.preview, preview.preview);
    }

    #[test]
    fn test_last_start_block_wins() {
        let config = StudioConfig::default();
        let program = vec![
            EditorCommand::start_pose("s1", 100.0, 200.0, 90.0),
            EditorCommand::start_pose("s2", 300.0, 400.0, 180.0),
        ];
        let parsed = parse(&program, ParseMode::Execute, &config);
        assert_eq!(parsed.live_reset, Some(Pose::new(300.0, 400.0, 180.0)));
        assert!(parsed.queue.is_empty());
    }

    #[test]
    fn test_unsupported_commands_skipped() {
        let config = StudioConfig::default();
        let program = vec![
            EditorCommand::new("u", StrategyCommand::Unsupported),
            EditorCommand::action("a", ActionKind::Stop),
        ];
        let parsed = parse(&program, ParseMode::Execute, &config);
        assert_eq!(parsed.queue.len(), 1);
        assert_eq!(parsed.queue[0].source_id().as_str(), "a");
    }

    #[test]
    fn test_action_duration_from_config() {
        let config = StudioConfig {
            action_duration_secs: 2.5,
            ..Default::default()
        };
        let parsed = parse(
            &[EditorCommand::action("a", ActionKind::FlipKapla)],
            ParseMode::Execute,
            &config,
        );
        assert!(matches!(
            parsed.queue[0],
            QueueEntry::Action { duration_secs, .. } if duration_secs == 2.5
        ));
    }

    #[test]
    fn test_yellow_team_mirrors_geometry() {
        let config = StudioConfig {
            team: Team::Yellow,
            ..Default::default()
        };
        let program = vec![EditorCommand::move_to("g", 1000.0, 1000.0, 0.0, 0.0)];
        let parsed = parse(&program, ParseMode::Execute, &config);
        let curve = &parsed.preview[0].curve;
        // Default start (250, 1000) mirrors to (2750, 1000).
        assert_eq!(curve.p0.x, 2750.0);
        assert_eq!(curve.p3.x, 2000.0);
        match &parsed.queue[0] {
            QueueEntry::Move { target, .. } => assert_relative_eq!(target.theta, 180.0),
            other => panic!("expected move, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_moves_skipped() {
        let config = StudioConfig::default();
        let program = vec![
            EditorCommand::move_to("back", 1000.0, 1000.0, 0.0, -500.0),
            EditorCommand::move_to("nan", f64::NAN, 1000.0, 0.0, 100.0),
            EditorCommand::start_pose("inf", f64::INFINITY, 0.0, 0.0),
            EditorCommand::move_to("ok", 800.0, 1000.0, 0.0, 100.0),
        ];
        let parsed = parse(&program, ParseMode::Execute, &config);

        assert_eq!(parsed.queue.len(), 1);
        assert_eq!(parsed.queue[0].source_id().as_str(), "ok");
        assert_eq!(parsed.live_reset, None);
        // The cursor never moved, so the surviving curve starts at the default pose.
        assert_eq!(parsed.preview[0].curve.p0.x, 250.0);
        assert_eq!(parsed.preview[0].curve.p1.x, 350.0);
    }
}

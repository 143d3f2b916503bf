#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::commands::{ActionKind, ControlCommand, EditorCommand, StrategyCommand};
    use crate::config::StudioConfig;
    use crate::enums::*;
    use crate::error::{CommandError, ConfigError};
    use crate::events::{EditorFeedback, PlaybackEvent};
    use crate::state::PlaybackSnapshot;
    use crate::types::{secs_to_ticks, Pose, SimTime, SourceId};

    /// Typed commands survive the trip through the frontend's JSON.
    #[test]
    fn test_editor_command_serde() {
        let program = vec![
            EditorCommand::start_pose("s", 100.0, 200.0, 90.0),
            EditorCommand::move_to("g", 1000.0, 500.0, 0.0, 300.0),
            EditorCommand::action("a", ActionKind::TakeKapla { height_mm: 40.0 }),
            EditorCommand::action(
                "n",
                ActionKind::Named {
                    label: "Raise flag".into(),
                },
            ),
        ];
        let json = serde_json::to_string(&program).unwrap();
        let back: Vec<EditorCommand> = serde_json::from_str(&json).unwrap();
        assert_eq!(program, back);
    }

    #[test]
    fn test_unknown_command_type_deserializes_as_unsupported() {
        let json = r#"{ "source_id": "z", "command": { "type": "Teleport" } }"#;
        let cmd: EditorCommand = serde_json::from_str(json).unwrap();
        assert_eq!(cmd.command, StrategyCommand::Unsupported);
        assert_eq!(cmd.source_id, SourceId::new("z"));
    }

    #[test]
    fn test_control_command_tagging() {
        let cmd = ControlCommand::SetTeam { team: Team::Yellow };
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"{"type":"SetTeam","team":"Yellow"}"#);

        let back: ControlCommand = serde_json::from_str(r#"{"type":"Pause"}"#).unwrap();
        assert!(matches!(back, ControlCommand::Pause));
    }

    #[test]
    fn test_feedback_serde() {
        let feedback = vec![
            EditorFeedback::ClearWarnings,
            EditorFeedback::Highlight { source_id: None },
            EditorFeedback::MarkError {
                source_id: "b7".into(),
                message: "Out of arena!".into(),
            },
        ];
        let json = serde_json::to_string(&feedback).unwrap();
        let back: Vec<EditorFeedback> = serde_json::from_str(&json).unwrap();
        assert_eq!(feedback, back);
    }

    #[test]
    fn test_event_serde() {
        let event = PlaybackEvent::PhaseEntered {
            phase: PlaybackPhase::Pausing,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"PhaseEntered","phase":"Pausing"}"#);
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = PlaybackSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: PlaybackSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, PlaybackPhase::Idle);
        assert!(back.active_source_id.is_none());
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    #[test]
    fn test_action_labels_and_icons() {
        assert_eq!(ActionKind::Stop.label(), "STOP");
        assert_eq!(ActionKind::Stop.icon(), "🛑");
        assert_eq!(ActionKind::FlipKapla.icon(), "🤌");
        let named = ActionKind::Named {
            label: "Funny action".into(),
        };
        assert_eq!(named.label(), "Funny action");
        assert_eq!(named.icon(), "⚙️");
    }

    #[test]
    fn test_pose_mirroring() {
        let blue = Pose::new(250.0, 1000.0, 0.0);
        let yellow = blue.mirrored(3000.0);
        assert_relative_eq!(yellow.x, 2750.0);
        assert_relative_eq!(yellow.y, 1000.0);
        assert_relative_eq!(yellow.theta, 180.0);

        let back = yellow.mirrored(3000.0);
        assert_relative_eq!(back.x, blue.x);
        assert_relative_eq!(back.theta, blue.theta);

        let up = Pose::new(0.0, 0.0, 90.0).mirrored(3000.0);
        assert_relative_eq!(up.theta, 90.0);
    }

    #[test]
    fn test_display_theta_wraps() {
        assert_relative_eq!(Pose::new(0.0, 0.0, -90.0).display_theta(), 270.0);
        assert_relative_eq!(Pose::new(0.0, 0.0, 725.0).display_theta(), 5.0);
    }

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(1.0, 60), 60);
        assert_eq!(secs_to_ticks(0.01, 60), 1);
        assert_eq!(secs_to_ticks(0.0, 60), 0);
        assert_eq!(secs_to_ticks(1.01, 60), 61);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance(1.0 / 60.0);
        }
        assert_eq!(time.tick, 60);
        assert_relative_eq!(time.elapsed_secs, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_config_defaults() {
        let config = StudioConfig::default();
        assert_eq!(config.arena.width_mm, 3000.0);
        assert_eq!(config.arena.height_mm, 2000.0);
        assert_eq!(config.default_start, Pose::new(250.0, 1000.0, 0.0));
        assert_eq!(config.action_duration_secs, 1.0);
        assert_eq!(config.progress_per_tick, 0.015);
        assert_eq!(config.heading_mode, HeadingMode::FiniteDifference);
        assert_eq!(config.team, Team::Blue);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_partial_override() {
        let config =
            StudioConfig::from_json_str(r#"{ "team": "Yellow", "progress_per_tick": 0.05 }"#)
                .unwrap();
        assert_eq!(config.team, Team::Yellow);
        assert_eq!(config.progress_per_tick, 0.05);
        assert_eq!(config.tick_rate, 60);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let err = StudioConfig::from_json_str(r#"{ "progress_per_tick": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "progress_per_tick",
                ..
            }
        ));

        let err =
            StudioConfig::from_json_str(r#"{ "arena": { "width_mm": -1.0, "height_mm": 2000.0 } }"#)
                .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "arena.width_mm",
                ..
            }
        ));

        assert!(matches!(
            StudioConfig::from_json_str("{ not json").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn test_command_error_source_id() {
        let err = CommandError::NegativeForce {
            source_id: "g7".into(),
            force: -5.0,
        };
        assert_eq!(err.source_id(), Some("g7"));
        assert!(err.to_string().contains("force must be >= 0"));

        let err = CommandError::InvalidBlock {
            index: 2,
            reason: "not an object".into(),
        };
        assert_eq!(err.source_id(), None);
    }
}

//! Editor feedback adapter.
//!
//! The engine describes what the block editor should show as
//! [`EditorFeedback`] values. A host forwards them to its editor through an
//! [`EditorHooks`] implementation.

use stratview_core::constants::OUT_OF_BOUNDS_MESSAGE;
use stratview_core::curve::CurveSegment;
use stratview_core::events::EditorFeedback;
use stratview_core::state::{PreviewCurveView, PreviewView};
use stratview_core::types::{Arena, SourceId};

use crate::bounds::curve_violates_bounds;

/// Imperative hooks exposed by the block editor.
pub trait EditorHooks {
    fn highlight(&mut self, source_id: Option<&SourceId>);
    fn mark_error(&mut self, source_id: &SourceId, message: &str);
    fn clear_all_warnings(&mut self);
}

/// Forward feedback to the editor in order.
pub fn apply_feedback(feedback: &[EditorFeedback], hooks: &mut dyn EditorHooks) {
    for item in feedback {
        match item {
            EditorFeedback::Highlight { source_id } => hooks.highlight(source_id.as_ref()),
            EditorFeedback::MarkError { source_id, message } => {
                hooks.mark_error(source_id, message)
            }
            EditorFeedback::ClearWarnings => hooks.clear_all_warnings(),
        }
    }
}

/// Preview curves with their bounds verdicts, plus the warnings to raise.
#[derive(Debug, Clone, Default)]
pub struct BoundsReport {
    pub preview: PreviewView,
    pub feedback: Vec<EditorFeedback>,
}

/// Flag every preview curve that leaves the arena. Advisory only.
pub fn check_preview(curves: Vec<CurveSegment>, arena: &Arena) -> BoundsReport {
    let mut report = BoundsReport::default();

    for segment in curves {
        let out_of_bounds = curve_violates_bounds(&segment.curve, arena);
        if out_of_bounds {
            report.preview.violation_count += 1;
            report.feedback.push(EditorFeedback::MarkError {
                source_id: segment.source_id.clone(),
                message: OUT_OF_BOUNDS_MESSAGE.to_string(),
            });
        }
        report.preview.curves.push(PreviewCurveView {
            segment,
            out_of_bounds,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use stratview_core::curve::CubicCurve;
    use stratview_core::types::Pose;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl EditorHooks for Recorder {
        fn highlight(&mut self, source_id: Option<&SourceId>) {
            self.calls.push(format!(
                "highlight:{}",
                source_id.map(SourceId::as_str).unwrap_or("-")
            ));
        }

        fn mark_error(&mut self, source_id: &SourceId, message: &str) {
            self.calls.push(format!("error:{source_id}:{message}"));
        }

        fn clear_all_warnings(&mut self) {
            self.calls.push("clear".into());
        }
    }

    fn segment(id: &str, from: Pose, to: Pose) -> CurveSegment {
        CurveSegment::new(CubicCurve::from_poses(&from, &to, 300.0), id.into())
    }

    #[test]
    fn test_check_preview_flags_only_violations() {
        let arena = Arena::new(3000.0, 2000.0);
        let curves = vec![
            segment("ok", Pose::new(250.0, 1000.0, 0.0), Pose::new(1000.0, 500.0, 0.0)),
            segment("bad", Pose::new(1000.0, 500.0, 0.0), Pose::new(3500.0, 500.0, 0.0)),
        ];
        let report = check_preview(curves, &arena);
        assert_eq!(report.preview.violation_count, 1);
        assert!(!report.preview.curves[0].out_of_bounds);
        assert!(report.preview.curves[1].out_of_bounds);
        assert_eq!(
            report.feedback,
            vec![EditorFeedback::MarkError {
                source_id: "bad".into(),
                message: OUT_OF_BOUNDS_MESSAGE.into(),
            }]
        );
    }

    #[test]
    fn test_apply_feedback_forwards_in_order() {
        let feedback = vec![
            EditorFeedback::ClearWarnings,
            EditorFeedback::Highlight {
                source_id: Some("b1".into()),
            },
            EditorFeedback::MarkError {
                source_id: "b2".into(),
                message: "Out of arena!".into(),
            },
            EditorFeedback::Highlight { source_id: None },
        ];
        let mut recorder = Recorder::default();
        apply_feedback(&feedback, &mut recorder);
        assert_eq!(
            recorder.calls,
            vec![
                "clear",
                "highlight:b1",
                "error:b2:Out of arena!",
                "highlight:-"
            ]
        );
    }
}

//! Editor block payloads to typed programs.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use stratview_core::blocks::decode_blocks;
use stratview_core::commands::EditorCommand;
use stratview_core::events::EditorFeedback;
use stratview_core::types::SourceId;

/// Decoded program plus editor markers for the blocks that were rejected.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditorProgram {
    pub commands: Vec<EditorCommand>,
    pub feedback: Vec<EditorFeedback>,
    /// Blocks that could not be decoded, with or without an id.
    pub rejected: usize,
}

/// Decode raw editor blocks. Rejected blocks are logged and, when they carry
/// an id, marked in the editor; the rest of the program is kept.
pub fn decode_program(blocks: &[Value]) -> EditorProgram {
    let decoded = decode_blocks(blocks);

    let mut feedback = Vec::new();
    for err in &decoded.errors {
        warn!(error = %err, "skipping editor block");
        if let Some(id) = err.source_id() {
            feedback.push(EditorFeedback::MarkError {
                source_id: SourceId::new(id),
                message: err.to_string(),
            });
        }
    }

    EditorProgram {
        commands: decoded.commands,
        feedback,
        rejected: decoded.errors.len(),
    }
}

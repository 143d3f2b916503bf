//! Decoding of raw editor blocks into strategy commands.
//!
//! The block editor sends its program as a JSON array in top-to-bottom order:
//!
//! ```json
//! [{ "id": "a1", "type": "robot_goto",
//!    "fields": { "X": "1000", "Y": 1000, "THETA": 0, "FORCE": 400 } }]
//! ```
//!
//! Field values may be numbers or numeric strings; they are truncated to
//! whole millimetres / degrees. A bad block is reported and skipped, the
//! rest of the program is still decoded.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::commands::{ActionKind, EditorCommand, StrategyCommand};
use crate::constants::DEFAULT_FORCE;
use crate::error::CommandError;

pub const BLOCK_START: &str = "robot_start";
pub const BLOCK_GOTO: &str = "robot_goto";
pub const BLOCK_TAKE_KAPLA: &str = "prendre_kapla";
pub const BLOCK_FLIP_KAPLA: &str = "retourner_kapla";
pub const BLOCK_PLACE_KAPLA: &str = "poser_kapla";
pub const BLOCK_STOP: &str = "robot_stop";

/// Label for unrecognised kapla / stop block variants.
pub const GENERIC_ACTION_LABEL: &str = "Action";

/// A block as delivered by the editor.
#[derive(Debug, Clone, Deserialize)]
pub struct EditorBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Result of decoding a whole program.
#[derive(Debug, Clone, Default)]
pub struct DecodedProgram {
    pub commands: Vec<EditorCommand>,
    pub errors: Vec<CommandError>,
}

/// Decode every block, keeping editor order. Unknown block types are dropped
/// without error.
pub fn decode_blocks(blocks: &[Value]) -> DecodedProgram {
    let mut program = DecodedProgram::default();

    for (index, raw) in blocks.iter().enumerate() {
        let block = match EditorBlock::deserialize(raw) {
            Ok(block) => block,
            Err(e) => {
                program.errors.push(CommandError::InvalidBlock {
                    index,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match decode_block(&block) {
            Ok(Some(command)) => program.commands.push(command),
            Ok(None) => {}
            Err(e) => program.errors.push(e),
        }
    }

    program
}

/// Decode one block. `Ok(None)` for block types that carry no strategy step.
pub fn decode_block(block: &EditorBlock) -> Result<Option<EditorCommand>, CommandError> {
    let command = match block.block_type.as_str() {
        BLOCK_START => StrategyCommand::StartPose {
            x: block.number("X")?,
            y: block.number("Y")?,
            theta: block.number("THETA")?,
        },
        BLOCK_GOTO => {
            let force = block.number_or("FORCE", DEFAULT_FORCE)?;
            if force < 0.0 {
                return Err(CommandError::NegativeForce {
                    source_id: block.id.clone(),
                    force,
                });
            }
            StrategyCommand::MoveTo {
                x: block.number("X")?,
                y: block.number("Y")?,
                theta: block.number("THETA")?,
                force,
            }
        }
        BLOCK_TAKE_KAPLA => StrategyCommand::TimedAction {
            action: ActionKind::TakeKapla {
                height_mm: block.number_or("HAUTEUR", 0.0)?,
            },
        },
        BLOCK_FLIP_KAPLA => StrategyCommand::TimedAction {
            action: ActionKind::FlipKapla,
        },
        BLOCK_PLACE_KAPLA => StrategyCommand::TimedAction {
            action: ActionKind::PlaceKapla {
                height_mm: block.number_or("HAUTEUR", 0.0)?,
            },
        },
        BLOCK_STOP => StrategyCommand::TimedAction {
            action: ActionKind::Stop,
        },
        // Variants of the manipulator blocks this decoder does not know yet.
        other if other.contains("kapla") || other.contains("stop") => {
            StrategyCommand::TimedAction {
                action: ActionKind::Named {
                    label: GENERIC_ACTION_LABEL.to_string(),
                },
            }
        }
        _ => return Ok(None),
    };

    Ok(Some(EditorCommand::new(block.id.clone(), command)))
}

impl EditorBlock {
    fn number(&self, field: &str) -> Result<f64, CommandError> {
        match self.fields.get(field) {
            Some(value) => self.parse_number(field, value),
            None => Err(CommandError::MissingField {
                source_id: self.id.clone(),
                field: field.to_string(),
            }),
        }
    }

    fn number_or(&self, field: &str, default: f64) -> Result<f64, CommandError> {
        match self.fields.get(field) {
            Some(value) => self.parse_number(field, value),
            None => Ok(default),
        }
    }

    fn parse_number(&self, field: &str, value: &Value) -> Result<f64, CommandError> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(n) if n.is_finite() => Ok(n.trunc()),
            _ => Err(CommandError::NotANumber {
                source_id: self.id.clone(),
                field: field.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

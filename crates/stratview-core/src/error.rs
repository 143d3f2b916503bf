//! Error types.
//!
//! None of these abort a parse or a run: a malformed block is skipped and
//! reported, an invalid configuration falls back to defaults at the caller.

use thiserror::Error;

/// A single editor block that could not be turned into a command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// The payload at `index` is not a block object.
    #[error("block #{index} is malformed: {reason}")]
    InvalidBlock { index: usize, reason: String },

    /// A required field is absent.
    #[error("block {source_id}: missing field {field}")]
    MissingField { source_id: String, field: String },

    /// A field is present but does not hold a finite number.
    #[error("block {source_id}: field {field} is not a number ({value})")]
    NotANumber {
        source_id: String,
        field: String,
        value: String,
    },

    /// Control-point distance below zero.
    #[error("block {source_id}: force must be >= 0, got {force}")]
    NegativeForce { source_id: String, force: f64 },
}

impl CommandError {
    /// Editor id of the offending block, when the block had one.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            CommandError::InvalidBlock { .. } => None,
            CommandError::MissingField { source_id, .. }
            | CommandError::NotANumber { source_id, .. }
            | CommandError::NegativeForce { source_id, .. } => Some(source_id),
        }
    }
}

/// Configuration could not be loaded or is out of range.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

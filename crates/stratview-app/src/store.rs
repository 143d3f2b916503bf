//! Strategy files on disk.
//!
//! One pretty-printed JSON file per strategy, `<name>.json`, inside the store
//! directory. A strategy is just its name and the typed command list, which
//! is everything needed to preview or replay it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use stratview_core::commands::EditorCommand;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyFile {
    pub name: String,
    pub commands: Vec<EditorCommand>,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid strategy name {0:?}: use letters, digits, '-' or '_'")]
    InvalidName(String),

    #[error("strategy {0:?} not found")]
    NotFound(String),

    #[error("strategy store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed strategy file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Names double as file stems, so they are kept to a safe alphabet.
pub fn validate_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}

impl StrategyFile {
    pub fn new(name: impl Into<String>, commands: Vec<EditorCommand>) -> Self {
        Self {
            name: name.into(),
            commands,
        }
    }

    /// Read a strategy file from an arbitrary path.
    pub fn read(path: &Path) -> Result<Self, StoreError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Directory-backed strategy store.
#[derive(Debug, Clone)]
pub struct StrategyStore {
    dir: PathBuf,
}

impl StrategyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Names of every stored strategy, sorted. A missing directory is empty.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if validate_name(stem).is_ok() {
                        names.push(stem.to_string());
                    } else {
                        warn!(path = %path.display(), "skipping strategy with invalid name");
                    }
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn load(&self, name: &str) -> Result<StrategyFile, StoreError> {
        validate_name(name)?;
        let path = self.path_for(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        StrategyFile::read(&path)
    }

    /// Write `file` under `name`, replacing any existing strategy.
    pub fn save(&self, name: &str, file: &StrategyFile) -> Result<(), StoreError> {
        validate_name(name)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(file)?;
        let path = self.path_for(name);
        fs::write(&path, json)?;
        debug!(path = %path.display(), commands = file.commands.len(), "strategy saved");
        Ok(())
    }
}

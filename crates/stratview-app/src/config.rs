//! Loading the studio configuration at startup.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use stratview_core::config::StudioConfig;

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "STRATVIEW_CONFIG";

/// Configuration from the file named by `STRATVIEW_CONFIG`, or defaults.
pub fn load_config() -> StudioConfig {
    load_config_from(std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from).as_deref())
}

/// Load and validate `path`. A missing path gives defaults; an unreadable or
/// invalid file is reported and also gives defaults.
pub fn load_config_from(path: Option<&Path>) -> StudioConfig {
    let Some(path) = path else {
        return StudioConfig::default();
    };

    match StudioConfig::load(path) {
        Ok(config) => {
            info!(path = %path.display(), "loaded studio config");
            config
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring studio config, using defaults");
            StudioConfig::default()
        }
    }
}

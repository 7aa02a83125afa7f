use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::CliError;

pub const DEFAULT_SETTINGS_FILE: &str = "rjg.toml";

/// Optional defaults read from a TOML file. Command-line flags win.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub count: Option<u64>,
    pub prefix: Option<String>,
    pub out: Option<PathBuf>,
    pub stdout: Option<bool>,
    pub pretty: Option<bool>,
    pub seed: Option<u64>,
}

/// Load settings from `explicit`, or from `rjg.toml` in the working
/// directory when it exists.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, CliError> {
    match explicit {
        Some(path) => read_settings(path),
        None => {
            let path = Path::new(DEFAULT_SETTINGS_FILE);
            if path.exists() {
                read_settings(path)
            } else {
                Ok(Settings::default())
            }
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings, CliError> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        CliError::InvalidConfig(format!("cannot read {}: {err}", path.display()))
    })?;
    let settings: Settings = toml::from_str(&content)?;
    tracing::debug!(event = "settings_loaded", path = %path.display());
    Ok(settings)
}

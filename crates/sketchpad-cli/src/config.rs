//! Configuration file loading for the CLI.
//!
//! Search order: the explicit `--config` path, then `sketchpad.toml` in the
//! working directory, then `<config dir>/sketchpad/config.toml`. Without any
//! file the defaults apply.

use crate::error::CliError;
use serde::Deserialize;
use sketchpad_core::EngineConfig;
use std::fs;
use std::path::{Path, PathBuf};

const LOCAL_CONFIG: &str = "sketchpad.toml";

/// Contents of a CLI config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Sketch folder. Falls back to the platform data directory.
    pub sketch_dir: Option<PathBuf>,
    /// Engine settings used when loading sketches.
    pub engine: EngineConfig,
}

/// Find and load the configuration.
pub fn load_config(explicit_path: Option<&Path>) -> Result<CliConfig, CliError> {
    if let Some(path) = explicit_path {
        log::info!("Loading configuration from {}", path.display());
        return load_config_file(path);
    }

    let local = Path::new(LOCAL_CONFIG);
    if local.exists() {
        log::info!("Loading configuration from {}", local.display());
        return load_config_file(local);
    }

    if let Some(dir) = dirs::config_dir() {
        let system = dir.join("sketchpad").join("config.toml");
        if system.exists() {
            log::info!("Loading configuration from {}", system.display());
            return load_config_file(&system);
        }
        log::debug!("No configuration at {}", system.display());
    }

    log::debug!("No configuration file found, using defaults");
    Ok(CliConfig::default())
}

fn load_config_file(path: &Path) -> Result<CliConfig, CliError> {
    if !path.exists() {
        return Err(CliError::MissingConfig(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|e| CliError::Io(e.to_string()))?;
    toml::from_str(&content).map_err(|e| CliError::ConfigParse(e.to_string()))
}

//! CLI errors.

use sketchpad_core::StorageError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing configuration file: {0}")]
    MissingConfig(PathBuf),
    #[error("Failed to parse TOML configuration: {0}")]
    ConfigParse(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("IO error: {0}")]
    Io(String),
}

//! Command-line argument definitions for the SketchPad CLI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Manage the sketches in a SketchPad folder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Sketch folder (overrides the config file and the default location)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Sketch folder operations.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an empty sketch
    New { name: String },
    /// List the sketches in the folder
    List,
    /// Show pages and object counts of a sketch
    Info { name: String },
    /// Rename a sketch
    Rename { old: String, new: String },
    /// Delete a sketch
    Delete { name: String },
}

//! CLI logic for the SketchPad sketch folder.

mod args;
mod config;
mod error;

pub use args::{Args, Command};
pub use config::{CliConfig, load_config};
pub use error::CliError;

use sketchpad_core::{Document, FileStorage, Storage, StorageError};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Run the CLI with parsed arguments, printing to stdout.
pub fn run(args: &Args) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;

    let dir = match args.dir.clone().or(config.sketch_dir.clone()) {
        Some(dir) => dir,
        None => FileStorage::default_path()?,
    };
    log::debug!("Using sketch folder {}", dir.display());
    let storage = FileStorage::new(dir)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&args.command, &storage, &config, &mut out)
}

/// Apply one command to a storage backend.
pub fn execute(
    command: &Command,
    storage: &dyn Storage,
    config: &CliConfig,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::New { name } => {
            if storage.exists(name)? {
                return Err(StorageError::AlreadyExists(name.clone()).into());
            }
            storage.save(name, &Document::with_history_limit(config.engine.history_limit))?;
            log::info!("Created sketch {}", name);
        }
        Command::List => {
            for name in storage.list()? {
                write_line(out, &name)?;
            }
        }
        Command::Info { name } => {
            let document = storage.load_with_history_limit(name, config.engine.history_limit)?;
            for line in describe(name, &document) {
                write_line(out, &line)?;
            }
        }
        Command::Rename { old, new } => {
            storage.rename(old, new)?;
            log::info!("Renamed sketch {} to {}", old, new);
        }
        Command::Delete { name } => {
            storage.delete(name)?;
            log::info!("Deleted sketch {}", name);
        }
    }
    Ok(())
}

/// Human-readable summary of a sketch.
fn describe(name: &str, document: &Document) -> Vec<String> {
    let mut lines = vec![format!("{}: {} page(s)", name, document.page_count())];
    for (index, page) in document.pages().iter().enumerate() {
        let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
        for shape in page.objects() {
            *kinds.entry(shape.kind_name()).or_default() += 1;
        }
        let summary = if kinds.is_empty() {
            "empty".to_string()
        } else {
            kinds
                .iter()
                .map(|(kind, count)| format!("{} {}", count, kind))
                .collect::<Vec<_>>()
                .join(", ")
        };
        lines.push(format!("  page {}: {} object(s) ({})", index + 1, page.len(), summary));
    }
    lines.push(format!("  next object id: {}", document.next_object_id()));
    lines
}

fn write_line(out: &mut impl Write, line: &str) -> Result<(), CliError> {
    writeln!(out, "{}", line).map_err(|e| CliError::Io(e.to_string()))
}

//! File-based storage implementation.

use super::{Storage, StorageError, StorageResult};
use crate::codec;
use crate::document::Document;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of sketch files on disk.
pub const SKETCH_EXTENSION: &str = "sketch";

/// File-based storage.
///
/// Stores each sketch as a `<id>.sketch` JSON file in a single folder.
pub struct FileStorage {
    /// Folder holding the sketch files.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create sketch folder: {}", e))
            })?;
            log::info!("Created sketch folder {}", base_path.display());
        }
        Ok(Self { base_path })
    }

    /// Folder used when none is configured.
    ///
    /// On Linux: `~/.local/share/sketchpad/sketches/`
    /// On Windows: `%LOCALAPPDATA%\sketchpad\sketches\`
    pub fn default_path() -> StorageResult<PathBuf> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Ok(base.join("sketchpad").join("sketches"))
    }

    /// Get the file path for a sketch id.
    ///
    /// Ids are used as file names verbatim, so anything that is not a
    /// letter, digit, space, `-` or `_` is refused rather than rewritten.
    fn sketch_path(&self, id: &str) -> StorageResult<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == ' ');
        if !valid {
            return Err(StorageError::InvalidId(id.to_string()));
        }
        Ok(self.base_path.join(format!("{}.{}", id, SKETCH_EXTENSION)))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, id: &str, document: &Document) -> StorageResult<()> {
        let path = self.sketch_path(id)?;
        let bytes =
            codec::encode(document).map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&path, bytes)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
        log::debug!("Saved sketch {} to {}", id, path.display());
        Ok(())
    }

    fn load_with_history_limit(
        &self,
        id: &str,
        history_limit: Option<usize>,
    ) -> StorageResult<Document> {
        let path = self.sketch_path(id)?;
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        let bytes = fs::read(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let mut document = codec::decode_with_history_limit(&bytes, history_limit)?;
        document.id = id.to_string();
        Ok(document)
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let path = self.sketch_path(id)?;
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        fs::remove_file(&path)
            .map_err(|e| StorageError::Io(format!("Failed to delete {}: {}", path.display(), e)))
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

        let mut ids: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == SKETCH_EXTENSION))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        Ok(self.sketch_path(id)?.exists())
    }

    fn rename(&self, from: &str, to: &str) -> StorageResult<()> {
        let source = self.sketch_path(from)?;
        let target = self.sketch_path(to)?;
        if !source.exists() {
            return Err(StorageError::NotFound(from.to_string()));
        }
        if target.exists() {
            return Err(StorageError::AlreadyExists(to.to_string()));
        }
        fs::rename(&source, &target).map_err(|e| {
            StorageError::Io(format!(
                "Failed to rename {} to {}: {}",
                source.display(),
                target.display(),
                e
            ))
        })
    }
}

//! Storage abstraction for persistence.

mod file;
mod memory;

pub use file::{FileStorage, SKETCH_EXTENSION};
pub use memory::MemoryStorage;

use crate::codec::DeserializationError;
use crate::document::Document;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Sketch not found: {0}")]
    NotFound(String),
    #[error("Sketch already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid sketch name: {0:?}")]
    InvalidId(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error(transparent)]
    Deserialization(#[from] DeserializationError),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for sketch storage backends.
///
/// Backends persist the encoded form produced by [`crate::codec::encode`], so
/// a loaded document always starts with empty histories.
pub trait Storage: Send + Sync {
    /// Save a document under `id`, replacing any previous version.
    fn save(&self, id: &str, document: &Document) -> StorageResult<()>;

    /// Load a document whose pages keep at most `history_limit` undo entries.
    fn load_with_history_limit(
        &self,
        id: &str,
        history_limit: Option<usize>,
    ) -> StorageResult<Document>;

    /// Load a document with unbounded page histories.
    fn load(&self, id: &str) -> StorageResult<Document> {
        self.load_with_history_limit(id, None)
    }

    /// Delete a document. Fails with `NotFound` if it does not exist.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all document ids, sorted.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a document exists.
    fn exists(&self, id: &str) -> StorageResult<bool>;

    /// Move a document to a new id. The target must not exist yet.
    fn rename(&self, from: &str, to: &str) -> StorageResult<()>;
}

//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use crate::codec;
use crate::document::Document;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
///
/// Holds encoded bytes rather than live documents, so loads go through the
/// same validation as files on disk.
#[derive(Default)]
pub struct MemoryStorage {
    sketches: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes under `id`, bypassing the encoder.
    pub fn insert_raw(&self, id: &str, bytes: Vec<u8>) -> StorageResult<()> {
        self.write()?.insert(id.to_string(), bytes);
        Ok(())
    }

    fn read(&self) -> StorageResult<std::sync::RwLockReadGuard<'_, HashMap<String, Vec<u8>>>> {
        self.sketches
            .read()
            .map_err(|e| StorageError::Io(format!("Lock error: {}", e)))
    }

    fn write(&self) -> StorageResult<std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<u8>>>> {
        self.sketches
            .write()
            .map_err(|e| StorageError::Io(format!("Lock error: {}", e)))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, document: &Document) -> StorageResult<()> {
        let bytes =
            codec::encode(document).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.write()?.insert(id.to_string(), bytes);
        Ok(())
    }

    fn load_with_history_limit(
        &self,
        id: &str,
        history_limit: Option<usize>,
    ) -> StorageResult<Document> {
        let sketches = self.read()?;
        let bytes = sketches
            .get(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        let mut document = codec::decode_with_history_limit(bytes, history_limit)?;
        document.id = id.to_string();
        Ok(document)
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        self.write()?
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let mut ids: Vec<String> = self.read()?.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        Ok(self.read()?.contains_key(id))
    }

    fn rename(&self, from: &str, to: &str) -> StorageResult<()> {
        let mut sketches = self.write()?;
        if sketches.contains_key(to) {
            return Err(StorageError::AlreadyExists(to.to_string()));
        }
        let bytes = sketches
            .remove(from)
            .ok_or_else(|| StorageError::NotFound(from.to_string()))?;
        sketches.insert(to.to_string(), bytes);
        Ok(())
    }
}

//! Engine error taxonomy.

use crate::shapes::ObjectId;
use kurbo::Point;
use thiserror::Error;

/// Errors raised by the document store, history and tools.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Invalid geometry at ({}, {})", .0.x, .0.y)]
    InvalidGeometry(Point),
    #[error("Nothing to undo or redo")]
    HistoryUnderflow,
    #[error("Cannot delete the last remaining page")]
    PageDeletionRefused,
    #[error("Object {0} not found on the page")]
    ObjectNotFound(ObjectId),
    #[error("Page {index} out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },
    #[error("Object index {index} out of range (page has {count} objects)")]
    ObjectIndexOutOfRange { index: usize, count: usize },
    #[error("Object id {0} is already in use")]
    DuplicateObjectId(ObjectId),
    #[error("No object ids left in this document")]
    IdSpaceExhausted,
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

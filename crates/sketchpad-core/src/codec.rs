//! JSON persistence for sketch documents.
//!
//! The persisted form is `{"pages": [[object, ...], ...]}` where each object
//! carries its `type` tag and its drawing fields. Histories, the id allocator
//! and any in-flight gesture are runtime state and are never written.

use crate::document::Document;
use crate::shapes::{ObjectId, Shape};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Reasons a persisted document is rejected.
#[derive(Debug, Error)]
pub enum DeserializationError {
    /// Malformed JSON, unknown `type` tag, missing field or bad color.
    #[error("Malformed sketch data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Pencil stroke {0} has no points")]
    EmptyPencil(ObjectId),
    #[error("Object {0} has a non-finite coordinate")]
    NonFiniteCoordinate(ObjectId),
    #[error("Object {0} has a zero stroke width")]
    ZeroStrokeWidth(ObjectId),
    #[error("Object id {0} appears more than once")]
    DuplicateObjectId(ObjectId),
    #[error("Object id {0} is reserved")]
    ReservedObjectId(ObjectId),
    #[error("Text {0} has no content")]
    EmptyText(ObjectId),
}

#[derive(Serialize)]
struct PersistedRef<'a> {
    pages: Vec<&'a [Shape]>,
}

#[derive(Deserialize)]
struct Persisted {
    #[serde(default)]
    pages: Vec<Vec<Shape>>,
}

/// Serialize the committed objects of every page.
pub fn encode(document: &Document) -> Result<Vec<u8>, serde_json::Error> {
    let persisted = PersistedRef {
        pages: document.pages().iter().map(|page| page.objects()).collect(),
    };
    serde_json::to_vec_pretty(&persisted)
}

/// Rebuild a document, rejecting it as a whole on any structural error.
///
/// Pages get unbounded histories; see [`decode_with_history_limit`].
pub fn decode(bytes: &[u8]) -> Result<Document, DeserializationError> {
    decode_with_history_limit(bytes, None)
}

/// Like [`decode`], with a cap on each page's undo history.
pub fn decode_with_history_limit(
    bytes: &[u8],
    history_limit: Option<usize>,
) -> Result<Document, DeserializationError> {
    let persisted: Persisted = serde_json::from_slice(bytes)?;
    validate(&persisted.pages)?;
    Ok(Document::from_pages(persisted.pages, history_limit))
}

fn validate(pages: &[Vec<Shape>]) -> Result<(), DeserializationError> {
    let mut seen = HashSet::new();
    for shape in pages.iter().flatten() {
        let id = shape.id();
        if id == ObjectId::MAX {
            return Err(DeserializationError::ReservedObjectId(id));
        }
        if !seen.insert(id) {
            return Err(DeserializationError::DuplicateObjectId(id));
        }
        match shape {
            Shape::Pencil(pencil) if pencil.is_empty() => {
                return Err(DeserializationError::EmptyPencil(id));
            }
            Shape::Text(text) if text.content.trim().is_empty() => {
                return Err(DeserializationError::EmptyText(id));
            }
            _ => {}
        }
        if !shape.is_finite() {
            return Err(DeserializationError::NonFiniteCoordinate(id));
        }
        if shape.stroke_width() == Some(0) {
            return Err(DeserializationError::ZeroStrokeWidth(id));
        }
    }
    Ok(())
}

//! Per-page undo/redo history.
//!
//! History is a pair of stacks of structural [`Command`]s. Commands hold the
//! affected shape by value, so later edits to a live shape never reach an
//! entry that is already on a stack. Applying commands to the object list is
//! the page's job (see [`crate::page::Page::undo`]).

use crate::shapes::{ObjectId, Shape};
use std::collections::VecDeque;

/// A recorded, invertible mutation of a page's object list.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A shape was appended to the page.
    Add(Shape),
    /// A shape was removed from `index`.
    Delete { shape: Shape, index: usize },
}

impl Command {
    /// Id of the shape this command moves in or out of the page.
    pub fn object_id(&self) -> ObjectId {
        match self {
            Command::Add(shape) => shape.id(),
            Command::Delete { shape, .. } => shape.id(),
        }
    }
}

/// Linear undo/redo stacks for a single page.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Oldest entries at the front so eviction is cheap.
    undo_stack: VecDeque<Command>,
    redo_stack: Vec<Command>,
    /// Maximum number of undo entries (None = unbounded).
    limit: Option<usize>,
}

impl History {
    /// Create an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` undo entries.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record a new user action. Clears the redo stack.
    pub fn record(&mut self, command: Command) {
        self.redo_stack.clear();
        self.push_undo(command);
    }

    /// Push onto the undo stack without touching redo (used by redo).
    pub(crate) fn push_undo(&mut self, command: Command) {
        self.undo_stack.push_back(command);
        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                if let Some(evicted) = self.undo_stack.pop_front() {
                    log::debug!("History full, evicting oldest entry for object {}", evicted.object_id());
                }
            }
        }
    }

    pub(crate) fn pop_undo(&mut self) -> Option<Command> {
        self.undo_stack.pop_back()
    }

    pub(crate) fn push_redo(&mut self, command: Command) {
        self.redo_stack.push(command);
    }

    pub(crate) fn pop_redo(&mut self) -> Option<Command> {
        self.redo_stack.pop()
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo entries, oldest first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &Command> {
        self.undo_stack.iter()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

//! A single page: an ordered object list plus its own history.

use crate::error::{EngineError, EngineResult};
use crate::history::{Command, History};
use crate::shapes::{ObjectId, Shape};
use kurbo::Point;
use std::collections::HashMap;

/// One page of a sketch.
///
/// Object order is z-order: later entries are drawn on top and win hit tests.
#[derive(Debug, Clone, Default)]
pub struct Page {
    objects: Vec<Shape>,
    /// Current position of every object, kept in step with `objects`.
    positions: HashMap<ObjectId, usize>,
    history: History,
}

impl Page {
    /// Create an empty page with unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty page whose history keeps at most `limit` entries.
    pub fn with_history_limit(limit: Option<usize>) -> Self {
        Self {
            history: History::with_limit(limit),
            ..Self::default()
        }
    }

    /// Build a page from already-validated objects with a fresh history.
    pub(crate) fn from_objects(objects: Vec<Shape>, limit: Option<usize>) -> Self {
        let mut page = Self::with_history_limit(limit);
        page.objects = objects;
        page.reindex_from(0);
        page
    }

    /// Objects in z-order (back to front).
    pub fn objects(&self) -> &[Shape] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.objects.get(index)
    }

    /// Current list position of an object.
    pub fn position_of(&self, id: ObjectId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Index of the topmost object hit by `point`, if any.
    pub fn topmost_hit(&self, point: Point, tolerance: f64) -> Option<usize> {
        self.objects
            .iter()
            .rposition(|shape| shape.hit_test(point, tolerance))
    }

    /// Append a shape and record an `Add` command.
    pub(crate) fn add(&mut self, shape: Shape) {
        self.append(shape.clone());
        self.history.record(Command::Add(shape));
    }

    /// Remove the shape at `index` and record a `Delete` command.
    pub(crate) fn delete_at(&mut self, index: usize) -> EngineResult<Shape> {
        if index >= self.objects.len() {
            return Err(EngineError::ObjectIndexOutOfRange {
                index,
                count: self.objects.len(),
            });
        }
        let shape = self.remove_at(index);
        self.history.record(Command::Delete {
            shape: shape.clone(),
            index,
        });
        Ok(shape)
    }

    /// Revert the most recent command.
    ///
    /// A command whose object cannot be found is dropped rather than moved to
    /// the redo stack, so it is never replayed.
    pub(crate) fn undo(&mut self) -> EngineResult<()> {
        let command = self.history.pop_undo().ok_or(EngineError::HistoryUnderflow)?;
        match command {
            Command::Add(shape) => {
                let id = shape.id();
                if self.remove_by_id(id).is_none() {
                    return Err(EngineError::ObjectNotFound(id));
                }
                self.history.push_redo(Command::Add(shape));
            }
            Command::Delete { shape, index } => {
                let id = shape.id();
                if self.contains(id) {
                    return Err(EngineError::DuplicateObjectId(id));
                }
                let index = self.insert_at(index, shape.clone());
                self.history.push_redo(Command::Delete { shape, index });
            }
        }
        Ok(())
    }

    /// Re-apply the most recently undone command.
    ///
    /// A redone `Add` always appends, whatever position the shape had before.
    pub(crate) fn redo(&mut self) -> EngineResult<()> {
        let command = self.history.pop_redo().ok_or(EngineError::HistoryUnderflow)?;
        match command {
            Command::Add(shape) => {
                let id = shape.id();
                if self.contains(id) {
                    return Err(EngineError::DuplicateObjectId(id));
                }
                self.append(shape.clone());
                self.history.push_undo(Command::Add(shape));
            }
            Command::Delete { shape, .. } => {
                let id = shape.id();
                let (index, _) = self
                    .remove_by_id(id)
                    .ok_or(EngineError::ObjectNotFound(id))?;
                self.history.push_undo(Command::Delete { shape, index });
            }
        }
        Ok(())
    }

    fn append(&mut self, shape: Shape) {
        self.positions.insert(shape.id(), self.objects.len());
        self.objects.push(shape);
    }

    /// Insert at `index`, clamped to the list length. Returns the actual index.
    fn insert_at(&mut self, index: usize, shape: Shape) -> usize {
        let index = index.min(self.objects.len());
        self.objects.insert(index, shape);
        self.reindex_from(index);
        index
    }

    fn remove_at(&mut self, index: usize) -> Shape {
        let shape = self.objects.remove(index);
        self.positions.remove(&shape.id());
        self.reindex_from(index);
        shape
    }

    fn remove_by_id(&mut self, id: ObjectId) -> Option<(usize, Shape)> {
        let index = self.position_of(id)?;
        Some((index, self.remove_at(index)))
    }

    fn reindex_from(&mut self, start: usize) {
        for (offset, shape) in self.objects[start..].iter().enumerate() {
            self.positions.insert(shape.id(), start + offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Rectangle, ShapeStyle};

    fn line(id: ObjectId, y: f64) -> Shape {
        Shape::Line(Line::new(
            id,
            Point::new(0.0, y),
            Point::new(100.0, y),
            &ShapeStyle::default(),
        ))
    }

    fn ids(page: &Page) -> Vec<ObjectId> {
        page.objects().iter().map(Shape::id).collect()
    }

    fn assert_index_consistent(page: &Page) {
        for (i, shape) in page.objects().iter().enumerate() {
            assert_eq!(page.position_of(shape.id()), Some(i));
        }
        assert_eq!(page.positions.len(), page.len());
    }

    #[test]
    fn test_add_records_command() {
        let mut page = Page::new();
        page.add(line(0, 0.0));
        assert_eq!(page.len(), 1);
        assert_eq!(page.history().undo_len(), 1);
        assert_index_consistent(&page);
    }

    #[test]
    fn test_delete_middle_then_undo_restores_order() {
        let mut page = Page::new();
        for id in 0..3 {
            page.add(line(id, id as f64 * 10.0));
        }

        let removed = page.delete_at(1).unwrap();
        assert_eq!(removed.id(), 1);
        assert_eq!(ids(&page), vec![0, 2]);
        assert_index_consistent(&page);

        page.undo().unwrap();
        assert_eq!(ids(&page), vec![0, 1, 2]);
        assert_index_consistent(&page);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut page = Page::new();
        page.add(line(0, 0.0));
        assert_eq!(
            page.delete_at(5),
            Err(EngineError::ObjectIndexOutOfRange { index: 5, count: 1 })
        );
        assert_eq!(page.history().undo_len(), 1);
    }

    #[test]
    fn test_redo_add_appends() {
        let mut page = Page::new();
        page.add(line(0, 0.0));
        page.add(line(1, 10.0));
        page.undo().unwrap();
        page.undo().unwrap();
        assert!(page.is_empty());

        page.redo().unwrap();
        page.redo().unwrap();
        assert_eq!(ids(&page), vec![0, 1]);
        assert!(!page.history().can_redo());
    }

    #[test]
    fn test_redo_delete_removes_again() {
        let mut page = Page::new();
        page.add(line(0, 0.0));
        page.add(line(1, 10.0));
        page.delete_at(0).unwrap();
        page.undo().unwrap();
        assert_eq!(ids(&page), vec![0, 1]);

        page.redo().unwrap();
        assert_eq!(ids(&page), vec![1]);
        assert_index_consistent(&page);
    }

    #[test]
    fn test_undo_delete_clamps_index() {
        let mut page = Page::new();
        page.add(line(0, 0.0));
        page.add(line(1, 10.0));
        page.delete_at(1).unwrap();
        // Remove the other shape behind history's back so the index is stale.
        page.remove_at(0);

        page.undo().unwrap();
        assert_eq!(ids(&page), vec![1]);
        assert_index_consistent(&page);
    }

    #[test]
    fn test_underflow() {
        let mut page = Page::new();
        assert_eq!(page.undo(), Err(EngineError::HistoryUnderflow));
        assert_eq!(page.redo(), Err(EngineError::HistoryUnderflow));
    }

    #[test]
    fn test_missing_object_drops_command() {
        let mut page = Page::new();
        page.add(line(0, 0.0));
        page.remove_at(0);

        assert_eq!(page.undo(), Err(EngineError::ObjectNotFound(0)));
        // The corrupt entry is gone from both stacks.
        assert!(!page.history().can_undo());
        assert!(!page.history().can_redo());
    }

    #[test]
    fn test_topmost_hit_prefers_last() {
        let mut page = Page::new();
        let style = ShapeStyle::default();
        page.add(Shape::Rectangle(Rectangle::new(0, Point::ZERO, Point::new(50.0, 50.0), &style)));
        page.add(Shape::Rectangle(Rectangle::new(1, Point::new(25.0, 25.0), Point::new(75.0, 75.0), &style)));

        assert_eq!(page.topmost_hit(Point::new(30.0, 30.0), 3.0), Some(1));
        assert_eq!(page.topmost_hit(Point::new(10.0, 10.0), 3.0), Some(0));
        assert_eq!(page.topmost_hit(Point::new(90.0, 90.0), 3.0), None);
    }
}

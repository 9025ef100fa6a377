//! The sketch document: ordered pages and the object id allocator.

use crate::error::{EngineError, EngineResult};
use crate::page::Page;
use crate::shapes::{ObjectId, Shape};
use uuid::Uuid;

/// A multi-page sketch.
///
/// A document always holds at least one page. Object ids come from a single
/// counter shared by every page and are never handed out twice.
#[derive(Debug, Clone)]
pub struct Document {
    /// Unique document identifier (storage key by default).
    pub id: String,
    pages: Vec<Page>,
    current_page: usize,
    next_object_id: ObjectId,
    history_limit: Option<usize>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with one blank page.
    pub fn new() -> Self {
        Self::with_history_limit(None)
    }

    /// Create a document whose pages keep at most `limit` undo entries.
    pub fn with_history_limit(limit: Option<usize>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            pages: vec![Page::with_history_limit(limit)],
            current_page: 0,
            next_object_id: 0,
            history_limit: limit,
        }
    }

    /// Rebuild a document from validated pages.
    ///
    /// The allocator restarts one past the largest id. Histories start empty.
    pub(crate) fn from_pages(pages: Vec<Vec<Shape>>, limit: Option<usize>) -> Self {
        let next_object_id = pages
            .iter()
            .flatten()
            .map(Shape::id)
            .max()
            .map_or(0, |max| max.saturating_add(1));
        let mut pages: Vec<Page> = pages
            .into_iter()
            .map(|objects| Page::from_objects(objects, limit))
            .collect();
        if pages.is_empty() {
            pages.push(Page::with_history_limit(limit));
        }
        Self {
            id: Uuid::new_v4().to_string(),
            pages,
            current_page: 0,
            next_object_id,
            history_limit: limit,
        }
    }

    /// Hand out the next object id.
    ///
    /// `ObjectId::MAX` is never handed out, so the counter can always sit one
    /// past the largest id in use.
    pub fn allocate_id(&mut self) -> EngineResult<ObjectId> {
        let next = self
            .next_object_id
            .checked_add(1)
            .ok_or(EngineError::IdSpaceExhausted)?;
        Ok(std::mem::replace(&mut self.next_object_id, next))
    }

    /// The id the allocator will return next.
    pub fn next_object_id(&self) -> ObjectId {
        self.next_object_id
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn current_page_index(&self) -> usize {
        self.current_page
    }

    pub fn current_page(&self) -> &Page {
        &self.pages[self.current_page]
    }

    /// Check whether any page holds an object with this id.
    pub fn contains_object(&self, id: ObjectId) -> bool {
        self.pages.iter().any(|page| page.contains(id))
    }

    /// Append a shape to a page and record it in that page's history.
    pub fn add_object(&mut self, page_index: usize, shape: Shape) -> EngineResult<()> {
        self.check_page(page_index)?;
        let id = shape.id();
        if self.contains_object(id) {
            return Err(EngineError::DuplicateObjectId(id));
        }
        self.pages[page_index].add(shape);
        log::debug!("Added object {} to page {}", id, page_index);
        Ok(())
    }

    /// Remove the shape at `list_index` of a page, recording a delete.
    pub fn delete_object_at(&mut self, page_index: usize, list_index: usize) -> EngineResult<Shape> {
        self.check_page(page_index)?;
        let shape = self.pages[page_index].delete_at(list_index)?;
        log::debug!(
            "Deleted object {} at index {} from page {}",
            shape.id(),
            list_index,
            page_index
        );
        Ok(shape)
    }

    /// Append a blank page and make it current. Returns its index.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Page::with_history_limit(self.history_limit));
        self.current_page = self.pages.len() - 1;
        log::info!("Added page {} of {}", self.current_page + 1, self.pages.len());
        self.current_page
    }

    /// Delete a page and its history. The last remaining page is never deleted.
    pub fn delete_page(&mut self, index: usize) -> EngineResult<()> {
        self.check_page(index)?;
        if self.pages.len() == 1 {
            log::warn!("Refusing to delete the only page");
            return Err(EngineError::PageDeletionRefused);
        }
        self.pages.remove(index);
        if index < self.current_page {
            self.current_page -= 1;
        }
        self.current_page = self.current_page.min(self.pages.len() - 1);
        log::info!("Deleted page {}, {} remaining", index + 1, self.pages.len());
        Ok(())
    }

    pub fn set_current_page(&mut self, index: usize) -> EngineResult<()> {
        self.check_page(index)?;
        self.current_page = index;
        Ok(())
    }

    /// Move to the next page. Returns false on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.current_page + 1 < self.pages.len() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous page. Returns false on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 0 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Undo the last command on the current page.
    pub fn undo(&mut self) -> EngineResult<()> {
        self.pages[self.current_page].undo()
    }

    /// Redo the last undone command on the current page.
    pub fn redo(&mut self) -> EngineResult<()> {
        self.pages[self.current_page].redo()
    }

    /// Total number of objects across all pages.
    pub fn object_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    fn check_page(&self, index: usize) -> EngineResult<()> {
        if index < self.pages.len() {
            Ok(())
        } else {
            Err(EngineError::PageOutOfRange {
                index,
                count: self.pages.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, ShapeStyle};
    use kurbo::Point;

    fn line(doc: &mut Document) -> Shape {
        let id = doc.allocate_id().unwrap();
        Shape::Line(Line::new(id, Point::ZERO, Point::new(10.0, 10.0), &ShapeStyle::default()))
    }

    #[test]
    fn test_new_document_has_one_page() {
        let doc = Document::new();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.current_page_index(), 0);
        assert!(doc.current_page().is_empty());
        assert_eq!(doc.next_object_id(), 0);
    }

    #[test]
    fn test_allocate_id_is_monotonic() {
        let mut doc = Document::new();
        assert_eq!(doc.allocate_id(), Ok(0));
        assert_eq!(doc.allocate_id(), Ok(1));
        assert_eq!(doc.next_object_id(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut doc = Document::new();
        let shape = line(&mut doc);
        doc.add_object(0, shape).unwrap();
        doc.delete_object_at(0, 0).unwrap();
        let next = line(&mut doc);
        assert_eq!(next.id(), 1);
    }

    #[test]
    fn test_add_object_rejects_duplicate_across_pages() {
        let mut doc = Document::new();
        let shape = line(&mut doc);
        doc.add_object(0, shape.clone()).unwrap();
        doc.add_page();
        assert_eq!(doc.add_object(1, shape), Err(EngineError::DuplicateObjectId(0)));
        assert!(doc.page(1).is_some_and(Page::is_empty));
    }

    #[test]
    fn test_add_object_bad_page() {
        let mut doc = Document::new();
        let shape = line(&mut doc);
        assert_eq!(
            doc.add_object(3, shape),
            Err(EngineError::PageOutOfRange { index: 3, count: 1 })
        );
    }

    #[test]
    fn test_delete_last_page_refused() {
        let mut doc = Document::new();
        let shape = line(&mut doc);
        doc.add_object(0, shape).unwrap();

        assert_eq!(doc.delete_page(0), Err(EngineError::PageDeletionRefused));
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.current_page().len(), 1);
        assert_eq!(doc.current_page().history().undo_len(), 1);
    }

    #[test]
    fn test_add_page_switches_to_it() {
        let mut doc = Document::new();
        assert_eq!(doc.add_page(), 1);
        assert_eq!(doc.current_page_index(), 1);
    }

    #[test]
    fn test_delete_page_keeps_current_page_when_earlier_removed() {
        let mut doc = Document::new();
        doc.add_page();
        doc.add_page();
        let shape = line(&mut doc);
        doc.add_object(2, shape).unwrap();

        doc.delete_page(0).unwrap();
        assert_eq!(doc.current_page_index(), 1);
        assert_eq!(doc.current_page().len(), 1);
    }

    #[test]
    fn test_delete_current_last_page_clamps() {
        let mut doc = Document::new();
        doc.add_page();
        doc.delete_page(1).unwrap();
        assert_eq!(doc.current_page_index(), 0);
    }

    #[test]
    fn test_page_navigation() {
        let mut doc = Document::new();
        doc.add_page();
        assert!(!doc.next_page());
        assert!(doc.prev_page());
        assert!(!doc.prev_page());
        assert!(doc.set_current_page(1).is_ok());
        assert!(doc.set_current_page(2).is_err());
    }

    #[test]
    fn test_histories_are_per_page() {
        let mut doc = Document::new();
        let first = line(&mut doc);
        doc.add_object(0, first).unwrap();
        doc.add_page();

        assert_eq!(doc.undo(), Err(EngineError::HistoryUnderflow));
        doc.set_current_page(0).unwrap();
        assert!(doc.undo().is_ok());
        assert!(doc.current_page().is_empty());
    }

    #[test]
    fn test_from_pages_recomputes_allocator() {
        let style = ShapeStyle::default();
        let shape = |id| Shape::Line(Line::new(id, Point::ZERO, Point::new(1.0, 1.0), &style));
        let doc = Document::from_pages(vec![vec![shape(4)], vec![shape(9), shape(2)]], None);
        assert_eq!(doc.next_object_id(), 10);
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.page(1).and_then(|p| p.position_of(2)), Some(1));

        let empty = Document::from_pages(Vec::new(), None);
        assert_eq!(empty.page_count(), 1);
        assert_eq!(empty.next_object_id(), 0);
    }

    #[test]
    fn test_allocator_stops_before_max_id() {
        let style = ShapeStyle::default();
        let last = Shape::Line(Line::new(ObjectId::MAX - 1, Point::ZERO, Point::new(1.0, 1.0), &style));
        let mut doc = Document::from_pages(vec![vec![last]], None);
        assert_eq!(doc.next_object_id(), ObjectId::MAX);

        assert_eq!(doc.allocate_id(), Err(EngineError::IdSpaceExhausted));
        assert_eq!(doc.next_object_id(), ObjectId::MAX);
    }
}

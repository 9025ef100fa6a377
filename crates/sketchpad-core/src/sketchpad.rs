//! The engine facade.
//!
//! [`SketchPad`] owns the document, the tool manager and an optional renderer.
//! Every mutation goes through `&mut self` and triggers a redraw of the
//! current page.

use crate::config::EngineConfig;
use crate::document::Document;
use crate::error::{EngineError, EngineResult};
use crate::input::PointerEvent;
use crate::render::{RenderFrame, Renderer};
use crate::shapes::SerializableColor;
use crate::storage::{Storage, StorageResult};
use crate::tools::{Outcome, ToolKind, ToolManager};
use kurbo::Point;

/// A sketch document wired to its interaction state machine.
pub struct SketchPad {
    document: Document,
    tools: ToolManager,
    config: EngineConfig,
    renderer: Option<Box<dyn Renderer>>,
}

impl Default for SketchPad {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl SketchPad {
    /// Create an engine with a blank one-page document.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            document: Document::with_history_limit(config.history_limit),
            tools: ToolManager::new(&config),
            config,
            renderer: None,
        }
    }

    /// Create an engine that redraws through `renderer`.
    pub fn with_renderer(config: EngineConfig, renderer: impl Renderer + 'static) -> Self {
        let mut pad = Self::new(config);
        pad.set_renderer(renderer);
        pad
    }

    /// Install a renderer and draw the current page once.
    pub fn set_renderer(&mut self, renderer: impl Renderer + 'static) {
        self.renderer = Some(Box::new(renderer));
        self.render();
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // --- Pointer input ---

    pub fn press(&mut self, point: Point) -> EngineResult<Outcome> {
        let outcome = self.tools.press(&mut self.document, point);
        self.after_gesture(outcome)
    }

    pub fn drag(&mut self, point: Point) -> EngineResult<Outcome> {
        let outcome = self.tools.drag(point);
        self.after_gesture(outcome)
    }

    pub fn release(&mut self, point: Point) -> EngineResult<Outcome> {
        let outcome = self.tools.release(&mut self.document, point);
        self.after_gesture(outcome)
    }

    /// Dispatch a pointer event to press, drag or release.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EngineResult<Outcome> {
        match event {
            PointerEvent::Press { position } => self.press(position),
            PointerEvent::Drag { position } => self.drag(position),
            PointerEvent::Release { position } => self.release(position),
        }
    }

    /// Close the open text box with `content`.
    pub fn commit_text(&mut self, content: &str) -> EngineResult<Outcome> {
        let outcome = self.tools.commit_text(&mut self.document, content);
        self.after_gesture(outcome)
    }

    /// Abandon the gesture in progress. Returns true if there was one.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.tools.cancel();
        if cancelled {
            log::debug!("Gesture cancelled");
            self.render();
        }
        cancelled
    }

    // --- History ---

    /// Undo the last command on the current page.
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self) -> EngineResult<bool> {
        self.tools.cancel();
        let result = self.document.undo();
        self.after_history("undo", result)
    }

    /// Redo the last undone command on the current page.
    ///
    /// Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self) -> EngineResult<bool> {
        self.tools.cancel();
        let result = self.document.redo();
        self.after_history("redo", result)
    }

    // --- Pages ---

    /// Append a blank page and switch to it.
    pub fn add_page(&mut self) -> usize {
        self.tools.cancel();
        let index = self.document.add_page();
        self.render();
        index
    }

    /// Delete a page. The last remaining page is refused.
    pub fn delete_page(&mut self, index: usize) -> EngineResult<()> {
        self.tools.cancel();
        self.document.delete_page(index)?;
        self.render();
        Ok(())
    }

    pub fn set_current_page(&mut self, index: usize) -> EngineResult<()> {
        self.document.set_current_page(index)?;
        self.tools.cancel();
        self.render();
        Ok(())
    }

    pub fn next_page(&mut self) -> bool {
        self.switch_page(Document::next_page)
    }

    pub fn prev_page(&mut self) -> bool {
        self.switch_page(Document::prev_page)
    }

    // --- Toolbar ---

    pub fn set_tool(&mut self, tool: ToolKind) {
        let was_active = self.tools.is_active();
        self.tools.set_tool(tool);
        if was_active {
            self.render();
        }
    }

    pub fn set_pen_color(&mut self, color: SerializableColor) {
        self.tools.set_pen_color(color);
    }

    pub fn set_fill_color(&mut self, color: Option<SerializableColor>) {
        self.tools.set_fill_color(color);
    }

    pub fn set_stroke_width(&mut self, width: u32) {
        self.tools.set_stroke_width(width);
    }

    // --- Document lifecycle ---

    /// Replace the document with a blank one.
    pub fn new_document(&mut self) {
        self.tools.cancel();
        self.document = Document::with_history_limit(self.config.history_limit);
        log::info!("Started new document {}", self.document.id);
        self.render();
    }

    /// Save under the document's own id: the storage key it was loaded
    /// from, or the fresh uuid of a new document.
    pub fn save(&self, storage: &dyn Storage) -> StorageResult<()> {
        self.save_to(storage, &self.document.id)
    }

    /// Save the committed objects under `id`.
    pub fn save_to(&self, storage: &dyn Storage, id: &str) -> StorageResult<()> {
        storage.save(id, &self.document)?;
        log::info!(
            "Saved sketch {} ({} pages, {} objects)",
            id,
            self.document.page_count(),
            self.document.object_count()
        );
        Ok(())
    }

    /// Replace the document with the one stored under `id`.
    ///
    /// On any error the current document and gesture are left untouched.
    pub fn load_from(&mut self, storage: &dyn Storage, id: &str) -> StorageResult<()> {
        let document = storage
            .load_with_history_limit(id, self.config.history_limit)
            .inspect_err(|e| log::error!("Failed to load sketch {}: {}", id, e))?;
        self.tools.cancel();
        self.document = document;
        log::info!(
            "Loaded sketch {} ({} pages, {} objects)",
            id,
            self.document.page_count(),
            self.document.object_count()
        );
        self.render();
        Ok(())
    }

    /// Redraw the current page, including any preview.
    pub fn render(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let frame = RenderFrame {
            objects: self.document.current_page().objects(),
            preview: self.tools.preview_shape(),
            page_index: self.document.current_page_index(),
            page_count: self.document.page_count(),
            page_size: self.config.page_size(),
        };
        renderer.render(&frame);
    }

    fn after_gesture(&mut self, outcome: EngineResult<Outcome>) -> EngineResult<Outcome> {
        match outcome {
            Ok(Outcome::Ignored) => Ok(Outcome::Ignored),
            Ok(outcome) => {
                self.render();
                Ok(outcome)
            }
            Err(e) => {
                // A rejected point may have abandoned a preview.
                self.render();
                Err(e)
            }
        }
    }

    fn after_history(&mut self, action: &str, result: EngineResult<()>) -> EngineResult<bool> {
        match result {
            Ok(()) => {
                self.render();
                Ok(true)
            }
            Err(EngineError::HistoryUnderflow) => {
                log::debug!("Nothing to {}", action);
                Ok(false)
            }
            Err(e) => {
                log::error!("History {} failed: {}", action, e);
                self.render();
                Err(e)
            }
        }
    }

    fn switch_page(&mut self, step: fn(&mut Document) -> bool) -> bool {
        let moved = step(&mut self.document);
        if moved {
            self.tools.cancel();
            self.render();
        }
        moved
    }
}

//! Tool system: turns pointer gestures into document commands.

use crate::config::EngineConfig;
use crate::document::Document;
use crate::error::EngineResult;
use crate::input::clamp_to_page;
use crate::shapes::{
    Line, ObjectId, Oval, Pencil, Rectangle, SerializableColor, Shape, ShapeStyle, Text,
};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pencil,
    Line,
    Rectangle,
    Oval,
    Text,
    Delete,
}

impl ToolKind {
    /// Tools that draw while the pointer is held down.
    pub fn is_continuous(self) -> bool {
        matches!(
            self,
            ToolKind::Pencil | ToolKind::Line | ToolKind::Rectangle | ToolKind::Oval
        )
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ToolState {
    /// Waiting for a press.
    #[default]
    Idle,
    /// A continuous gesture is in progress. The shape already owns its id but
    /// is not part of any page yet.
    Drawing { shape: Shape },
    /// A text box is open at `anchor`, waiting for its content.
    TextEditing { anchor: Point, style: ShapeStyle },
}

/// What a pointer or text event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The event does not apply in the current state.
    Ignored,
    /// The in-progress preview changed.
    Preview,
    /// A text box was opened.
    TextEditingStarted,
    /// A gesture was committed as a new object.
    Added(ObjectId),
    /// The delete tool removed an object.
    Deleted(ObjectId),
    /// The delete tool hit nothing.
    Missed,
    /// An empty text entry was dropped.
    Discarded,
}

impl Outcome {
    /// Whether the document changed.
    pub fn is_commit(self) -> bool {
        matches!(self, Outcome::Added(_) | Outcome::Deleted(_))
    }
}

/// Manages the current tool, the toolbar style and the gesture in flight.
#[derive(Debug, Clone)]
pub struct ToolManager {
    current_tool: ToolKind,
    state: ToolState,
    /// Current style to apply to new shapes.
    current_style: ShapeStyle,
    page: Rect,
    hit_tolerance: f64,
    text_width_chars: u32,
    text_height_lines: u32,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl ToolManager {
    /// Create a tool manager using the page area, tolerance and default style of `config`.
    pub fn new(config: &EngineConfig) -> Self {
        let mut current_style = config.default_style;
        current_style.stroke_width = current_style.stroke_width.max(1);
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::Idle,
            current_style,
            page: config.page_rect(),
            hit_tolerance: config.hit_tolerance,
            text_width_chars: config.text_width_chars,
            text_height_lines: config.text_height_lines,
        }
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    /// Set the current tool, abandoning any gesture in flight.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.cancel() {
            log::debug!("Tool switched to {:?} mid-gesture, gesture abandoned", tool);
        }
        self.current_tool = tool;
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.current_style
    }

    pub fn set_pen_color(&mut self, color: SerializableColor) {
        self.current_style.stroke_color = color;
    }

    pub fn set_fill_color(&mut self, color: Option<SerializableColor>) {
        self.current_style.fill_color = color;
    }

    /// Set the stroke width. Widths below 1 are raised to 1.
    pub fn set_stroke_width(&mut self, width: u32) {
        self.current_style.stroke_width = width.max(1);
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    /// Check if a drawing gesture is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Drawing { .. })
    }

    pub fn is_editing_text(&self) -> bool {
        matches!(self.state, ToolState::TextEditing { .. })
    }

    /// The transient shape of the gesture in progress.
    pub fn preview_shape(&self) -> Option<&Shape> {
        match &self.state {
            ToolState::Drawing { shape } => Some(shape),
            _ => None,
        }
    }

    /// Begin an interaction at `point`.
    pub fn press(&mut self, document: &mut Document, point: Point) -> EngineResult<Outcome> {
        let point = self.clamp_or_abandon(point)?;

        if self.state != ToolState::Idle {
            log::debug!("Press ignored while a gesture is in progress");
            return Ok(Outcome::Ignored);
        }

        if self.current_tool.is_continuous() {
            let id = document.allocate_id()?;
            let shape = self.seed_shape(id, point);
            log::debug!("Started {} gesture for object {}", shape.kind_name(), id);
            self.state = ToolState::Drawing { shape };
            return Ok(Outcome::Preview);
        }

        match self.current_tool {
            ToolKind::Text => {
                self.state = ToolState::TextEditing {
                    anchor: point,
                    style: self.current_style,
                };
                Ok(Outcome::TextEditingStarted)
            }
            _ => self.delete_at(document, point),
        }
    }

    /// Update the current interaction.
    pub fn drag(&mut self, point: Point) -> EngineResult<Outcome> {
        if !self.is_active() {
            return Ok(Outcome::Ignored);
        }
        let point = self.clamp_or_abandon(point)?;
        if let ToolState::Drawing { shape } = &mut self.state {
            extend_shape(shape, point);
        }
        Ok(Outcome::Preview)
    }

    /// End the current interaction and commit the finished shape.
    pub fn release(&mut self, document: &mut Document, point: Point) -> EngineResult<Outcome> {
        if !self.is_active() {
            return Ok(Outcome::Ignored);
        }
        let point = self.clamp_or_abandon(point)?;
        let ToolState::Drawing { mut shape } = std::mem::take(&mut self.state) else {
            return Ok(Outcome::Ignored);
        };

        finish_shape(&mut shape, point);
        let id = shape.id();
        document.add_object(document.current_page_index(), shape)?;
        Ok(Outcome::Added(id))
    }

    /// Close the open text box. Blank content is dropped without a command.
    pub fn commit_text(&mut self, document: &mut Document, content: &str) -> EngineResult<Outcome> {
        let state = std::mem::take(&mut self.state);
        let ToolState::TextEditing { anchor, style } = state else {
            self.state = state;
            return Ok(Outcome::Ignored);
        };

        if content.trim().is_empty() {
            log::debug!("Empty text entry discarded");
            return Ok(Outcome::Discarded);
        }

        let id = document.allocate_id()?;
        let text = Text::new(id, anchor, content.to_string(), style.stroke_color)
            .with_box_size(self.text_width_chars, self.text_height_lines);
        document.add_object(document.current_page_index(), Shape::Text(text))?;
        Ok(Outcome::Added(id))
    }

    /// Cancel the current interaction. Returns true if a gesture was abandoned.
    pub fn cancel(&mut self) -> bool {
        let was_busy = self.state != ToolState::Idle;
        self.state = ToolState::Idle;
        was_busy
    }

    fn clamp_or_abandon(&mut self, point: Point) -> EngineResult<Point> {
        clamp_to_page(point, self.page).inspect_err(|e| {
            log::warn!("Gesture abandoned: {}", e);
            self.state = ToolState::Idle;
        })
    }

    fn delete_at(&self, document: &mut Document, point: Point) -> EngineResult<Outcome> {
        let page_index = document.current_page_index();
        match document.current_page().topmost_hit(point, self.hit_tolerance) {
            Some(list_index) => {
                let shape = document.delete_object_at(page_index, list_index)?;
                Ok(Outcome::Deleted(shape.id()))
            }
            None => Ok(Outcome::Missed),
        }
    }

    /// Partial shape for a continuous tool, seeded at the press point.
    fn seed_shape(&self, id: ObjectId, point: Point) -> Shape {
        let style = &self.current_style;
        match self.current_tool {
            ToolKind::Line => Shape::Line(Line::new(id, point, point, style)),
            ToolKind::Rectangle => Shape::Rectangle(Rectangle::new(id, point, point, style)),
            ToolKind::Oval => Shape::Oval(Oval::new(id, point, point, style)),
            ToolKind::Pencil | ToolKind::Text | ToolKind::Delete => {
                Shape::Pencil(Pencil::new(id, point, style))
            }
        }
    }
}

fn extend_shape(shape: &mut Shape, point: Point) {
    match shape {
        Shape::Pencil(p) => p.add_point(point),
        Shape::Line(l) => l.end = point,
        Shape::Rectangle(r) => r.end = point,
        Shape::Oval(o) => o.end = point,
        Shape::Text(_) => {}
    }
}

fn finish_shape(shape: &mut Shape, point: Point) {
    match shape {
        Shape::Pencil(p) => {
            if p.last_point() != Some(point) {
                p.add_point(point);
            }
        }
        _ => extend_shape(shape, point),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn setup(tool: ToolKind) -> (ToolManager, Document) {
        let mut tm = ToolManager::default();
        tm.set_tool(tool);
        (tm, Document::new())
    }

    fn undo_len(doc: &Document) -> usize {
        doc.current_page().history().undo_len()
    }

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::default();
        assert_eq!(tm.current_tool(), ToolKind::Pencil);

        tm.set_tool(ToolKind::Rectangle);
        assert_eq!(tm.current_tool(), ToolKind::Rectangle);
    }

    #[test]
    fn test_rectangle_interaction() {
        let (mut tm, mut doc) = setup(ToolKind::Rectangle);
        assert!(!tm.is_active());

        assert_eq!(tm.press(&mut doc, Point::new(10.0, 10.0)), Ok(Outcome::Preview));
        assert!(tm.is_active());

        tm.drag(Point::new(50.0, 50.0)).unwrap();
        let Some(Shape::Rectangle(preview)) = tm.preview_shape() else {
            panic!("expected rectangle preview");
        };
        assert_eq!(preview.end, Point::new(50.0, 50.0));
        assert!(doc.current_page().is_empty());

        assert_eq!(tm.release(&mut doc, Point::new(100.0, 80.0)), Ok(Outcome::Added(0)));
        assert!(!tm.is_active());
        let Some(Shape::Rectangle(rect)) = doc.current_page().get(0) else {
            panic!("expected committed rectangle");
        };
        assert_eq!(rect.start, Point::new(10.0, 10.0));
        assert_eq!(rect.end, Point::new(100.0, 80.0));
    }

    #[test]
    fn test_one_command_per_gesture() {
        let (mut tm, mut doc) = setup(ToolKind::Pencil);
        tm.press(&mut doc, Point::new(0.0, 0.0)).unwrap();
        for i in 1..20 {
            tm.drag(Point::new(i as f64, i as f64)).unwrap();
        }
        tm.release(&mut doc, Point::new(19.0, 19.0)).unwrap();

        assert_eq!(undo_len(&doc), 1);
        let Some(Shape::Pencil(pencil)) = doc.current_page().get(0) else {
            panic!("expected pencil");
        };
        // The release point equals the last drag point and is not duplicated.
        assert_eq!(pencil.len(), 20);
    }

    #[test]
    fn test_id_allocated_at_press() {
        let (mut tm, mut doc) = setup(ToolKind::Line);
        tm.press(&mut doc, Point::ZERO).unwrap();
        assert_eq!(doc.next_object_id(), 1);
        assert_eq!(tm.preview_shape().map(Shape::id), Some(0));
    }

    #[test]
    fn test_cancel_interaction() {
        let (mut tm, mut doc) = setup(ToolKind::Oval);
        tm.press(&mut doc, Point::ZERO).unwrap();
        tm.drag(Point::new(30.0, 30.0)).unwrap();
        assert!(tm.cancel());

        assert!(!tm.is_active());
        assert_eq!(tm.release(&mut doc, Point::new(30.0, 30.0)), Ok(Outcome::Ignored));
        assert!(doc.current_page().is_empty());
        assert_eq!(undo_len(&doc), 0);
    }

    #[test]
    fn test_switching_tool_abandons_gesture() {
        let (mut tm, mut doc) = setup(ToolKind::Line);
        tm.press(&mut doc, Point::ZERO).unwrap();
        tm.set_tool(ToolKind::Rectangle);
        assert_eq!(*tm.state(), ToolState::Idle);
        assert!(doc.current_page().is_empty());
    }

    #[test]
    fn test_style_captured_at_press() {
        let (mut tm, mut doc) = setup(ToolKind::Line);
        tm.set_pen_color(SerializableColor::rgb(255, 0, 0));
        tm.press(&mut doc, Point::ZERO).unwrap();
        tm.set_pen_color(SerializableColor::rgb(0, 0, 255));
        tm.release(&mut doc, Point::new(5.0, 5.0)).unwrap();

        let Some(Shape::Line(line)) = doc.current_page().get(0) else {
            panic!("expected line");
        };
        assert_eq!(line.stroke_color, SerializableColor::rgb(255, 0, 0));
    }

    #[test]
    fn test_stroke_width_floor() {
        let mut tm = ToolManager::default();
        tm.set_stroke_width(0);
        assert_eq!(tm.style().stroke_width, 1);
    }

    #[test]
    fn test_press_clamps_to_page() {
        let (mut tm, mut doc) = setup(ToolKind::Line);
        tm.press(&mut doc, Point::new(-10.0, 9999.0)).unwrap();
        let Some(Shape::Line(line)) = tm.preview_shape() else {
            panic!("expected line preview");
        };
        assert_eq!(line.start, Point::new(0.0, 595.0));
    }

    #[test]
    fn test_non_finite_drag_abandons_gesture() {
        let (mut tm, mut doc) = setup(ToolKind::Pencil);
        tm.press(&mut doc, Point::ZERO).unwrap();
        let result = tm.drag(Point::new(f64::NAN, 1.0));
        assert!(matches!(result, Err(EngineError::InvalidGeometry(_))));
        assert!(!tm.is_active());
        assert_eq!(undo_len(&doc), 0);
    }

    #[test]
    fn test_non_finite_press_keeps_idle() {
        let (mut tm, mut doc) = setup(ToolKind::Rectangle);
        assert!(tm.press(&mut doc, Point::new(f64::INFINITY, 0.0)).is_err());
        assert_eq!(*tm.state(), ToolState::Idle);
        assert_eq!(doc.next_object_id(), 0);
    }

    #[test]
    fn test_non_finite_press_mid_gesture_abandons_it() {
        let (mut tm, mut doc) = setup(ToolKind::Line);
        tm.press(&mut doc, Point::new(10.0, 10.0)).unwrap();
        let result = tm.press(&mut doc, Point::new(f64::NAN, 1.0));
        assert!(matches!(result, Err(EngineError::InvalidGeometry(_))));

        assert_eq!(*tm.state(), ToolState::Idle);
        assert_eq!(tm.release(&mut doc, Point::new(50.0, 50.0)), Ok(Outcome::Ignored));
        assert!(doc.current_page().is_empty());
        assert_eq!(undo_len(&doc), 0);
    }

    #[test]
    fn test_press_reports_exhausted_ids() {
        let style = ShapeStyle::default();
        let last = Shape::Line(Line::new(ObjectId::MAX - 1, Point::ZERO, Point::ZERO, &style));
        let mut doc = Document::from_pages(vec![vec![last]], None);
        let mut tm = ToolManager::default();

        assert_eq!(tm.press(&mut doc, Point::ZERO), Err(EngineError::IdSpaceExhausted));
        assert_eq!(*tm.state(), ToolState::Idle);
    }

    #[test]
    fn test_text_commit() {
        let (mut tm, mut doc) = setup(ToolKind::Text);
        assert_eq!(tm.press(&mut doc, Point::new(20.0, 30.0)), Ok(Outcome::TextEditingStarted));
        assert!(tm.is_editing_text());
        assert_eq!(tm.release(&mut doc, Point::new(20.0, 30.0)), Ok(Outcome::Ignored));

        assert_eq!(tm.commit_text(&mut doc, "hello"), Ok(Outcome::Added(0)));
        let Some(Shape::Text(text)) = doc.current_page().get(0) else {
            panic!("expected text");
        };
        assert_eq!(text.content, "hello");
        assert_eq!(text.position, Point::new(20.0, 30.0));
        assert_eq!(text.width_chars, 20);
        assert_eq!(text.height_lines, 2);
    }

    #[test]
    fn test_blank_text_discarded() {
        let (mut tm, mut doc) = setup(ToolKind::Text);
        tm.press(&mut doc, Point::ZERO).unwrap();
        assert_eq!(tm.commit_text(&mut doc, "  \n "), Ok(Outcome::Discarded));
        assert!(doc.current_page().is_empty());
        assert_eq!(undo_len(&doc), 0);
        assert_eq!(doc.next_object_id(), 0);
        assert!(!tm.is_editing_text());
    }

    #[test]
    fn test_commit_text_without_open_box_is_ignored() {
        let (mut tm, mut doc) = setup(ToolKind::Line);
        assert_eq!(tm.commit_text(&mut doc, "x"), Ok(Outcome::Ignored));
    }

    #[test]
    fn test_press_ignored_while_text_open() {
        let (mut tm, mut doc) = setup(ToolKind::Text);
        tm.press(&mut doc, Point::ZERO).unwrap();
        assert_eq!(tm.press(&mut doc, Point::new(5.0, 5.0)), Ok(Outcome::Ignored));
        assert!(tm.is_editing_text());
    }

    #[test]
    fn test_delete_tool_hits_topmost() {
        let (mut tm, mut doc) = setup(ToolKind::Rectangle);
        tm.press(&mut doc, Point::new(0.0, 0.0)).unwrap();
        tm.release(&mut doc, Point::new(50.0, 50.0)).unwrap();
        tm.press(&mut doc, Point::new(20.0, 20.0)).unwrap();
        tm.release(&mut doc, Point::new(80.0, 80.0)).unwrap();

        tm.set_tool(ToolKind::Delete);
        assert_eq!(tm.press(&mut doc, Point::new(30.0, 30.0)), Ok(Outcome::Deleted(1)));
        assert_eq!(tm.press(&mut doc, Point::new(300.0, 300.0)), Ok(Outcome::Missed));
        assert_eq!(doc.current_page().len(), 1);
        assert_eq!(undo_len(&doc), 3);
        assert!(!tm.is_active());
    }
}

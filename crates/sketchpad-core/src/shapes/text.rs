//! Text box shape.

use super::{ObjectId, SerializableColor, ShapeTrait, point_pair};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A text box anchored at its top-left corner.
///
/// The box is sized in characters and lines, like the editable region the
/// text tool opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ObjectId,
    /// Top-left corner of the box.
    #[serde(with = "point_pair")]
    pub position: Point,
    /// The text content.
    #[serde(rename = "text")]
    pub content: String,
    /// Text color.
    #[serde(rename = "fill")]
    pub text_color: SerializableColor,
    /// Box width in characters.
    #[serde(default = "default_width_chars")]
    pub width_chars: u32,
    /// Box height in lines.
    #[serde(default = "default_height_lines")]
    pub height_lines: u32,
}

fn default_width_chars() -> u32 {
    Text::DEFAULT_WIDTH_CHARS
}

fn default_height_lines() -> u32 {
    Text::DEFAULT_HEIGHT_LINES
}

impl Text {
    pub const DEFAULT_WIDTH_CHARS: u32 = 20;
    pub const DEFAULT_HEIGHT_LINES: u32 = 2;
    /// Horizontal advance of one character, in pixels.
    pub const CHAR_WIDTH: f64 = 10.0;
    /// Height of one line, in pixels.
    pub const LINE_HEIGHT: f64 = 20.0;

    /// Create a new text box with the default size.
    pub fn new(id: ObjectId, position: Point, content: String, text_color: SerializableColor) -> Self {
        Self {
            id,
            position,
            content,
            text_color,
            width_chars: Self::DEFAULT_WIDTH_CHARS,
            height_lines: Self::DEFAULT_HEIGHT_LINES,
        }
    }

    /// Set the box size in characters and lines.
    pub fn with_box_size(mut self, width_chars: u32, height_lines: u32) -> Self {
        self.width_chars = width_chars;
        self.height_lines = height_lines;
        self
    }

    /// Box size in pixels.
    pub fn box_size(&self) -> kurbo::Size {
        kurbo::Size::new(
            f64::from(self.width_chars) * Self::CHAR_WIDTH,
            f64::from(self.height_lines) * Self::LINE_HEIGHT,
        )
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.box_size())
    }

    fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        super::rect_contains_inclusive(self.bounds(), point)
    }

    fn to_path(&self) -> BezPath {
        self.bounds().to_path(0.1)
    }

    fn control_points(&self) -> Vec<Point> {
        vec![self.position]
    }
}

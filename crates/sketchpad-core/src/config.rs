//! Engine configuration.

use crate::shapes::{ShapeStyle, Text};
use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Landscape A4 at the sketch pad's screen resolution.
pub const DEFAULT_PAGE_WIDTH: f64 = 900.0;
pub const DEFAULT_PAGE_HEIGHT: f64 = 595.0;
/// Pixel slack around strokes for the delete tool.
pub const DEFAULT_HIT_TOLERANCE: f64 = 3.0;

/// Settings for a [`crate::SketchPad`].
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logical page width in pixels.
    pub page_width: f64,
    /// Logical page height in pixels.
    pub page_height: f64,
    /// Extra distance accepted by pencil and line hit tests.
    pub hit_tolerance: f64,
    /// Maximum undo entries per page (None = unbounded).
    pub history_limit: Option<usize>,
    /// Toolbar style at startup.
    pub default_style: ShapeStyle,
    /// Text box width, in characters, for new text.
    pub text_width_chars: u32,
    /// Text box height, in lines, for new text.
    pub text_height_lines: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_width: DEFAULT_PAGE_WIDTH,
            page_height: DEFAULT_PAGE_HEIGHT,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            history_limit: None,
            default_style: ShapeStyle::default(),
            text_width_chars: Text::DEFAULT_WIDTH_CHARS,
            text_height_lines: Text::DEFAULT_HEIGHT_LINES,
        }
    }
}

impl EngineConfig {
    pub fn page_size(&self) -> Size {
        Size::new(self.page_width, self.page_height)
    }

    /// The fixed drawing area of every page.
    pub fn page_rect(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.page_size())
    }
}

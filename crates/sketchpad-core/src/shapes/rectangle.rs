//! Rectangle shape.

use super::{ObjectId, SerializableColor, ShapeStyle, ShapeTrait, optional_color, point_pair};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle spanned by two opposite corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ObjectId,
    /// Corner where the drag started.
    #[serde(with = "point_pair")]
    pub start: Point,
    /// Opposite corner.
    #[serde(with = "point_pair")]
    pub end: Point,
    /// Outline color.
    #[serde(rename = "outline")]
    pub outline_color: SerializableColor,
    /// Outline width in pixels.
    #[serde(rename = "width")]
    pub stroke_width: u32,
    /// Fill color (None = no fill).
    #[serde(rename = "fill", with = "optional_color", default)]
    pub fill_color: Option<SerializableColor>,
}

impl Rectangle {
    /// Create a rectangle from two corner points.
    pub fn new(id: ObjectId, start: Point, end: Point, style: &ShapeStyle) -> Self {
        Self {
            id,
            start,
            end,
            outline_color: style.stroke_color,
            stroke_width: style.stroke_width,
            fill_color: style.fill_color,
        }
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn normalized_rect(&self) -> Rect {
        super::rect_from_corners(self.start, self.end)
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.normalized_rect()
    }

    fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        super::rect_contains_inclusive(self.bounds(), point)
    }

    fn to_path(&self) -> BezPath {
        self.normalized_rect().to_path(0.1)
    }

    fn control_points(&self) -> Vec<Point> {
        vec![self.start, self.end]
    }
}

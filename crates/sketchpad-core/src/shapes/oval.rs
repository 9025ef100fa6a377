//! Oval shape.

use super::{ObjectId, SerializableColor, ShapeStyle, ShapeTrait, optional_color, point_pair};
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An ellipse inscribed in the box spanned by two opposite corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Oval {
    pub(crate) id: ObjectId,
    #[serde(with = "point_pair")]
    pub start: Point,
    #[serde(with = "point_pair")]
    pub end: Point,
    #[serde(rename = "outline")]
    pub outline_color: SerializableColor,
    #[serde(rename = "width")]
    pub stroke_width: u32,
    #[serde(rename = "fill", with = "optional_color", default)]
    pub fill_color: Option<SerializableColor>,
}

impl Oval {
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

    /// Get as a kurbo Ellipse.
    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::from_rect(self.bounds())
    }
}

impl ShapeTrait for Oval {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounds(&self) -> Rect {
        super::rect_from_corners(self.start, self.end)
    }

    // Box containment, not distance to the outline.
    fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        super::rect_contains_inclusive(self.bounds(), point)
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn control_points(&self) -> Vec<Point> {
        vec![self.start, self.end]
    }
}

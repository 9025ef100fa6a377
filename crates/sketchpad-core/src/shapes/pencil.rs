//! Freehand pencil stroke.

use super::{ObjectId, SerializableColor, ShapeStyle, ShapeTrait, point_pairs};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A freehand stroke (series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pencil {
    pub(crate) id: ObjectId,
    /// Points in the stroke, in drawing order.
    #[serde(with = "point_pairs")]
    pub points: Vec<Point>,
    /// Stroke color.
    #[serde(rename = "color")]
    pub stroke_color: SerializableColor,
    /// Stroke width in pixels.
    #[serde(rename = "width")]
    pub stroke_width: u32,
}

impl Pencil {
    /// Start a new stroke at `start`.
    pub fn new(id: ObjectId, start: Point, style: &ShapeStyle) -> Self {
        Self {
            id,
            points: vec![start],
            stroke_color: style.stroke_color,
            stroke_width: style.stroke_width,
        }
    }

    /// Add a point to the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last recorded point.
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

impl ShapeTrait for Pencil {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dist = super::point_to_polyline_dist(point, &self.points);
        dist <= tolerance + f64::from(self.stroke_width) / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();

        let Some(first) = self.points.first() else {
            return path;
        };

        path.move_to(*first);
        for point in self.points.iter().skip(1) {
            path.line_to(*point);
        }

        path
    }

    fn control_points(&self) -> Vec<Point> {
        self.points.clone()
    }
}

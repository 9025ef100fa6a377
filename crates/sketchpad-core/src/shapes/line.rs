//! Straight line shape.

use super::{ObjectId, SerializableColor, ShapeStyle, ShapeTrait, point_pair};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A straight line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ObjectId,
    /// Start point.
    #[serde(with = "point_pair")]
    pub start: Point,
    /// End point.
    #[serde(with = "point_pair")]
    pub end: Point,
    /// Stroke color.
    #[serde(rename = "color")]
    pub stroke_color: SerializableColor,
    /// Stroke width in pixels.
    #[serde(rename = "width")]
    pub stroke_width: u32,
}

impl Line {
    /// Create a new line.
    pub fn new(id: ObjectId, start: Point, end: Point, style: &ShapeStyle) -> Self {
        Self {
            id,
            start,
            end,
            stroke_color: style.stroke_color,
            stroke_width: style.stroke_width,
        }
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounds(&self) -> Rect {
        super::rect_from_corners(self.start, self.end)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dist = super::point_to_segment_dist(point, self.start, self.end);
        dist <= tolerance + f64::from(self.stroke_width) / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }

    fn control_points(&self) -> Vec<Point> {
        vec![self.start, self.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Line {
        Line::new(0, Point::new(x0, y0), Point::new(x1, y1), &ShapeStyle::default())
    }

    #[test]
    fn test_hit_test_on_line() {
        let line = line(0.0, 0.0, 100.0, 0.0);
        assert!(line.hit_test(Point::new(50.0, 0.0), 1.0));
        assert!(line.hit_test(Point::new(50.0, 2.0), 3.0));
        assert!(!line.hit_test(Point::new(50.0, 20.0), 3.0));
    }

    #[test]
    fn test_hit_test_endpoints() {
        let line = line(0.0, 0.0, 100.0, 0.0);
        assert!(line.hit_test(Point::new(0.0, 0.0), 1.0));
        assert!(line.hit_test(Point::new(100.0, 0.0), 1.0));
        assert!(!line.hit_test(Point::new(110.0, 0.0), 1.0));
    }

    #[test]
    fn test_bounds_order_independent() {
        let forward = line(10.0, 20.0, 50.0, 80.0).bounds();
        let backward = line(50.0, 80.0, 10.0, 20.0).bounds();
        assert_eq!(forward, backward);
        assert!((forward.x0 - 10.0).abs() < f64::EPSILON);
        assert!((forward.y0 - 20.0).abs() < f64::EPSILON);
        assert!((forward.x1 - 50.0).abs() < f64::EPSILON);
        assert!((forward.y1 - 80.0).abs() < f64::EPSILON);
    }
}

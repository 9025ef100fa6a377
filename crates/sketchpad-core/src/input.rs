//! Pointer input primitives.

use crate::error::{EngineError, EngineResult};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Pointer event fed to the interaction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Press { position: Point },
    Drag { position: Point },
    Release { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Press { position }
            | PointerEvent::Drag { position }
            | PointerEvent::Release { position } => position,
        }
    }
}

/// Clamp a pointer position onto the page area.
///
/// Out-of-bounds coordinates snap to the nearest edge. Non-finite ones cannot
/// be clamped and are rejected.
pub fn clamp_to_page(point: Point, page: Rect) -> EngineResult<Point> {
    if !(point.x.is_finite() && point.y.is_finite()) {
        return Err(EngineError::InvalidGeometry(point));
    }
    Ok(Point::new(
        point.x.clamp(page.x0, page.x1),
        point.y.clamp(page.y0, page.y1),
    ))
}

//! Pointer events delivered to the drawing surface.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Unified mouse/touch pointer event, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// Pointer left the surface; ends the stroke like `Up`.
    Leave,
}

impl PointerEvent {
    /// Position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => Some(*position),
            PointerEvent::Leave => None,
        }
    }

    /// Translate a client-space event into surface space given the surface origin.
    pub fn relative_to(self, origin: Point) -> Self {
        let local = |p: Point| Point::new(p.x - origin.x, p.y - origin.y);
        match self {
            PointerEvent::Down { position } => PointerEvent::Down { position: local(position) },
            PointerEvent::Move { position } => PointerEvent::Move { position: local(position) },
            PointerEvent::Up { position } => PointerEvent::Up { position: local(position) },
            PointerEvent::Leave => PointerEvent::Leave,
        }
    }
}

//! Collaborator presence.
//!
//! Presence is display-only: actor positions never touch the raster buffer.
//! The board reads actors through [`PresenceSource`], so the local random-walk
//! simulation can be swapped for a real multi-user channel without changing
//! the drawing surface or the presence renderer.

mod simulated;
mod timer;

pub use simulated::{JITTER_PX, SimulatedPresence};
pub use timer::{DEFAULT_TICK_PERIOD, PresenceTimer};

use crate::color::Rgba;
use crate::tools::ToolKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// What a remote actor is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PresenceTool {
    Pen,
    Eraser,
    #[default]
    Idle,
}

impl PresenceTool {
    /// Short label used on cursor tags.
    pub fn label(self) -> &'static str {
        match self {
            PresenceTool::Pen => "pen",
            PresenceTool::Eraser => "eraser",
            PresenceTool::Idle => "idle",
        }
    }

    /// Status line used in the roster.
    pub fn status(self) -> &'static str {
        match self {
            PresenceTool::Pen => "Drawing",
            PresenceTool::Eraser => "Erasing",
            PresenceTool::Idle => "Idle",
        }
    }
}

impl From<ToolKind> for PresenceTool {
    fn from(tool: ToolKind) -> Self {
        match tool {
            ToolKind::Pen => PresenceTool::Pen,
            ToolKind::Eraser => PresenceTool::Eraser,
        }
    }
}

/// A (simulated) remote collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteActor {
    /// Unique, stable identifier.
    pub id: String,
    pub name: String,
    /// Display colour, unique per actor.
    pub color: Rgba,
    pub tool: PresenceTool,
    /// Position in overlay coordinates.
    pub position: Point,
}

impl RemoteActor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: Rgba,
        tool: PresenceTool,
        position: Point,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
            tool,
            position,
        }
    }

    /// First letter of the name, used as the roster badge.
    pub fn initial(&self) -> String {
        self.name.chars().next().map(String::from).unwrap_or_default()
    }
}

/// The fixed set of collaborators every board starts with.
pub fn seed_actors() -> Vec<RemoteActor> {
    vec![
        RemoteActor::new("2", "Maria", Rgba::rgb(0x10, 0xb9, 0x81), PresenceTool::Pen, Point::new(250.0, 300.0)),
        RemoteActor::new("3", "Alex", Rgba::rgb(0xf5, 0x9e, 0x0b), PresenceTool::Eraser, Point::new(500.0, 150.0)),
    ]
}

/// A source of remote actor state.
///
/// `tick` is called once per presence period, synchronously; an implementation
/// must update all of its actors within the call.
pub trait PresenceSource {
    /// Current actors. The list may change length between calls.
    fn actors(&self) -> &[RemoteActor];

    /// Advance the source by one tick.
    fn tick(&mut self);
}

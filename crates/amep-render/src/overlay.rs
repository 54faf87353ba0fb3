//! Presence overlay: cursor glyphs and the collaborator roster.
//!
//! The overlay is rebuilt from actor state on every render, so actors
//! joining or leaving between frames need no bookkeeping here.

use amep_core::color::{DEFAULT_STROKE_COLOR, Rgba};
use amep_core::presence::{PresenceSource, PresenceTool, RemoteActor};
use amep_core::tools::ToolKind;
use amep_core::whiteboard::Whiteboard;
use kurbo::Point;

/// Roster name of the local user.
pub const SELF_NAME: &str = "Me";
/// Roster badge of the local user.
pub const SELF_BADGE: &str = "YOU";

/// A remote cursor with its name tag.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorGlyph {
    pub actor_id: String,
    /// Arrow tip, in overlay coordinates.
    pub position: Point,
    pub color: Rgba,
    /// e.g. `Maria • pen`
    pub label: String,
}

/// One row of the "active now" roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub badge: String,
    pub status: &'static str,
    pub color: Rgba,
    pub is_self: bool,
}

/// Display list for the presence layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresenceOverlay {
    pub cursors: Vec<CursorGlyph>,
    pub roster: Vec<RosterEntry>,
}

impl PresenceOverlay {
    /// Build the overlay from the current actors and the local user's tool.
    pub fn build(actors: &[RemoteActor], local_tool: ToolKind) -> Self {
        let cursors = actors
            .iter()
            .map(|actor| CursorGlyph {
                actor_id: actor.id.clone(),
                position: actor.position,
                color: actor.color,
                label: format!("{} • {}", actor.name, actor.tool.label()),
            })
            .collect();

        let mut roster = Vec::with_capacity(actors.len() + 1);
        roster.push(RosterEntry {
            name: SELF_NAME.to_string(),
            badge: SELF_BADGE.to_string(),
            status: local_tool.status(),
            color: DEFAULT_STROKE_COLOR,
            is_self: true,
        });
        roster.extend(actors.iter().map(|actor| RosterEntry {
            name: actor.name.clone(),
            badge: actor.initial(),
            status: actor.tool.status(),
            color: actor.color,
            is_self: false,
        }));

        Self { cursors, roster }
    }

    /// Overlay for a board; an unmounted board shows only the local user.
    pub fn for_board<P: PresenceSource>(board: &Whiteboard<P>) -> Self {
        Self::build(board.actors(), board.local_tool())
    }

    /// Number of remote actors shown.
    pub fn remote_count(&self) -> usize {
        self.cursors.len()
    }

    /// Roster entries for actors currently drawing or erasing.
    pub fn active(&self) -> impl Iterator<Item = &RosterEntry> {
        self.roster
            .iter()
            .filter(|entry| entry.status != PresenceTool::Idle.status())
    }
}

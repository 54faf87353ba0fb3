//! AMEP Render Library
//!
//! Renderer abstraction for the whiteboard, the presence overlay built from
//! remote actor state, and a software compositor that produces frames
//! without touching the drawing raster.

mod overlay;
mod renderer;
mod software;

pub use overlay::{CursorGlyph, PresenceOverlay, RosterEntry, SELF_BADGE, SELF_NAME};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use software::{Frame, SoftwareRenderer, cursor_path};

//! Renderer trait abstraction.

use crate::overlay::PresenceOverlay;
use amep_core::raster::RasterBuffer;
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("No frame has been built")]
    NoFrame,
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The committed drawing. Borrowed immutably; renderers never write to it.
    pub raster: &'a RasterBuffer,
    /// Remote cursors and roster for this frame.
    pub overlay: &'a PresenceOverlay,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Colour for viewport area the raster does not cover.
    pub background_color: Color,
    /// Whether remote cursors are drawn.
    pub show_cursors: bool,
    /// Cursor glyph scale (1.0 = 18 px tall arrow).
    pub cursor_scale: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context with the viewport matching the raster.
    pub fn new(raster: &'a RasterBuffer, overlay: &'a PresenceOverlay) -> Self {
        Self {
            raster,
            overlay,
            viewport_size: raster.size(),
            background_color: Color::from_rgba8(255, 255, 255, 255),
            show_cursors: true,
            cursor_scale: 1.0,
        }
    }

    /// Set the viewport size.
    pub fn with_viewport(mut self, size: Size) -> Self {
        self.viewport_size = size;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Show or hide remote cursors.
    pub fn with_cursors(mut self, show: bool) -> Self {
        self.show_cursors = show;
        self
    }

    /// Set the cursor glyph scale.
    pub fn with_cursor_scale(mut self, scale: f64) -> Self {
        self.cursor_scale = scale;
        self
    }
}

/// Trait for rendering backends.
///
/// Implementations can rasterise in software, or hand the frame to a GPU
/// renderer.
pub trait Renderer {
    /// Build the frame for `ctx`.
    ///
    /// Called once per frame; must not retain borrows of the context.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

//! Freehand drawing surface.
//!
//! Translates pointer input into continuous strokes on a persistent
//! [`RasterBuffer`]. Pen strokes composite the active colour; eraser strokes
//! overpaint with the background colour (there is no transparency).
//!
//! Until the surface has been measured (or after it has been released) it has
//! no raster, and every drawing operation silently does nothing.

use crate::color::{BACKGROUND, Rgba};
use crate::input::PointerEvent;
use crate::raster::RasterBuffer;
use crate::resize;
use crate::tools::{StrokeState, ToolKind};
use kurbo::{Point, Size};

/// A raster-backed freehand canvas.
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    raster: Option<RasterBuffer>,
    stroke: StrokeState,
    background: Rgba,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSurface {
    /// Create an unmeasured surface.
    pub fn new() -> Self {
        Self {
            raster: None,
            stroke: StrokeState::default(),
            background: BACKGROUND,
        }
    }

    /// Create a surface already measured at `size`.
    pub fn with_size(size: Size) -> Self {
        let mut surface = Self::new();
        surface.resize(size);
        surface
    }

    /// Whether a raster is available to draw into.
    pub fn is_measured(&self) -> bool {
        self.raster.is_some()
    }

    pub fn raster(&self) -> Option<&RasterBuffer> {
        self.raster.as_ref()
    }

    pub fn size(&self) -> Option<Size> {
        self.raster.as_ref().map(RasterBuffer::size)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.raster.as_ref().and_then(|r| r.pixel(x, y))
    }

    pub fn stroke_state(&self) -> &StrokeState {
        &self.stroke
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    // --- Palette ---

    /// Set the active tool. Existing pixels are unaffected.
    pub fn select_tool(&mut self, tool: ToolKind) {
        self.stroke.select_tool(tool);
    }

    /// Set the active colour; also switches back to the pen.
    pub fn select_color(&mut self, color: Rgba) {
        self.stroke.select_color(color);
    }

    /// Set the brush width in pixels for subsequent strokes.
    pub fn set_brush_size(&mut self, px: u32) {
        self.stroke.set_brush_size(px);
    }

    // --- Pointer handling ---

    /// Begin a stroke and commit a dot at `point`.
    pub fn pointer_down(&mut self, point: Point) {
        if self.raster.is_none() {
            return;
        }
        self.stroke.begin(point);
        self.commit_segment(point, point);
    }

    /// Extend the current stroke to `point`.
    pub fn pointer_move(&mut self, point: Point) {
        if self.raster.is_none() {
            return;
        }
        if let Some(previous) = self.stroke.advance(point) {
            self.commit_segment(previous, point);
        }
    }

    /// End the current stroke.
    pub fn pointer_up(&mut self) {
        self.stroke.end();
    }

    /// Pointer left the surface; ends the stroke.
    pub fn pointer_leave(&mut self) {
        self.stroke.end();
    }

    /// Dispatch a pointer event in delivery order.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } => self.pointer_up(),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    fn commit_segment(&mut self, from: Point, to: Point) {
        let ink = self.stroke.ink(self.background);
        let width = f64::from(self.stroke.brush_size());
        if let Some(raster) = self.raster.as_mut() {
            raster.stroke_segment(from, to, width, ink);
        }
    }

    // --- Whole-buffer operations ---

    /// Wipe the buffer to the background colour. Irreversible.
    pub fn clear(&mut self) {
        if let Some(raster) = self.raster.as_mut() {
            raster.fill(self.background);
        }
    }

    /// Container resize notification.
    pub fn resize(&mut self, size: Size) {
        let before = self.size();
        self.raster = resize::reconcile(self.raster.take(), size, self.background);
        if self.raster.is_none() {
            self.stroke.end();
        }
        if before != self.size() {
            log::debug!("Drawing surface resized: {:?} -> {:?}", before, self.size());
        }
    }

    /// Drop the raster and any in-progress stroke.
    pub fn release(&mut self) {
        self.raster = None;
        self.stroke.end();
    }
}

//! Tool palette and per-stroke state.

use crate::color::{DEFAULT_STROKE_COLOR, Rgba};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default brush width in pixels.
pub const DEFAULT_BRUSH_SIZE: u32 = 3;

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
}

impl ToolKind {
    /// Presence status shown for this tool.
    pub fn status(self) -> &'static str {
        match self {
            ToolKind::Pen => "Drawing",
            ToolKind::Eraser => "Erasing",
        }
    }
}

/// Ephemeral stroke state owned by the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeState {
    is_drawing: bool,
    tool: ToolKind,
    color: Rgba,
    brush_size: u32,
    /// Last committed point of the current stroke.
    last_point: Option<Point>,
}

impl Default for StrokeState {
    fn default() -> Self {
        Self {
            is_drawing: false,
            tool: ToolKind::default(),
            color: DEFAULT_STROKE_COLOR,
            brush_size: DEFAULT_BRUSH_SIZE,
            last_point: None,
        }
    }
}

impl StrokeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }

    pub(crate) fn select_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    /// Picking a colour always switches back to the pen.
    pub(crate) fn select_color(&mut self, color: Rgba) {
        self.color = color;
        self.tool = ToolKind::Pen;
    }

    pub(crate) fn set_brush_size(&mut self, px: u32) {
        self.brush_size = px;
    }

    pub(crate) fn begin(&mut self, point: Point) {
        self.is_drawing = true;
        self.last_point = Some(point);
    }

    /// Move the stroke head to `point`, returning the previous head.
    pub(crate) fn advance(&mut self, point: Point) -> Option<Point> {
        if !self.is_drawing {
            return None;
        }
        let previous = self.last_point.unwrap_or(point);
        self.last_point = Some(point);
        Some(previous)
    }

    pub(crate) fn end(&mut self) {
        self.is_drawing = false;
        self.last_point = None;
    }

    /// Colour the active tool composites with.
    pub fn ink(&self, background: Rgba) -> Rgba {
        match self.tool {
            ToolKind::Pen => self.color,
            ToolKind::Eraser => background,
        }
    }
}

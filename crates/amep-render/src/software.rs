//! Software compositor.
//!
//! Copies the committed raster into a frame and paints remote cursors on top.
//! The raster itself is only ever read.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use amep_core::color::Rgba;
use amep_core::raster::RasterBuffer;
use amep_core::resize::pixel_dimensions;
use kurbo::{Affine, BezPath, Point, Shape as KurboShape};

/// A composited frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    image: RasterBuffer,
    cursors_drawn: usize,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.image.pixel(x, y)
    }

    pub fn image(&self) -> &RasterBuffer {
        &self.image
    }

    /// Cursors that touched at least one visible pixel.
    pub fn cursors_drawn(&self) -> usize {
        self.cursors_drawn
    }
}

/// Outline of a pointer arrow with its tip at `tip`.
pub fn cursor_path(tip: Point, scale: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((0.0, 16.0));
    path.line_to((4.5, 12.5));
    path.line_to((7.5, 18.0));
    path.line_to((10.0, 17.0));
    path.line_to((7.0, 11.5));
    path.line_to((12.0, 11.5));
    path.close_path();
    path.apply_affine(Affine::translate(tip.to_vec2()) * Affine::scale(scale));
    path
}

/// Fill `path` into `image` with hard edges. Returns the pixels painted.
fn fill_path(image: &mut RasterBuffer, path: &BezPath, color: Rgba) -> usize {
    let bounds = path.bounding_box();
    let x0 = bounds.x0.floor().max(0.0) as u32;
    let y0 = bounds.y0.floor().max(0.0) as u32;
    let x1 = bounds.x1.ceil().clamp(0.0, f64::from(image.width())) as u32;
    let y1 = bounds.y1.ceil().clamp(0.0, f64::from(image.height())) as u32;

    let mut painted = 0;
    for y in y0..y1 {
        for x in x0..x1 {
            let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if path.contains(center) && image.set_pixel(x, y, color) {
                painted += 1;
            }
        }
    }
    painted
}

/// CPU renderer producing [`Frame`]s.
#[derive(Debug, Default)]
pub struct SoftwareRenderer {
    frame: Option<Frame>,
}

impl SoftwareRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently built frame.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Take ownership of the most recently built frame.
    pub fn take_frame(&mut self) -> RenderResult<Frame> {
        self.frame.take().ok_or(RendererError::NoFrame)
    }
}

impl Renderer for SoftwareRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let (width, height) = pixel_dimensions(ctx.viewport_size);
        if width == 0 || height == 0 {
            return Err(RendererError::RenderFailed(format!(
                "empty viewport {}x{}",
                ctx.viewport_size.width, ctx.viewport_size.height
            )));
        }

        let background = Rgba::from(self.background_color(ctx));
        let mut image = if (width, height) == (ctx.raster.width(), ctx.raster.height()) {
            ctx.raster.clone()
        } else {
            ctx.raster.resized(width, height, background)
        };

        let mut cursors_drawn = 0;
        if ctx.show_cursors && ctx.cursor_scale > 0.0 {
            for cursor in &ctx.overlay.cursors {
                let path = cursor_path(cursor.position, ctx.cursor_scale);
                if fill_path(&mut image, &path, cursor.color) > 0 {
                    cursors_drawn += 1;
                }
            }
        }

        log::trace!("Built {}x{} frame with {} cursors", width, height, cursors_drawn);
        self.frame = Some(Frame { image, cursors_drawn });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::PresenceOverlay;
    use amep_core::presence::{PresenceTool, RemoteActor};
    use amep_core::tools::ToolKind;
    use kurbo::Size;

    fn actor_at(x: f64, y: f64, color: Rgba) -> RemoteActor {
        RemoteActor::new("1", "Maria", color, PresenceTool::Pen, Point::new(x, y))
    }

    #[test]
    fn test_frame_copies_raster() {
        let mut raster = RasterBuffer::new(40, 40, Rgba::WHITE);
        raster.stroke_segment(Point::new(5.0, 5.0), Point::new(30.0, 5.0), 3.0, Rgba::BLACK);
        let overlay = PresenceOverlay::build(&[], ToolKind::Pen);

        let mut renderer = SoftwareRenderer::new();
        renderer.build_scene(&RenderContext::new(&raster, &overlay)).unwrap();
        let frame = renderer.frame().unwrap();

        assert_eq!(frame.image(), &raster);
        assert_eq!(frame.cursors_drawn(), 0);
    }

    #[test]
    fn test_cursor_painted_in_actor_color() {
        let raster = RasterBuffer::new(60, 60, Rgba::WHITE);
        let red = Rgba::rgb(0xef, 0x44, 0x44);
        let overlay = PresenceOverlay::build(&[actor_at(20.0, 20.0, red)], ToolKind::Pen);

        let mut renderer = SoftwareRenderer::new();
        renderer.build_scene(&RenderContext::new(&raster, &overlay)).unwrap();
        let frame = renderer.take_frame().unwrap();

        assert_eq!(frame.cursors_drawn(), 1);
        assert_eq!(frame.pixel(22, 26), Some(red));
        assert_eq!(frame.pixel(19, 26), Some(Rgba::WHITE));
        assert_eq!(frame.pixel(40, 40), Some(Rgba::WHITE));
    }

    #[test]
    fn test_render_never_mutates_raster() {
        let mut raster = RasterBuffer::new(60, 60, Rgba::WHITE);
        raster.stroke_segment(Point::new(10.0, 10.0), Point::new(10.0, 50.0), 3.0, Rgba::BLACK);
        let before = raster.clone();
        let overlay = PresenceOverlay::build(&[actor_at(8.0, 20.0, Rgba::rgb(0, 0xff, 0))], ToolKind::Pen);

        let mut renderer = SoftwareRenderer::new();
        renderer.build_scene(&RenderContext::new(&raster, &overlay)).unwrap();

        assert_eq!(raster, before);
        assert_ne!(renderer.frame().unwrap().image(), &raster);
    }

    #[test]
    fn test_cursor_clipped_at_edges() {
        let raster = RasterBuffer::new(100, 100, Rgba::WHITE);
        let actors = [
            actor_at(95.0, 95.0, Rgba::BLACK),
            actor_at(-30.0, -30.0, Rgba::BLACK),
            actor_at(500.0, 20.0, Rgba::BLACK),
        ];
        let overlay = PresenceOverlay::build(&actors, ToolKind::Pen);

        let mut renderer = SoftwareRenderer::new();
        renderer.build_scene(&RenderContext::new(&raster, &overlay)).unwrap();
        let frame = renderer.frame().unwrap();

        assert_eq!(frame.cursors_drawn(), 1);
        assert_eq!(frame.pixel(96, 99), Some(Rgba::BLACK));
    }

    #[test]
    fn test_hidden_cursors() {
        let raster = RasterBuffer::new(60, 60, Rgba::WHITE);
        let overlay = PresenceOverlay::build(&[actor_at(20.0, 20.0, Rgba::BLACK)], ToolKind::Pen);

        let mut renderer = SoftwareRenderer::new();
        let ctx = RenderContext::new(&raster, &overlay).with_cursors(false);
        renderer.build_scene(&ctx).unwrap();
        assert!(renderer.frame().unwrap().image().is_uniform(Rgba::WHITE));
    }

    #[test]
    fn test_larger_viewport_uses_background() {
        let raster = RasterBuffer::new(10, 10, Rgba::BLACK);
        let overlay = PresenceOverlay::default();
        let gray = Rgba::rgb(0xfa, 0xfa, 0xfa);

        let mut renderer = SoftwareRenderer::new();
        let ctx = RenderContext::new(&raster, &overlay)
            .with_viewport(Size::new(20.0, 15.0))
            .with_background(gray.into());
        renderer.build_scene(&ctx).unwrap();
        let frame = renderer.frame().unwrap();

        assert_eq!((frame.width(), frame.height()), (20, 15));
        assert_eq!(frame.pixel(9, 9), Some(Rgba::BLACK));
        assert_eq!(frame.pixel(15, 5), Some(gray));
        assert_eq!(frame.pixel(5, 12), Some(gray));
    }

    #[test]
    fn test_empty_viewport_fails() {
        let raster = RasterBuffer::new(10, 10, Rgba::WHITE);
        let overlay = PresenceOverlay::default();
        let mut renderer = SoftwareRenderer::new();

        let ctx = RenderContext::new(&raster, &overlay).with_viewport(Size::ZERO);
        assert!(matches!(renderer.build_scene(&ctx), Err(RendererError::RenderFailed(_))));
        assert!(matches!(renderer.take_frame(), Err(RendererError::NoFrame)));
    }

    #[test]
    fn test_cursor_path_scales() {
        let path = cursor_path(Point::new(10.0, 10.0), 2.0);
        let bounds = path.bounding_box();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 46.0).abs() < f64::EPSILON);
    }
}

//! Pixel buffer backing the drawing surface.

use crate::color::Rgba;
use kurbo::{Point, Size, Vec2};

/// Upper bound on samples along a hairline segment.
const MAX_HAIRLINE_STEPS: f64 = 65_536.0;

/// A flattened, single-layer pixel surface (row-major).
///
/// There is no history: every stroke is composited straight into the pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl RasterBuffer {
    /// Allocate a buffer filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Iterate over rows of pixels, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgba]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Get a pixel, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set a pixel. Returns false if the coordinate is outside the buffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    /// Overwrite every pixel.
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Check that every pixel equals `color`.
    pub fn is_uniform(&self, color: Rgba) -> bool {
        self.pixels.iter().all(|&p| p == color)
    }

    /// Paint a round-capped segment of the given width.
    ///
    /// Every pixel whose centre lies within `width / 2` of the closed segment
    /// `a`-`b` takes `color`. A zero-length segment paints a dot. Brushes under
    /// one pixel also trace the pixels under the segment, so the mark stays
    /// visible and connected. Returns the number of pixels written.
    pub fn stroke_segment(&mut self, a: Point, b: Point, width: f64, color: Rgba) -> usize {
        if self.width == 0 || self.height == 0 {
            return 0;
        }

        let radius = width.max(0.0) / 2.0;
        let max_x = i64::from(self.width) - 1;
        let max_y = i64::from(self.height) - 1;

        let x0 = ((a.x.min(b.x) - radius - 0.5).floor() as i64).max(0);
        let x1 = ((a.x.max(b.x) + radius).ceil() as i64).min(max_x);
        let y0 = ((a.y.min(b.y) - radius - 0.5).floor() as i64).max(0);
        let y1 = ((a.y.max(b.y) + radius).ceil() as i64).min(max_y);

        let mut painted = 0;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if segment_distance(center, a, b) <= radius {
                    // In range by construction of the clamped bounds.
                    self.set_pixel(x as u32, y as u32, color);
                    painted += 1;
                }
            }
        }

        if radius < 0.5 {
            painted += self.trace_hairline(a, b, radius, color);
        }

        painted
    }

    /// One-pixel line under `a`-`b`, skipping pixels the capsule already took.
    fn trace_hairline(&mut self, a: Point, b: Point, radius: f64, color: Rgba) -> usize {
        let span = (b.x - a.x).abs().max((b.y - a.y).abs());
        let steps = span.ceil().clamp(1.0, MAX_HAIRLINE_STEPS) as u32;

        let mut last = None;
        let mut painted = 0;
        for i in 0..=steps {
            let p = a.lerp(b, f64::from(i) / f64::from(steps));
            if !(p.x >= 0.0 && p.y >= 0.0) {
                continue;
            }
            let pixel = (p.x.floor() as u32, p.y.floor() as u32);
            if last == Some(pixel) {
                continue;
            }
            last = Some(pixel);

            let center = Point::new(f64::from(pixel.0) + 0.5, f64::from(pixel.1) + 0.5);
            if segment_distance(center, a, b) > radius && self.set_pixel(pixel.0, pixel.1, color) {
                painted += 1;
            }
        }
        painted
    }

    /// Copy `self` into a new buffer of the given size, anchored at the origin.
    ///
    /// Content outside the new bounds is clipped; newly exposed area is
    /// `background`. Nothing is scaled.
    pub fn resized(&self, width: u32, height: u32, background: Rgba) -> RasterBuffer {
        let mut next = RasterBuffer::new(width, height, background);
        let copy_w = self.width.min(width) as usize;
        let copy_h = self.height.min(height) as usize;
        if copy_w == 0 {
            return next;
        }

        for y in 0..copy_h {
            let src = y * self.width as usize;
            let dst = y * width as usize;
            next.pixels[dst..dst + copy_w].copy_from_slice(&self.pixels[src..src + copy_w]);
        }
        next
    }
}

/// Distance from `point` to the closed segment `start`-`end`.
pub fn segment_distance(point: Point, start: Point, end: Point) -> f64 {
    let line_vec = Vec2::new(end.x - start.x, end.y - start.y);
    let point_vec = Vec2::new(point.x - start.x, point.y - start.y);

    let line_len_sq = line_vec.hypot2();
    if line_len_sq < f64::EPSILON {
        return point_vec.hypot();
    }

    let t = (point_vec.dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    let projection = Point::new(start.x + t * line_vec.x, start.y + t * line_vec.y);
    ((point.x - projection.x).powi(2) + (point.y - projection.y).powi(2)).sqrt()
}

//! Keeps the raster sized to its container without losing drawn content.
//!
//! Content is never scaled: it is re-anchored at the origin, so shrinking the
//! container permanently clips whatever falls outside the new bounds.

use crate::color::Rgba;
use crate::raster::RasterBuffer;
use kurbo::Size;

/// Pixel dimensions for a container size (fractional pixels are dropped).
pub fn pixel_dimensions(size: Size) -> (u32, u32) {
    let dim = |v: f64| if v.is_finite() && v > 0.0 { v.floor().min(f64::from(u32::MAX)) as u32 } else { 0 };
    (dim(size.width), dim(size.height))
}

/// Reconcile `current` with a newly observed container size.
///
/// Snapshots the current pixels, reallocates at the new size and restores the
/// snapshot at (0, 0). An unmeasured surface gets a fresh `background`
/// buffer; a zero-area container releases the buffer.
pub fn reconcile(current: Option<RasterBuffer>, size: Size, background: Rgba) -> Option<RasterBuffer> {
    let (width, height) = pixel_dimensions(size);
    if width == 0 || height == 0 {
        return None;
    }

    match current {
        Some(raster) if raster.width() == width && raster.height() == height => Some(raster),
        Some(raster) => Some(raster.resized(width, height, background)),
        None => Some(RasterBuffer::new(width, height, background)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_dimensions() {
        assert_eq!(pixel_dimensions(Size::new(640.7, 480.2)), (640, 480));
        assert_eq!(pixel_dimensions(Size::new(-1.0, 10.0)), (0, 10));
        assert_eq!(pixel_dimensions(Size::new(f64::NAN, 10.0)), (0, 10));
    }

    #[test]
    fn test_first_measure_allocates() {
        let raster = reconcile(None, Size::new(8.0, 6.0), Rgba::WHITE).unwrap();
        assert_eq!((raster.width(), raster.height()), (8, 6));
        assert!(raster.is_uniform(Rgba::WHITE));
    }

    #[test]
    fn test_zero_area_releases() {
        let raster = RasterBuffer::new(8, 6, Rgba::WHITE);
        assert!(reconcile(Some(raster), Size::new(0.0, 6.0), Rgba::WHITE).is_none());
    }

    #[test]
    fn test_same_size_is_untouched() {
        let mut raster = RasterBuffer::new(8, 6, Rgba::WHITE);
        raster.set_pixel(7, 5, Rgba::BLACK);
        let kept = reconcile(Some(raster.clone()), Size::new(8.0, 6.0), Rgba::WHITE).unwrap();
        assert_eq!(kept, raster);
    }

    #[test]
    fn test_shrink_then_grow_clips() {
        let mut raster = RasterBuffer::new(10, 10, Rgba::WHITE);
        raster.set_pixel(2, 2, Rgba::BLACK);
        raster.set_pixel(8, 8, Rgba::BLACK);

        let shrunk = reconcile(Some(raster), Size::new(5.0, 5.0), Rgba::WHITE);
        let regrown = reconcile(shrunk, Size::new(10.0, 10.0), Rgba::WHITE).unwrap();

        assert_eq!(regrown.pixel(2, 2), Some(Rgba::BLACK));
        // Clipped content does not come back.
        assert_eq!(regrown.pixel(8, 8), Some(Rgba::WHITE));
    }
}

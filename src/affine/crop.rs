use crate::color::PixelColor;
use crate::error::Result;
use crate::geometry::{clamp_region, Rectangle};
use crate::image::{ImageView, PixelBuffer};
use crate::processor::{ImageProcessor, Pipeline, RowContext};
use log::debug;
use std::ops::Range;

/// Cuts the requested rectangle out of the source.
///
/// The canvas is resized to the clamped region. Target pixel `(x, y)` reads
/// source `(x + offset_x, y + offset_y)`, so a rectangle hanging off the
/// top-left edge yields the same pixels as the buffer-relative rectangle of
/// the clamped size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CropProcessor;

impl CropProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl<C: PixelColor> ImageProcessor<C> for CropProcessor {
    fn name(&self) -> &'static str {
        "crop"
    }

    fn clones_source(&self) -> bool {
        false
    }

    fn setup(
        &self,
        target: &mut PixelBuffer<C>,
        source: &mut PixelBuffer<C>,
        source_rect: Rectangle,
        _pipeline: &Pipeline,
    ) -> Result<()> {
        let region = clamp_region(source_rect, source.width(), source.height());
        let (w, h) = (region.width(), region.height());
        debug!("crop: {source_rect:?} -> {w}x{h}");
        target.set_pixels(w, h, vec![C::default(); w * h])
    }

    fn rows(&self, ctx: &RowContext<'_, C>) -> Range<usize> {
        0..ctx.region.height()
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        let region = &ctx.region;
        let sy = y + region.offset_y;
        for (x, pixel) in row.iter_mut().enumerate().take(region.width()) {
            *pixel = ctx.source[(x + region.offset_x, sy)];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;

    fn numbered(w: usize, h: usize) -> PixelBuffer<Rgba8> {
        let data = (0..w * h).map(|i| Rgba8::new(i as u8, 0, 0, 255)).collect();
        PixelBuffer::from_pixels(w, h, data).unwrap()
    }

    #[test]
    fn crops_inner_rectangle() {
        let mut img = numbered(5, 4);
        Pipeline::new()
            .process(&CropProcessor, &mut img, Rectangle::new(1, 2, 3, 2))
            .unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        let reds: Vec<u8> = img.pixels().iter().map(|p| p.r).collect();
        assert_eq!(reds, vec![11, 12, 13, 16, 17, 18]);
    }

    #[test]
    fn overhanging_rectangle_matches_clamped_one() {
        let pipeline = Pipeline::new();
        let mut overhang = numbered(5, 4);
        pipeline
            .process(&CropProcessor, &mut overhang, Rectangle::new(-2, -1, 4, 3))
            .unwrap();
        let mut clamped = numbered(5, 4);
        pipeline
            .process(&CropProcessor, &mut clamped, Rectangle::new(0, 0, 2, 2))
            .unwrap();
        assert_eq!(overhang, clamped);
    }

    #[test]
    fn far_edge_overhang_is_trimmed() {
        let mut img = numbered(5, 4);
        Pipeline::new()
            .process(&CropProcessor, &mut img, Rectangle::new(3, 2, 10, 10))
            .unwrap();
        assert_eq!((img.width(), img.height()), (2, 2));
        assert_eq!(img.get(0, 0).r, 13);
        assert_eq!(img.get(1, 1).r, 19);
    }
}

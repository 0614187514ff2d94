use crate::color::{ColorVector, PixelColor};
use crate::error::{ensure_range, Result};
use crate::processor::{ImageProcessor, RowContext};

/// Scales every pixel's alpha by a fixed factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaProcessor {
    factor: f32,
}

impl AlphaProcessor {
    /// `percent` of the current alpha to keep, in `[0, 100]`.
    pub fn new(percent: f32) -> Result<Self> {
        ensure_range("percent", percent, 0.0, 100.0)?;
        Ok(Self {
            factor: percent / 100.0,
        })
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }
}

impl<C: PixelColor> ImageProcessor<C> for AlphaProcessor {
    fn name(&self) -> &'static str {
        "alpha"
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        let scale = ColorVector::new(1.0, 1.0, 1.0, self.factor);
        for x in ctx.region.columns() {
            let color = ctx.source[(x, y)].to_vector();
            row[x] = C::from_vector(color.component_mul(&scale));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;
    use crate::image::PixelBuffer;
    use crate::processor::Pipeline;

    #[test]
    fn full_percent_is_identity() {
        let data = (0..12u8).map(|i| Rgba8::new(i * 20, 255 - i, i, i * 21)).collect();
        let mut img = PixelBuffer::from_pixels(4, 3, data).unwrap();
        let before = img.clone();
        Pipeline::new()
            .process_all(&AlphaProcessor::new(100.0).unwrap(), &mut img)
            .unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn half_percent_halves_alpha_only() {
        let mut img = PixelBuffer::filled(2, 2, Rgba8::new(10, 20, 30, 200)).unwrap();
        Pipeline::new()
            .process_all(&AlphaProcessor::new(50.0).unwrap(), &mut img)
            .unwrap();
        assert!(img.pixels().iter().all(|&p| p == Rgba8::new(10, 20, 30, 100)));
    }

    #[test]
    fn rejects_out_of_range_percent() {
        assert!(AlphaProcessor::new(-1.0).is_err());
        assert!(AlphaProcessor::new(100.5).is_err());
    }
}

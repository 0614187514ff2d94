use super::presets::grayscale_bt601;
use crate::color::{black, white, ColorVector, PixelColor, Rgba32F};
use crate::error::{ensure_range, Result};
use crate::geometry::Rectangle;
use crate::image::PixelBuffer;
use crate::processor::{ImageProcessor, Pipeline, RowContext};

/// Two-level quantisation on luma.
///
/// The region is converted to grayscale during setup; afterwards a pixel
/// becomes `upper` when its luma is at least `threshold`, else `lower`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinaryThresholdProcessor {
    threshold: f32,
    upper: ColorVector,
    lower: ColorVector,
}

impl BinaryThresholdProcessor {
    /// `threshold` in `[0, 1]`; white above, black below.
    pub fn new(threshold: f32) -> Result<Self> {
        ensure_range("threshold", threshold, 0.0, 1.0)?;
        Ok(Self {
            threshold,
            upper: white::<Rgba32F>().to_vector(),
            lower: black::<Rgba32F>().to_vector(),
        })
    }

    pub fn with_colors<C: PixelColor>(mut self, upper: C, lower: C) -> Self {
        self.upper = upper.to_vector();
        self.lower = lower.to_vector();
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl<C: PixelColor> ImageProcessor<C> for BinaryThresholdProcessor {
    fn name(&self) -> &'static str {
        "binary-threshold"
    }

    fn setup(
        &self,
        _target: &mut PixelBuffer<C>,
        source: &mut PixelBuffer<C>,
        source_rect: Rectangle,
        pipeline: &Pipeline,
    ) -> Result<()> {
        pipeline
            .nested()
            .process(&grayscale_bt601(), source, source_rect)?;
        Ok(())
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        let upper = C::from_vector(self.upper);
        let lower = C::from_vector(self.lower);
        for x in ctx.region.columns() {
            let luma = ctx.source[(x, y)].to_vector().x;
            row[x] = if luma >= self.threshold { upper } else { lower };
        }
    }
}

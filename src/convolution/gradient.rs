//! Gradient-magnitude convolution.
//!
//! - Convolves an X and a Y kernel over the same neighbourhood, clamped at
//!   the buffer border.
//! - Combines the two responses per channel as `sqrt(gx² + gy²)`; the
//!   responses are never chained.
//!
//! Flat regions therefore map to zero everywhere, borders included.
use super::dense::{convolve_rgb, write_rgb};
use super::kernel::Kernel2D;
use crate::color::PixelColor;
use crate::processor::{ImageProcessor, RowContext};

#[derive(Clone, Debug, PartialEq)]
pub struct GradientProcessor {
    kernel_x: Kernel2D,
    kernel_y: Kernel2D,
}

impl GradientProcessor {
    pub fn new(kernel_x: Kernel2D, kernel_y: Kernel2D) -> Self {
        Self { kernel_x, kernel_y }
    }

    pub fn kernel_x(&self) -> &Kernel2D {
        &self.kernel_x
    }

    pub fn kernel_y(&self) -> &Kernel2D {
        &self.kernel_y
    }
}

impl<C: PixelColor> ImageProcessor<C> for GradientProcessor {
    fn name(&self) -> &'static str {
        "gradient"
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        for x in ctx.region.columns() {
            let gx = convolve_rgb(&ctx.source, &self.kernel_x, x, y);
            let gy = convolve_rgb(&ctx.source, &self.kernel_y, x, y);
            let magnitude = gx.zip_map(&gy, |a, b| (a * a + b * b).sqrt());
            write_rgb(&mut row[x], magnitude);
        }
    }
}

//! Dense 2D convolution.
//!
//! Every target pixel in the region is the weighted sum of its source
//! neighbourhood over R, G and B. Samples that fall off the buffer are
//! clamped to the nearest edge pixel. Alpha is kept from the pixel already in
//! the target, so a convolution layered on a prior pass keeps that pass's
//! transparency.
//!
//! Complexity: O(rows·cols) per pixel.
use super::kernel::Kernel2D;
use crate::color::{ColorVector, PixelColor};
use crate::image::PixelView;
use crate::processor::{ImageProcessor, RowContext};
use nalgebra::Vector3;

/// Weighted RGB sum of the neighbourhood of `(x, y)` with edge replication.
#[inline]
pub(crate) fn convolve_rgb<C: PixelColor>(
    source: &PixelView<'_, C>,
    kernel: &Kernel2D,
    x: usize,
    y: usize,
) -> Vector3<f32> {
    let ry = kernel.radius_y() as isize;
    let rx = kernel.radius_x() as isize;
    let mut acc = Vector3::zeros();
    for fy in 0..kernel.rows() {
        let sy = y as isize + fy as isize - ry;
        for fx in 0..kernel.cols() {
            let sx = x as isize + fx as isize - rx;
            acc += source.get_clamped(sx, sy).to_vector().xyz() * kernel.weight(fy, fx);
        }
    }
    acc
}

/// Replace the colour channels of `pixel`, keeping its alpha.
#[inline]
pub(crate) fn write_rgb<C: PixelColor>(pixel: &mut C, rgb: Vector3<f32>) {
    let alpha = pixel.to_vector().w;
    *pixel = C::from_vector(ColorVector::new(rgb.x, rgb.y, rgb.z, alpha));
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConvolutionProcessor {
    kernel: Kernel2D,
}

impl ConvolutionProcessor {
    pub fn new(kernel: Kernel2D) -> Self {
        Self { kernel }
    }

    pub fn kernel(&self) -> &Kernel2D {
        &self.kernel
    }
}

impl<C: PixelColor> ImageProcessor<C> for ConvolutionProcessor {
    fn name(&self) -> &'static str {
        "convolution"
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        for x in ctx.region.columns() {
            let rgb = convolve_rgb(&ctx.source, &self.kernel, x, y);
            write_rgb(&mut row[x], rgb);
        }
    }
}

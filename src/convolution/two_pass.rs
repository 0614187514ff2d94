//! Sequential separable convolution.
//!
//! A horizontal pass runs during setup, rewriting the source rows the
//! vertical pass will read (the region grown by the vertical radius). The
//! vertical pass is the parallel phase proper. Both passes clamp samples to
//! the buffer edges, like the dense engine.
//!
//! Complexity: O(kx + ky) per pixel.
use super::dense::write_rgb;
use super::kernel::Kernel1D;
use crate::color::PixelColor;
use crate::error::Result;
use crate::geometry::Rectangle;
use crate::image::{PixelBuffer, PixelView};
use crate::processor::{ImageProcessor, Pipeline, RowContext};
use nalgebra::Vector3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

#[inline]
fn convolve_axis<C: PixelColor>(
    source: &PixelView<'_, C>,
    kernel: &Kernel1D,
    axis: Axis,
    x: usize,
    y: usize,
) -> Vector3<f32> {
    let r = kernel.radius() as isize;
    let mut acc = Vector3::zeros();
    for (i, &tap) in kernel.taps().iter().enumerate() {
        let d = i as isize - r;
        let (sx, sy) = match axis {
            Axis::Horizontal => (x as isize + d, y as isize),
            Axis::Vertical => (x as isize, y as isize + d),
        };
        acc += source.get_clamped(sx, sy).to_vector().xyz() * tap;
    }
    acc
}

/// One 1D pass, used for the horizontal half during setup.
struct LinearPass<'k> {
    kernel: &'k Kernel1D,
    axis: Axis,
}

impl<C: PixelColor> ImageProcessor<C> for LinearPass<'_> {
    fn name(&self) -> &'static str {
        "linear-pass"
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        for x in ctx.region.columns() {
            let rgb = convolve_axis(&ctx.source, self.kernel, self.axis, x, y);
            write_rgb(&mut row[x], rgb);
        }
    }
}

/// Horizontal kernel followed by vertical kernel.
#[derive(Clone, Debug, PartialEq)]
pub struct SeparableProcessor {
    horizontal: Kernel1D,
    vertical: Kernel1D,
}

impl SeparableProcessor {
    pub fn new(horizontal: Kernel1D, vertical: Kernel1D) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Same taps on both axes.
    pub fn symmetric(kernel: Kernel1D) -> Self {
        Self::new(kernel.clone(), kernel)
    }

    pub fn horizontal(&self) -> &Kernel1D {
        &self.horizontal
    }

    pub fn vertical(&self) -> &Kernel1D {
        &self.vertical
    }
}

impl<C: PixelColor> ImageProcessor<C> for SeparableProcessor {
    fn name(&self) -> &'static str {
        "separable"
    }

    fn setup(
        &self,
        _target: &mut PixelBuffer<C>,
        source: &mut PixelBuffer<C>,
        source_rect: Rectangle,
        pipeline: &Pipeline,
    ) -> Result<()> {
        let r = self.vertical.radius() as i32;
        let rows = Rectangle::new(
            source_rect.x,
            source_rect.y - r,
            source_rect.width,
            source_rect.height + 2 * r,
        );
        let pass = LinearPass {
            kernel: &self.horizontal,
            axis: Axis::Horizontal,
        };
        let mut first = source.clone();
        pipeline.nested().apply(&pass, &mut first, source, rows)?;
        *source = first;
        Ok(())
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        for x in ctx.region.columns() {
            let rgb = convolve_axis(&ctx.source, &self.vertical, Axis::Vertical, x, y);
            write_rgb(&mut row[x], rgb);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba32F;
    use crate::convolution::dense::ConvolutionProcessor;
    use crate::convolution::kernel::Kernel2D;
    use crate::image::ImageView;

    fn noise(w: usize, h: usize) -> PixelBuffer<Rgba32F> {
        let data = (0..w * h)
            .map(|i| {
                let v = ((i * 37 + 11) % 17) as f32 / 16.0;
                Rgba32F::new(v, 1.0 - v, v * 0.5, 1.0)
            })
            .collect();
        PixelBuffer::from_pixels(w, h, data).unwrap()
    }

    #[test]
    fn matches_dense_outer_product() {
        let taps = [0.25f32, 0.5, 0.25];
        let mut dense = Vec::with_capacity(9);
        for a in taps {
            for b in taps {
                dense.push(a * b);
            }
        }
        let mut separable = noise(6, 5);
        let mut reference = separable.clone();

        let pipeline = Pipeline::new();
        pipeline
            .process_all(
                &SeparableProcessor::symmetric(Kernel1D::new(taps.to_vec()).unwrap()),
                &mut separable,
            )
            .unwrap();
        pipeline
            .process_all(
                &ConvolutionProcessor::new(Kernel2D::new(3, 3, dense).unwrap()),
                &mut reference,
            )
            .unwrap();

        for (a, b) in separable.pixels().iter().zip(reference.pixels()) {
            assert!((a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5);
        }
    }

    #[test]
    fn sub_region_reads_rows_outside_it() {
        let mut full = noise(5, 7);
        let mut part = full.clone();
        let kernel = SeparableProcessor::symmetric(Kernel1D::gaussian(1.0).unwrap());
        let pipeline = Pipeline::new();
        pipeline.process_all(&kernel, &mut full).unwrap();
        pipeline
            .process(&kernel, &mut part, Rectangle::new(0, 2, 5, 3))
            .unwrap();
        for y in 2..5 {
            for x in 0..5 {
                let (a, b) = (full.get(x, y), part.get(x, y));
                assert!((a.r - b.r).abs() < 1e-5, "({x}, {y})");
            }
        }
    }
}

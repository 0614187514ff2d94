//! Linear colour transforms.
//!
//! A [`ColorMatrix`] maps the colour channels of the canonical vector with a
//! 4x4 matrix in row-vector form: rows 1-3 hold the contribution of R, G and B
//! to each output channel and row 4 is a constant offset. Alpha is carried
//! through unchanged. When `compand` is set the channels are expanded to
//! linear light before the multiply and compressed afterwards.
//!
//! [`ColorMatrixProcessor`] applies one matrix per pixel and then runs its
//! post-composite list, in order, over the finished region. The named presets
//! in [`presets`] are nothing more than a matrix plus such a list.

pub mod presets;
pub mod threshold;

pub use self::presets::ColorBlindness;
pub use self::threshold::BinaryThresholdProcessor;

use crate::color::{compress, expand, ColorVector, PixelColor};
use crate::composite::{GlowProcessor, VignetteProcessor};
use crate::error::Result;
use crate::geometry::Rectangle;
use crate::image::{ImageView, PixelBuffer};
use crate::processor::{ImageProcessor, Pipeline, RowContext};
use nalgebra::{Matrix4, Vector4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix {
    matrix: Matrix4<f32>,
    compand: bool,
}

impl ColorMatrix {
    pub fn new(matrix: Matrix4<f32>, compand: bool) -> Self {
        Self { matrix, compand }
    }

    /// Rows in the order described in the module docs.
    pub fn from_rows(rows: [[f32; 4]; 4], compand: bool) -> Self {
        let [r, g, b, t] = rows;
        Self::new(
            Matrix4::new(
                r[0], r[1], r[2], r[3], //
                g[0], g[1], g[2], g[3], //
                b[0], b[1], b[2], b[3], //
                t[0], t[1], t[2], t[3],
            ),
            compand,
        )
    }

    /// 3x3 channel mix without offset.
    pub fn from_rgb(mix: [[f32; 3]; 3], compand: bool) -> Self {
        Self::from_affine(mix, [0.0; 3], compand)
    }

    /// 3x3 channel mix followed by a constant offset per channel.
    pub fn from_affine(mix: [[f32; 3]; 3], offset: [f32; 3], compand: bool) -> Self {
        let row = |m: [f32; 3]| [m[0], m[1], m[2], 0.0];
        Self::from_rows(
            [
                row(mix[0]),
                row(mix[1]),
                row(mix[2]),
                [offset[0], offset[1], offset[2], 1.0],
            ],
            compand,
        )
    }

    pub fn identity() -> Self {
        Self::new(Matrix4::identity(), false)
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    pub fn compand(&self) -> bool {
        self.compand
    }

    #[inline]
    pub fn transform(&self, color: ColorVector) -> ColorVector {
        let v = if self.compand { expand(color) } else { color };
        let mixed = self.matrix.tr_mul(&Vector4::new(v.x, v.y, v.z, 1.0));
        let out = ColorVector::new(mixed.x, mixed.y, mixed.z, v.w);
        if self.compand {
            compress(out)
        } else {
            out
        }
    }
}

/// Secondary effect layered over the region after the matrix pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PostComposite {
    Vignette(VignetteProcessor),
    /// Glow whose radius is a fraction of the target's width at the time it
    /// runs.
    Glow {
        glow: GlowProcessor,
        width_fraction: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorMatrixProcessor {
    name: &'static str,
    matrix: ColorMatrix,
    post: Vec<PostComposite>,
}

impl ColorMatrixProcessor {
    pub fn new(matrix: ColorMatrix) -> Self {
        Self::named("color-matrix", matrix)
    }

    pub(crate) fn named(name: &'static str, matrix: ColorMatrix) -> Self {
        Self {
            name,
            matrix,
            post: Vec::new(),
        }
    }

    pub fn then(mut self, composite: PostComposite) -> Self {
        self.post.push(composite);
        self
    }

    pub fn matrix(&self) -> &ColorMatrix {
        &self.matrix
    }

    pub fn post_composites(&self) -> &[PostComposite] {
        &self.post
    }
}

impl<C: PixelColor> ImageProcessor<C> for ColorMatrixProcessor {
    fn name(&self) -> &'static str {
        self.name
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        for x in ctx.region.columns() {
            let color = ctx.source[(x, y)].to_vector();
            row[x] = C::from_vector(self.matrix.transform(color));
        }
    }

    fn post_process(
        &self,
        target: &mut PixelBuffer<C>,
        source_rect: Rectangle,
        pipeline: &Pipeline,
    ) -> Result<()> {
        let nested = pipeline.nested();
        for composite in &self.post {
            match *composite {
                PostComposite::Vignette(vignette) => {
                    nested.process(&vignette, target, source_rect)?;
                }
                PostComposite::Glow {
                    glow,
                    width_fraction,
                } => {
                    let glow = glow.with_radius(target.width() as f32 * width_fraction)?;
                    nested.process(&glow, target, source_rect)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgba32F, Rgba8};

    fn approx_eq(a: ColorVector, b: ColorVector) -> bool {
        (a - b).abs().max() < 1e-5
    }

    #[test]
    fn rows_mix_channels_and_offset_is_added() {
        // Swap red and blue, then lift green by 0.1.
        let m = ColorMatrix::from_affine(
            [[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
            [0.0, 0.1, 0.0],
            false,
        );
        let out = m.transform(ColorVector::new(0.2, 0.3, 0.9, 0.5));
        assert!(approx_eq(out, ColorVector::new(0.9, 0.4, 0.2, 0.5)), "{out:?}");
    }

    #[test]
    fn identity_with_compand_round_trips() {
        let m = ColorMatrix::new(Matrix4::identity(), true);
        let v = ColorVector::new(0.25, 0.5, 0.75, 0.4);
        assert!(approx_eq(m.transform(v), v));
    }

    #[test]
    fn alpha_survives_any_matrix() {
        let m = ColorMatrix::from_rows([[2.0; 4], [2.0; 4], [2.0; 4], [5.0; 4]], false);
        assert_eq!(m.transform(ColorVector::new(0.1, 0.1, 0.1, 0.3)).w, 0.3);
    }

    #[test]
    fn post_composites_run_after_matrix() {
        let processor = ColorMatrixProcessor::new(ColorMatrix::identity())
            .then(PostComposite::Vignette(VignetteProcessor::new(Rgba8::new(0, 0, 0, 255))));
        let mut img = PixelBuffer::filled(9, 9, Rgba32F::new(1.0, 1.0, 1.0, 1.0)).unwrap();
        Pipeline::new().process_all(&processor, &mut img).unwrap();
        assert_eq!(img.get(4, 4), Rgba32F::new(1.0, 1.0, 1.0, 1.0));
        // Corner: d = 4√2, max = 4.5√2, so t = 1 - 0.9 * 4 / 4.5 = 0.2.
        let corner = img.get(0, 0).to_vector();
        assert!(
            approx_eq(corner, ColorVector::new(0.2, 0.2, 0.2, 1.0)),
            "{corner:?}"
        );
        // Edge midpoint: d = 4, so it keeps more of the source than the corner.
        assert!(img.get(0, 4).r > corner.x);
    }
}

//! Inverse-mapped affine sampling.
//!
//! Every target pixel centre is moved into the source through the inverse of
//! the forward matrix, with both frames centred: the target on its own middle
//! and the source on the middle of the requested rectangle. The pixel is
//! copied when the mapped point lands inside the source buffer and left at
//! the canvas default otherwise. With `expand` set, setup first resizes the
//! canvas to the bounding box of the transformed rectangle.
use super::matrix;
use super::orientation::{FlipType, RotateType};
use crate::color::PixelColor;
use crate::error::{ensure_range, ProcessError, Result};
use crate::geometry::Rectangle;
use crate::image::{ImageView, PixelBuffer};
use crate::processor::{ImageProcessor, Pipeline, RowContext};
use log::debug;
use nalgebra::{Matrix3, Point2};
use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineProcessor {
    name: &'static str,
    forward: Matrix3<f32>,
    inverse: Matrix3<f32>,
    expand: bool,
}

impl AffineProcessor {
    /// Arbitrary forward matrix (pixel space, y down). Only the upper 2x3
    /// block is meaningful.
    pub fn new(forward: Matrix3<f32>) -> Result<Self> {
        Self::named("affine", forward)
    }

    fn named(name: &'static str, forward: Matrix3<f32>) -> Result<Self> {
        if forward.determinant().abs() < 1e-6 {
            return Err(ProcessError::SingularTransform);
        }
        let inverse = forward
            .try_inverse()
            .ok_or(ProcessError::SingularTransform)?;
        Ok(Self {
            name,
            forward,
            inverse,
            expand: true,
        })
    }

    /// Clockwise rotation by `degrees` in `[-360, 360]`.
    pub fn rotate(degrees: f32) -> Result<Self> {
        ensure_range("degrees", degrees, -360.0, 360.0)?;
        Self::named("rotate", matrix::rotation(degrees))
    }

    /// Shear by `degrees_x` along x and `degrees_y` along y, each in
    /// `[-89, 89]`.
    pub fn skew(degrees_x: f32, degrees_y: f32) -> Result<Self> {
        ensure_range("degrees_x", degrees_x, -89.0, 89.0)?;
        ensure_range("degrees_y", degrees_y, -89.0, 89.0)?;
        Self::named("skew", matrix::skew(degrees_x, degrees_y))
    }

    pub fn rotate_right_angle(rotate: RotateType) -> Self {
        let forward = matrix::right_angle(rotate);
        Self {
            name: "rotate-right-angle",
            forward,
            // Orthogonal: inverse is the transpose.
            inverse: forward.transpose(),
            expand: true,
        }
    }

    pub fn flip(flip: FlipType) -> Self {
        let forward = matrix::flip(flip);
        Self {
            name: "flip",
            forward,
            inverse: forward,
            expand: true,
        }
    }

    /// Keep the source's canvas size instead of growing to fit.
    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn forward(&self) -> &Matrix3<f32> {
        &self.forward
    }

    pub fn expand(&self) -> bool {
        self.expand
    }
}

impl<C: PixelColor> ImageProcessor<C> for AffineProcessor {
    fn name(&self) -> &'static str {
        self.name
    }

    fn clones_source(&self) -> bool {
        false
    }

    fn setup(
        &self,
        target: &mut PixelBuffer<C>,
        _source: &mut PixelBuffer<C>,
        source_rect: Rectangle,
        _pipeline: &Pipeline,
    ) -> Result<()> {
        if !self.expand {
            return Ok(());
        }
        let (w, h) = matrix::bounding_size(
            &self.forward,
            source_rect.width as f32,
            source_rect.height as f32,
        );
        if (w, h) != (target.width(), target.height()) {
            debug!(
                "{}: canvas {}x{} -> {w}x{h}",
                self.name,
                target.width(),
                target.height()
            );
            *target = PixelBuffer::new(w, h)?;
        }
        Ok(())
    }

    fn rows(&self, ctx: &RowContext<'_, C>) -> Range<usize> {
        0..ctx.target_height
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        let rect = &ctx.source_rect;
        let sx = rect.x as f32 + rect.width as f32 * 0.5;
        let sy = rect.y as f32 + rect.height as f32 * 0.5;
        let tx = ctx.target_width as f32 * 0.5;
        let ty = ctx.target_height as f32 * 0.5;
        let py = y as f32 + 0.5 - ty;
        for (x, pixel) in row.iter_mut().enumerate() {
            let p = self
                .inverse
                .transform_point(&Point2::new(x as f32 + 0.5 - tx, py));
            let src_x = (p.x + sx).floor() as isize;
            let src_y = (p.y + sy).floor() as isize;
            if let Some(color) = ctx.source.get_checked(src_x, src_y) {
                *pixel = color;
            }
        }
    }
}

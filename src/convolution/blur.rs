use super::dense::ConvolutionProcessor;
use super::kernel::{Kernel1D, Kernel2D, MAX_RADIUS};
use super::two_pass::SeparableProcessor;
use crate::color::PixelColor;
use crate::error::{ensure_range, Result};
use crate::geometry::Rectangle;
use crate::image::PixelBuffer;
use crate::processor::{ImageProcessor, Pipeline, RowContext};

/// Mean filter over a `(2r+1)²` window.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxBlur {
    radius: usize,
    inner: ConvolutionProcessor,
}

impl BoxBlur {
    pub const DEFAULT_RADIUS: usize = 7;

    pub fn new(radius: usize) -> Result<Self> {
        ensure_range("radius", radius as f64, 1.0, MAX_RADIUS as f64)?;
        Ok(Self {
            radius,
            inner: ConvolutionProcessor::new(Kernel2D::box_blur(radius)?),
        })
    }

    pub fn radius(&self) -> usize {
        self.radius
    }
}

impl Default for BoxBlur {
    fn default() -> Self {
        Self {
            radius: Self::DEFAULT_RADIUS,
            inner: ConvolutionProcessor::new(Kernel2D::uniform(Self::DEFAULT_RADIUS)),
        }
    }
}

impl<C: PixelColor> ImageProcessor<C> for BoxBlur {
    fn name(&self) -> &'static str {
        "box-blur"
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        self.inner.process_row(ctx, y, row);
    }
}

/// Gaussian blur with `2*ceil(sigma)+1` taps per axis.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianBlur {
    sigma: f32,
    inner: SeparableProcessor,
}

impl GaussianBlur {
    pub const DEFAULT_SIGMA: f32 = 3.0;

    pub fn new(sigma: f32) -> Result<Self> {
        Ok(Self {
            sigma,
            inner: SeparableProcessor::symmetric(Kernel1D::gaussian(sigma)?),
        })
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }
}

impl<C: PixelColor> ImageProcessor<C> for GaussianBlur {
    fn name(&self) -> &'static str {
        "gaussian-blur"
    }

    fn setup(
        &self,
        target: &mut PixelBuffer<C>,
        source: &mut PixelBuffer<C>,
        source_rect: Rectangle,
        pipeline: &Pipeline,
    ) -> Result<()> {
        self.inner.setup(target, source, source_rect, pipeline)
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        self.inner.process_row(ctx, y, row);
    }
}

/// Sharpen with an inverted Gaussian whose taps still sum to one.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianSharpen {
    sigma: f32,
    inner: SeparableProcessor,
}

impl GaussianSharpen {
    pub const DEFAULT_SIGMA: f32 = 3.0;

    pub fn new(sigma: f32) -> Result<Self> {
        Ok(Self {
            sigma,
            inner: SeparableProcessor::symmetric(Kernel1D::sharpen(sigma)?),
        })
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }
}

impl<C: PixelColor> ImageProcessor<C> for GaussianSharpen {
    fn name(&self) -> &'static str {
        "gaussian-sharpen"
    }

    fn setup(
        &self,
        target: &mut PixelBuffer<C>,
        source: &mut PixelBuffer<C>,
        source_rect: Rectangle,
        pipeline: &Pipeline,
    ) -> Result<()> {
        self.inner.setup(target, source, source_rect, pipeline)
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        self.inner.process_row(ctx, y, row);
    }
}

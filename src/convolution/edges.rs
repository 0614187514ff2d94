//! Edge detection.
//!
//! A detector is a kernel table (dense Laplacian-style operators) or an X/Y
//! kernel pair combined by gradient magnitude, plus an optional grayscale
//! pre-pass that rewrites the source region with BT.601 luma during setup.
//!
//! Tables follow the usual textbook weights; Roberts cross is embedded in
//! the lower-right 2x2 of a 3x3 so that every kernel has a centre cell.
use super::dense::ConvolutionProcessor;
use super::gradient::GradientProcessor;
use super::kernel::Kernel2D;
use crate::color::PixelColor;
use crate::color_matrix::presets::grayscale_bt601;
use crate::error::Result;
use crate::geometry::Rectangle;
use crate::image::PixelBuffer;
use crate::processor::{ImageProcessor, Pipeline, RowContext};
use serde::{Deserialize, Serialize};

type Kernel3 = [[f32; 3]; 3];
type Kernel5 = [[f32; 5]; 5];

const LAPLACIAN_3X3: Kernel3 = [[-1.0, -1.0, -1.0], [-1.0, 8.0, -1.0], [-1.0, -1.0, -1.0]];

const LAPLACIAN_5X5: Kernel5 = [
    [-1.0, -1.0, -1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0, -1.0, -1.0],
    [-1.0, -1.0, 24.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0, -1.0, -1.0],
];

const LAPLACIAN_OF_GAUSSIAN: Kernel5 = [
    [0.0, 0.0, -1.0, 0.0, 0.0],
    [0.0, -1.0, -2.0, -1.0, 0.0],
    [-1.0, -2.0, 16.0, -2.0, -1.0],
    [0.0, -1.0, -2.0, -1.0, 0.0],
    [0.0, 0.0, -1.0, 0.0, 0.0],
];

const SOBEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

const SCHARR_X: Kernel3 = [[-3.0, 0.0, 3.0], [-10.0, 0.0, 10.0], [-3.0, 0.0, 3.0]];
const SCHARR_Y: Kernel3 = [[3.0, 10.0, 3.0], [0.0, 0.0, 0.0], [-3.0, -10.0, -3.0]];

const PREWITT_X: Kernel3 = [[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]];
const PREWITT_Y: Kernel3 = [[1.0, 1.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -1.0, -1.0]];

const KAYYALI_X: Kernel3 = [[6.0, 0.0, -6.0], [0.0, 0.0, 0.0], [-6.0, 0.0, 6.0]];
const KAYYALI_Y: Kernel3 = [[-6.0, 0.0, 6.0], [0.0, 0.0, 0.0], [6.0, 0.0, -6.0]];

const KIRSCH_X: Kernel3 = [[5.0, 5.0, 5.0], [-3.0, 0.0, -3.0], [-3.0, -3.0, -3.0]];
const KIRSCH_Y: Kernel3 = [[5.0, -3.0, -3.0], [5.0, 0.0, -3.0], [5.0, -3.0, -3.0]];

const ROBERTS_X: Kernel3 = [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]];
const ROBERTS_Y: Kernel3 = [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, -1.0, 0.0]];

/// Built-in edge operators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeDetection {
    Kayyali,
    Kirsch,
    Laplacian3x3,
    Laplacian5x5,
    LaplacianOfGaussian,
    Prewitt,
    RobertsCross,
    Scharr,
    #[default]
    Sobel,
}

#[derive(Clone, Debug, PartialEq)]
enum EdgeOperator {
    Dense(ConvolutionProcessor),
    Gradient(GradientProcessor),
}

impl EdgeOperator {
    fn pair(x: Kernel3, y: Kernel3) -> Self {
        Self::Gradient(GradientProcessor::new(
            Kernel2D::from_table(x),
            Kernel2D::from_table(y),
        ))
    }
}

impl From<EdgeDetection> for EdgeOperator {
    fn from(detection: EdgeDetection) -> Self {
        match detection {
            EdgeDetection::Laplacian3x3 => {
                Self::Dense(ConvolutionProcessor::new(Kernel2D::from_table(LAPLACIAN_3X3)))
            }
            EdgeDetection::Laplacian5x5 => {
                Self::Dense(ConvolutionProcessor::new(Kernel2D::from_table(LAPLACIAN_5X5)))
            }
            EdgeDetection::LaplacianOfGaussian => Self::Dense(ConvolutionProcessor::new(
                Kernel2D::from_table(LAPLACIAN_OF_GAUSSIAN),
            )),
            EdgeDetection::Sobel => Self::pair(SOBEL_X, SOBEL_Y),
            EdgeDetection::Scharr => Self::pair(SCHARR_X, SCHARR_Y),
            EdgeDetection::Prewitt => Self::pair(PREWITT_X, PREWITT_Y),
            EdgeDetection::Kayyali => Self::pair(KAYYALI_X, KAYYALI_Y),
            EdgeDetection::Kirsch => Self::pair(KIRSCH_X, KIRSCH_Y),
            EdgeDetection::RobertsCross => Self::pair(ROBERTS_X, ROBERTS_Y),
        }
    }
}

/// Edge detector with an optional grayscale pre-pass (on by default).
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeDetector {
    operator: EdgeOperator,
    grayscale: bool,
}

impl EdgeDetector {
    pub fn new(detection: EdgeDetection) -> Self {
        Self {
            operator: detection.into(),
            grayscale: true,
        }
    }

    /// Detector from a custom dense kernel.
    pub fn from_kernel(kernel: Kernel2D) -> Self {
        Self {
            operator: EdgeOperator::Dense(ConvolutionProcessor::new(kernel)),
            grayscale: true,
        }
    }

    /// Detector from a custom X/Y kernel pair.
    pub fn from_pair(kernel_x: Kernel2D, kernel_y: Kernel2D) -> Self {
        Self {
            operator: EdgeOperator::Gradient(GradientProcessor::new(kernel_x, kernel_y)),
            grayscale: true,
        }
    }

    pub fn with_grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = grayscale;
        self
    }

    pub fn grayscale(&self) -> bool {
        self.grayscale
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(EdgeDetection::default())
    }
}

impl<C: PixelColor> ImageProcessor<C> for EdgeDetector {
    fn name(&self) -> &'static str {
        "edge-detector"
    }

    fn setup(
        &self,
        _target: &mut PixelBuffer<C>,
        source: &mut PixelBuffer<C>,
        source_rect: Rectangle,
        pipeline: &Pipeline,
    ) -> Result<()> {
        if self.grayscale {
            pipeline
                .nested()
                .process(&grayscale_bt601(), source, source_rect)?;
        }
        Ok(())
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        match &self.operator {
            EdgeOperator::Dense(op) => op.process_row(ctx, y, row),
            EdgeOperator::Gradient(op) => op.process_row(ctx, y, row),
        }
    }
}

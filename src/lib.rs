#![doc = include_str!("../README.md")]

// Core: pixels, regions, and the processor lifecycle.
pub mod color;
pub mod error;
pub mod geometry;
pub mod image;
pub mod processor;

// Transform families.
pub mod affine;
pub mod color_matrix;
pub mod composite;
pub mod convolution;
pub mod quantize;

// Tooling surface used by the CLI.
pub mod config;
pub mod diagnostics;

// --- High-level re-exports -------------------------------------------------

pub use crate::color::{PixelColor, Rgba32F, Rgba8};
pub use crate::error::{ProcessError, Result};
pub use crate::geometry::{clamp_region, ClampedRegion, Rectangle};
pub use crate::image::PixelBuffer;
pub use crate::processor::{ImageProcessor, ParallelOptions, Pipeline, RowContext, RowProgress};

// --- Prelude ---------------------------------------------------------------

/// Everything needed to build a buffer and run the bundled processors.
///
/// ```no_run
/// use pixel_pipeline::prelude::*;
///
/// # fn main() -> pixel_pipeline::Result<()> {
/// let mut image = PixelBuffer::filled(64, 48, Rgba8::new(200, 40, 40, 255))?;
/// let pipeline = Pipeline::new();
/// pipeline.process_all(&BoxBlur::new(3)?, &mut image)?;
/// pipeline.process(&presets::sepia(), &mut image, Rectangle::new(0, 0, 32, 48))?;
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::affine::{
        auto_orient, rotate_flip, AffineProcessor, CropProcessor, FlipType, Orientation,
        RotateType,
    };
    pub use crate::color::{ColorVector, PixelColor, Rgba32F, Rgba8};
    pub use crate::color_matrix::{
        presets, BinaryThresholdProcessor, ColorBlindness, ColorMatrix, ColorMatrixProcessor,
    };
    pub use crate::composite::{
        AlphaProcessor, BackgroundColorProcessor, BlendProcessor, GlowProcessor, VignetteProcessor,
    };
    pub use crate::convolution::{
        BoxBlur, ConvolutionProcessor, EdgeDetection, EdgeDetector, GaussianBlur, GaussianSharpen,
        Kernel1D, Kernel2D,
    };
    pub use crate::geometry::Rectangle;
    pub use crate::image::{ImageView, ImageViewMut, PixelBuffer};
    pub use crate::processor::{ImageProcessor, ParallelOptions, Pipeline};
    pub use crate::quantize::{quantize, PopularityQuantizer, Quantizer};
}

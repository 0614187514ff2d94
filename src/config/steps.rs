//! Tagged processing steps, one per processor.
use crate::affine::{rotate_flip, AffineProcessor, CropProcessor, FlipType, RotateType};
use crate::color::{black, white, Rgba8};
use crate::color_matrix::{presets, BinaryThresholdProcessor, ColorBlindness};
use crate::composite::{
    AlphaProcessor, BackgroundColorProcessor, BlendProcessor, GlowProcessor, VignetteProcessor,
};
use crate::convolution::{
    BoxBlur, ConvolutionProcessor, EdgeDetection, EdgeDetector, GaussianBlur, GaussianSharpen,
    Kernel2D,
};
use crate::error::Result as ProcessResult;
use crate::geometry::Rectangle;
use crate::image::io::load_rgba8_image;
use crate::image::{ImageView, PixelBuffer};
use crate::processor::{ImageProcessor, Pipeline};
use crate::quantize::{quantize, PopularityQuantizer};
use serde::Deserialize;
use std::path::PathBuf;

fn yes() -> bool {
    true
}

fn opaque_black() -> Rgba8 {
    black()
}

fn opaque_white() -> Rgba8 {
    white()
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Step {
    BoxBlur {
        radius: usize,
    },
    GaussianBlur {
        sigma: f32,
    },
    GaussianSharpen {
        sigma: f32,
    },
    EdgeDetect {
        #[serde(default)]
        operator: EdgeDetection,
        #[serde(default = "yes")]
        grayscale: bool,
    },
    /// Arbitrary dense kernel, row-major.
    Convolve {
        rows: usize,
        cols: usize,
        weights: Vec<f32>,
    },
    Grayscale,
    GrayscaleBt601,
    Sepia,
    BlackWhite,
    Kodachrome,
    Lomograph,
    Polaroid,
    Invert,
    ColorBlindness {
        kind: ColorBlindness,
    },
    Hue {
        degrees: f32,
    },
    Saturation {
        amount: f32,
    },
    Brightness {
        amount: f32,
    },
    Contrast {
        amount: f32,
    },
    BinaryThreshold {
        threshold: f32,
        #[serde(default = "opaque_white")]
        upper: Rgba8,
        #[serde(default = "opaque_black")]
        lower: Rgba8,
    },
    Alpha {
        percent: f32,
    },
    BackgroundColor {
        color: Rgba8,
    },
    Glow {
        #[serde(default = "opaque_black")]
        color: Rgba8,
        #[serde(default)]
        radius: Option<f32>,
    },
    Vignette {
        #[serde(default = "opaque_black")]
        color: Rgba8,
        #[serde(default)]
        radius_x: Option<f32>,
        #[serde(default)]
        radius_y: Option<f32>,
    },
    /// Overlay read from disk, anchored at the region origin.
    Blend {
        overlay: PathBuf,
        #[serde(default)]
        opacity: f32,
    },
    Rotate {
        degrees: f32,
        #[serde(default = "yes")]
        expand: bool,
    },
    Skew {
        degrees_x: f32,
        degrees_y: f32,
        #[serde(default = "yes")]
        expand: bool,
    },
    RotateFlip {
        #[serde(default)]
        rotate: RotateType,
        #[serde(default)]
        flip: FlipType,
    },
    Crop,
    Quantize {
        max_colors: usize,
        #[serde(default)]
        threshold: Option<f32>,
    },
}

impl Step {
    /// Stable label used in logs and timing reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BoxBlur { .. } => "boxBlur",
            Self::GaussianBlur { .. } => "gaussianBlur",
            Self::GaussianSharpen { .. } => "gaussianSharpen",
            Self::EdgeDetect { .. } => "edgeDetect",
            Self::Convolve { .. } => "convolve",
            Self::Grayscale => "grayscale",
            Self::GrayscaleBt601 => "grayscaleBt601",
            Self::Sepia => "sepia",
            Self::BlackWhite => "blackWhite",
            Self::Kodachrome => "kodachrome",
            Self::Lomograph => "lomograph",
            Self::Polaroid => "polaroid",
            Self::Invert => "invert",
            Self::ColorBlindness { .. } => "colorBlindness",
            Self::Hue { .. } => "hue",
            Self::Saturation { .. } => "saturation",
            Self::Brightness { .. } => "brightness",
            Self::Contrast { .. } => "contrast",
            Self::BinaryThreshold { .. } => "binaryThreshold",
            Self::Alpha { .. } => "alpha",
            Self::BackgroundColor { .. } => "backgroundColor",
            Self::Glow { .. } => "glow",
            Self::Vignette { .. } => "vignette",
            Self::Blend { .. } => "blend",
            Self::Rotate { .. } => "rotate",
            Self::Skew { .. } => "skew",
            Self::RotateFlip { .. } => "rotateFlip",
            Self::Crop => "crop",
            Self::Quantize { .. } => "quantize",
        }
    }

    /// Build the processor for steps that are a single pipeline pass.
    /// Returns `None` for the composite operations handled in [`StepConfig::apply`].
    fn processor(&self) -> ProcessResult<Option<Box<dyn ImageProcessor<Rgba8>>>> {
        let boxed: Box<dyn ImageProcessor<Rgba8>> = match self {
            Self::BoxBlur { radius } => Box::new(BoxBlur::new(*radius)?),
            Self::GaussianBlur { sigma } => Box::new(GaussianBlur::new(*sigma)?),
            Self::GaussianSharpen { sigma } => Box::new(GaussianSharpen::new(*sigma)?),
            Self::EdgeDetect {
                operator,
                grayscale,
            } => Box::new(EdgeDetector::new(*operator).with_grayscale(*grayscale)),
            Self::Convolve {
                rows,
                cols,
                weights,
            } => Box::new(ConvolutionProcessor::new(Kernel2D::new(
                *rows,
                *cols,
                weights.clone(),
            )?)),
            Self::Grayscale => Box::new(presets::grayscale_bt709()),
            Self::GrayscaleBt601 => Box::new(presets::grayscale_bt601()),
            Self::Sepia => Box::new(presets::sepia()),
            Self::BlackWhite => Box::new(presets::black_white()),
            Self::Kodachrome => Box::new(presets::kodachrome()),
            Self::Lomograph => Box::new(presets::lomograph()),
            Self::Polaroid => Box::new(presets::polaroid()),
            Self::Invert => Box::new(presets::invert()),
            Self::ColorBlindness { kind } => Box::new(presets::color_blindness(*kind)),
            Self::Hue { degrees } => Box::new(presets::hue(*degrees)?),
            Self::Saturation { amount } => Box::new(presets::saturation(*amount)?),
            Self::Brightness { amount } => Box::new(presets::brightness(*amount)?),
            Self::Contrast { amount } => Box::new(presets::contrast(*amount)?),
            Self::BinaryThreshold {
                threshold,
                upper,
                lower,
            } => Box::new(BinaryThresholdProcessor::new(*threshold)?.with_colors(*upper, *lower)),
            Self::Alpha { percent } => Box::new(AlphaProcessor::new(*percent)?),
            Self::BackgroundColor { color } => Box::new(BackgroundColorProcessor::new(*color)),
            Self::Glow { color, radius } => {
                let glow = GlowProcessor::new(*color);
                Box::new(match radius {
                    Some(r) => glow.with_radius(*r)?,
                    None => glow,
                })
            }
            Self::Vignette {
                color,
                radius_x,
                radius_y,
            } => {
                let vignette = VignetteProcessor::new(*color);
                Box::new(match (radius_x, radius_y) {
                    (Some(rx), Some(ry)) => vignette.with_radii(*rx, *ry)?,
                    (Some(r), None) | (None, Some(r)) => vignette.with_radii(*r, *r)?,
                    (None, None) => vignette,
                })
            }
            Self::Rotate { degrees, expand } => {
                Box::new(AffineProcessor::rotate(*degrees)?.with_expand(*expand))
            }
            Self::Skew {
                degrees_x,
                degrees_y,
                expand,
            } => Box::new(AffineProcessor::skew(*degrees_x, *degrees_y)?.with_expand(*expand)),
            Self::Crop => Box::new(CropProcessor::new()),
            Self::Blend { .. } | Self::RotateFlip { .. } | Self::Quantize { .. } => return Ok(None),
        };
        Ok(Some(boxed))
    }
}

/// A step plus the optional region it is restricted to.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StepConfig {
    #[serde(flatten)]
    pub step: Step,
    #[serde(default)]
    pub region: Option<Rectangle>,
}

impl StepConfig {
    pub fn label(&self) -> &'static str {
        self.step.label()
    }

    /// Run the step over `image`. The step's own region wins over
    /// `default_region`; with neither, the whole image is processed.
    pub fn apply(
        &self,
        pipeline: &Pipeline,
        image: &mut PixelBuffer<Rgba8>,
        default_region: Option<Rectangle>,
    ) -> Result<(), String> {
        let rect = self
            .region
            .or(default_region)
            .unwrap_or_else(|| image.bounds());
        let label = self.label();
        let fail = |e: crate::error::ProcessError| format!("Step {label} failed: {e}");

        if let Some(processor) = self.step.processor().map_err(fail)? {
            pipeline
                .process(processor.as_ref(), image, rect)
                .map_err(fail)?;
            return Ok(());
        }
        match &self.step {
            Step::Blend { overlay, opacity } => {
                let overlay = load_rgba8_image(overlay)?;
                let blend = BlendProcessor::new(overlay, *opacity).map_err(fail)?;
                pipeline.process(&blend, image, rect).map_err(fail)?;
            }
            Step::RotateFlip { rotate, flip } => {
                rotate_flip(pipeline, image, *rotate, *flip).map_err(fail)?;
            }
            Step::Quantize {
                max_colors,
                threshold,
            } => {
                let quantizer = match threshold {
                    Some(t) => PopularityQuantizer::new(*t).map_err(fail)?,
                    None => PopularityQuantizer::default(),
                };
                quantize(image, &quantizer, *max_colors).map_err(fail)?;
            }
            other => return Err(format!("Step {} has no processor", other.label())),
        }
        Ok(())
    }
}

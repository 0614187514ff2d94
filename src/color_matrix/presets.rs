//! Named colour transforms.
//!
//! Each preset is a fixed [`ColorMatrix`], optionally followed by radial
//! composites. The parametric ones (hue, saturation, brightness, contrast)
//! validate their argument and build the matrix from it.
use super::{ColorMatrix, ColorMatrixProcessor, PostComposite};
use crate::color::Rgba8;
use crate::composite::{GlowProcessor, VignetteProcessor};
use crate::error::{ensure_range, Result};
use serde::{Deserialize, Serialize};

fn preset(name: &'static str, matrix: ColorMatrix) -> ColorMatrixProcessor {
    ColorMatrixProcessor::named(name, matrix)
}

/// Equal-weight luma mix: every output channel gets `wr*R + wg*G + wb*B`.
fn luma(wr: f32, wg: f32, wb: f32) -> ColorMatrix {
    ColorMatrix::from_rgb([[wr; 3], [wg; 3], [wb; 3]], false)
}

/// Grayscale with ITU-R BT.709 luma weights.
pub fn grayscale_bt709() -> ColorMatrixProcessor {
    preset("grayscale-bt709", luma(0.2126, 0.7152, 0.0722))
}

/// Grayscale with ITU-R BT.601 luma weights (0.299, 0.587, 0.114). This is
/// the pre-pass used by the edge detectors and the binary threshold.
pub fn grayscale_bt601() -> ColorMatrixProcessor {
    preset("grayscale-bt601", luma(0.299, 0.587, 0.114))
}

pub fn sepia() -> ColorMatrixProcessor {
    preset(
        "sepia",
        ColorMatrix::from_rgb(
            [
                [0.393, 0.349, 0.272],
                [0.769, 0.686, 0.534],
                [0.189, 0.168, 0.131],
            ],
            true,
        ),
    )
}

pub fn black_white() -> ColorMatrixProcessor {
    preset(
        "black-white",
        ColorMatrix::from_affine([[1.5; 3]; 3], [-1.0; 3], true),
    )
}

pub fn kodachrome() -> ColorMatrixProcessor {
    preset(
        "kodachrome",
        ColorMatrix::from_affine(
            [
                [0.699_702_3, 0.0, 0.0],
                [0.0, 0.460_957_7, 0.0],
                [0.0, 0.0, 0.397_218],
            ],
            [0.005, -0.005, 0.005],
            true,
        ),
    )
}

pub fn lomograph() -> ColorMatrixProcessor {
    preset(
        "lomograph",
        ColorMatrix::from_affine(
            [[1.5, 0.0, 0.0], [0.0, 1.45, 0.0], [0.0, 0.0, 1.11]],
            [-0.1, 0.0, -0.08],
            true,
        ),
    )
    // Very dark lime green.
    .then(PostComposite::Vignette(VignetteProcessor::new(Rgba8::new(
        0, 10, 0, 255,
    ))))
}

pub fn polaroid() -> ColorMatrixProcessor {
    preset(
        "polaroid",
        ColorMatrix::from_affine(
            [
                [1.538, -0.062, -0.262],
                [-0.022, 1.578, -0.022],
                [0.216, -0.16, 1.5831],
            ],
            [0.02, -0.05, -0.05],
            true,
        ),
    )
    // Brown tone.
    .then(PostComposite::Vignette(VignetteProcessor::new(Rgba8::new(
        102, 34, 0, 255,
    ))))
    // Translucent light orange over the middle quarter.
    .then(PostComposite::Glow {
        glow: GlowProcessor::new(Rgba8::new(255, 153, 102, 178)),
        width_fraction: 0.25,
    })
}

/// Colour vision deficiency simulations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorBlindness {
    Achromatomaly,
    Achromatopsia,
    Deuteranomaly,
    Deuteranopia,
    Protanomaly,
    Protanopia,
    Tritanomaly,
    Tritanopia,
}

impl ColorBlindness {
    fn mix(self) -> [[f32; 3]; 3] {
        match self {
            Self::Achromatomaly => [
                [0.618, 0.163, 0.163],
                [0.320, 0.775, 0.320],
                [0.062, 0.062, 0.516],
            ],
            Self::Achromatopsia => [
                [0.299, 0.299, 0.299],
                [0.587, 0.587, 0.587],
                [0.114, 0.114, 0.114],
            ],
            Self::Deuteranomaly => [
                [0.8, 0.258, 0.0],
                [0.2, 0.742, 0.142],
                [0.0, 0.0, 0.858],
            ],
            Self::Deuteranopia => [
                [0.625, 0.7, 0.0],
                [0.375, 0.3, 0.3],
                [0.0, 0.0, 0.7],
            ],
            Self::Protanomaly => [
                [0.817, 0.333, 0.0],
                [0.183, 0.667, 0.125],
                [0.0, 0.0, 0.875],
            ],
            Self::Protanopia => [
                [0.567, 0.558, 0.0],
                [0.433, 0.442, 0.242],
                [0.0, 0.0, 0.758],
            ],
            Self::Tritanomaly => [
                [0.967, 0.0, 0.0],
                [0.33, 0.733, 0.183],
                [0.0, 0.267, 0.817],
            ],
            Self::Tritanopia => [
                [0.95, 0.0, 0.0],
                [0.05, 0.433, 0.475],
                [0.0, 0.567, 0.525],
            ],
        }
    }
}

pub fn color_blindness(kind: ColorBlindness) -> ColorMatrixProcessor {
    preset("color-blindness", ColorMatrix::from_rgb(kind.mix(), false))
}

/// Rotate hue by `degrees` in `[-180, 180]` around the luma axis.
pub fn hue(degrees: f32) -> Result<ColorMatrixProcessor> {
    ensure_range("degrees", degrees, -180.0, 180.0)?;
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (lr, lg, lb) = (0.213, 0.715, 0.072);
    let mix = [
        [
            lr + cos * (1.0 - lr) - sin * lr,
            lr - cos * lr + sin * 0.143,
            lr - cos * lr - sin * (1.0 - lr),
        ],
        [
            lg - cos * lg - sin * lg,
            lg + cos * (1.0 - lg) + sin * 0.140,
            lg - cos * lg + sin * lg,
        ],
        [
            lb - cos * lb + sin * (1.0 - lb),
            lb - cos * lb - sin * 0.283,
            lb + cos * (1.0 - lb) + sin * lb,
        ],
    ];
    Ok(preset("hue", ColorMatrix::from_rgb(mix, true)))
}

/// Saturation change in `[-100, 100]`; -100 is fully desaturated.
pub fn saturation(amount: f32) -> Result<ColorMatrixProcessor> {
    ensure_range("amount", amount, -100.0, 100.0)?;
    let factor = 1.0 + amount / 100.0;
    let complement = 1.0 - factor;
    let (cr, cg, cb) = (0.3086 * complement, 0.6094 * complement, 0.0820 * complement);
    let mix = [
        [cr + factor, cr, cr],
        [cg, cg + factor, cg],
        [cb, cb, cb + factor],
    ];
    Ok(preset("saturation", ColorMatrix::from_rgb(mix, true)))
}

/// Add `amount / 100` to every channel in linear light, `amount` in
/// `[-100, 100]`.
pub fn brightness(amount: f32) -> Result<ColorMatrixProcessor> {
    ensure_range("amount", amount, -100.0, 100.0)?;
    let shift = amount / 100.0;
    Ok(preset(
        "brightness",
        ColorMatrix::from_affine(IDENTITY3, [shift; 3], true),
    ))
}

/// Scale every channel about 0.5 in linear light by `(100 + amount) / 100`,
/// `amount` in `[-100, 100]`.
pub fn contrast(amount: f32) -> Result<ColorMatrixProcessor> {
    ensure_range("amount", amount, -100.0, 100.0)?;
    let scale = (100.0 + amount) / 100.0;
    let mix = [[scale, 0.0, 0.0], [0.0, scale, 0.0], [0.0, 0.0, scale]];
    Ok(preset(
        "contrast",
        ColorMatrix::from_affine(mix, [0.5 * (1.0 - scale); 3], true),
    ))
}

pub fn invert() -> ColorMatrixProcessor {
    let mix = [[-1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, -1.0]];
    preset("invert", ColorMatrix::from_affine(mix, [1.0; 3], false))
}

const IDENTITY3: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorVector, Rgba8};
    use crate::image::{ImageView, PixelBuffer};
    use crate::processor::Pipeline;

    fn approx_eq(a: ColorVector, b: ColorVector) -> bool {
        (a - b).abs().max() < 1e-4
    }

    #[test]
    fn grayscale_channels_are_equal() {
        let v = grayscale_bt601()
            .matrix()
            .transform(ColorVector::new(1.0, 0.0, 0.0, 1.0));
        assert!(approx_eq(v, ColorVector::new(0.299, 0.299, 0.299, 1.0)));
        let w = grayscale_bt709()
            .matrix()
            .transform(ColorVector::new(1.0, 1.0, 1.0, 1.0));
        assert!(approx_eq(w, ColorVector::new(1.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn neutral_parameters_are_identity() {
        let v = ColorVector::new(0.2, 0.5, 0.8, 0.6);
        for p in [
            hue(0.0).unwrap(),
            saturation(0.0).unwrap(),
            brightness(0.0).unwrap(),
            contrast(0.0).unwrap(),
        ] {
            assert!(approx_eq(p.matrix().transform(v), v), "{}", p.name);
        }
    }

    #[test]
    fn full_desaturation_equalises_channels() {
        let v = saturation(-100.0)
            .unwrap()
            .matrix()
            .transform(ColorVector::new(0.9, 0.1, 0.4, 1.0));
        assert!((v.x - v.y).abs() < 1e-5 && (v.y - v.z).abs() < 1e-5);
    }

    #[test]
    fn hue_rotation_keeps_neutrals_and_moves_colours() {
        let half = hue(180.0).unwrap();
        let gray = ColorVector::new(0.5, 0.5, 0.5, 1.0);
        assert!(approx_eq(half.matrix().transform(gray), gray));
        let red = ColorVector::new(1.0, 0.0, 0.0, 1.0);
        let turned = half.matrix().transform(red);
        assert!(turned.x < 0.5, "{turned:?}");
    }

    #[test]
    fn invert_flips_rgb_keeps_alpha() {
        let mut img = PixelBuffer::filled(2, 2, Rgba8::new(0, 100, 255, 77)).unwrap();
        Pipeline::new().process_all(&invert(), &mut img).unwrap();
        assert_eq!(img.get(1, 1), Rgba8::new(255, 155, 0, 77));
    }

    #[test]
    fn parametric_presets_validate() {
        assert!(hue(181.0).is_err());
        assert!(saturation(-101.0).is_err());
        assert!(brightness(100.5).is_err());
        assert!(contrast(f32::NAN).is_err());
    }

    #[test]
    fn stylised_presets_carry_composites() {
        assert_eq!(lomograph().post_composites().len(), 1);
        assert_eq!(polaroid().post_composites().len(), 2);
        assert!(sepia().post_composites().is_empty());
    }

    #[test]
    fn color_blindness_presets_skip_compand() {
        let p = color_blindness(ColorBlindness::Protanopia);
        assert!(!p.matrix().compand());
        let v = color_blindness(ColorBlindness::Achromatopsia)
            .matrix()
            .transform(ColorVector::new(0.0, 1.0, 0.0, 1.0));
        assert!(approx_eq(v, ColorVector::new(0.587, 0.587, 0.587, 1.0)));
    }
}

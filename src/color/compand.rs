//! sRGB companding.
//!
//! `expand` converts gamma-encoded sRGB components to linear light and
//! `compress` reverses it. Only the color channels are touched; alpha is
//! linear already.
use super::ColorVector;

#[inline]
fn expand_channel(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn compress_channel(v: f32) -> f32 {
    if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// sRGB -> linear.
#[inline]
pub fn expand(v: ColorVector) -> ColorVector {
    ColorVector::new(
        expand_channel(v.x),
        expand_channel(v.y),
        expand_channel(v.z),
        v.w,
    )
}

/// Linear -> sRGB.
#[inline]
pub fn compress(v: ColorVector) -> ColorVector {
    ColorVector::new(
        compress_channel(v.x),
        compress_channel(v.y),
        compress_channel(v.z),
        v.w,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_then_compress_is_identity() {
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let v = ColorVector::new(t, 1.0 - t, t * t, 0.3);
            let back = compress(expand(v));
            assert!((back - v).abs().max() < 1e-5, "t={t} back={back:?}");
        }
    }

    #[test]
    fn endpoints_and_alpha_are_fixed() {
        let v = ColorVector::new(0.0, 1.0, 0.5, 0.25);
        let e = expand(v);
        assert_eq!(e.x, 0.0);
        assert!((e.y - 1.0).abs() < 1e-6);
        assert!(e.z < 0.5);
        assert_eq!(e.w, 0.25);
    }
}

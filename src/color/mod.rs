//! Pixel formats and the canonical color vector.
//!
//! Every transform in the crate is generic over [`PixelColor`]: a concrete
//! pixel layout that converts to and from a canonical `(r, g, b, a)` vector of
//! `f32` in `[0, 1]`. Processors do their arithmetic on the vector and pack
//! the result back into the buffer's own format.
//!
//! - [`Rgba8`]: 8 bits per channel; round-trips exactly through the vector.
//! - [`Rgba32F`]: 32-bit float per channel; the vector is stored verbatim.
//!
//! [`compand`] holds the sRGB expand/compress pair used by processors that
//! operate in linear light.

pub mod compand;
pub mod rgba32f;
pub mod rgba8;

pub use self::compand::{compress, expand};
pub use self::rgba32f::Rgba32F;
pub use self::rgba8::Rgba8;

use nalgebra::Vector4;

/// Canonical color vector: `(r, g, b, a)`, nominally in `[0, 1]`.
pub type ColorVector = Vector4<f32>;

/// Capability implemented by every concrete pixel format.
///
/// Implementors are plain values: two pixels with equal bits are the same
/// color. `from_vector(to_vector(c)) == c` must hold within the precision of
/// the format.
pub trait PixelColor: Copy + Default + PartialEq + Send + Sync + std::fmt::Debug + 'static {
    /// Unpack into the canonical vector.
    fn to_vector(self) -> ColorVector;

    /// Pack a canonical vector. Out-of-range components are clamped by
    /// formats that cannot represent them.
    fn from_vector(vector: ColorVector) -> Self;

    /// Build a color from four 8-bit channels.
    fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self;
}

/// Linear interpolation between two color vectors, `t = 0` yields `from`.
#[inline]
pub fn lerp(from: &ColorVector, to: &ColorVector, t: f32) -> ColorVector {
    from.lerp(to, t)
}

/// Opaque black in any format.
#[inline]
pub fn black<C: PixelColor>() -> C {
    C::from_bytes(0, 0, 0, 255)
}

/// Opaque white in any format.
#[inline]
pub fn white<C: PixelColor>() -> C {
    C::from_bytes(255, 255, 255, 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let a = ColorVector::new(0.0, 0.2, 0.4, 1.0);
        let b = ColorVector::new(1.0, 0.6, 0.0, 0.0);
        assert_eq!(lerp(&a, &b, 0.0), a);
        assert_eq!(lerp(&a, &b, 1.0), b);
        let mid = lerp(&a, &b, 0.5);
        assert!((mid.x - 0.5).abs() < 1e-6);
        assert!((mid.y - 0.4).abs() < 1e-6);
        assert!((mid.w - 0.5).abs() < 1e-6);
    }

    #[test]
    fn named_colors_are_opaque() {
        let b: Rgba8 = black();
        let w: Rgba32F = white();
        assert_eq!(b, Rgba8::new(0, 0, 0, 255));
        assert_eq!(w.to_vector(), ColorVector::new(1.0, 1.0, 1.0, 1.0));
    }
}

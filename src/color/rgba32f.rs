use super::{ColorVector, PixelColor};
use serde::{Deserialize, Serialize};

/// Floating-point RGBA pixel. Components are stored unclamped so that
/// intermediate results (e.g. gradient magnitudes above 1) survive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgba32F {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba32F {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl PixelColor for Rgba32F {
    #[inline]
    fn to_vector(self) -> ColorVector {
        ColorVector::new(self.r, self.g, self.b, self.a)
    }

    #[inline]
    fn from_vector(vector: ColorVector) -> Self {
        Self::new(vector.x, vector.y, vector.z, vector.w)
    }

    #[inline]
    fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }
}

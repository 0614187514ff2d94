#![allow(dead_code)]

pub mod synthetic_image;

/// Absolute-tolerance float comparison for channel values.
pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

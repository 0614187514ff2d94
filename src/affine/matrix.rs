//! Homogeneous 2D matrices in pixel space (x right, y down).
//!
//! Positive angles turn clockwise on screen. Right-angle rotations and flips
//! are built from exact integer entries so that their inverse mapping lands
//! on pixel centres without rounding drift.
use nalgebra::{Matrix3, Point2};

use super::orientation::{FlipType, RotateType};

pub fn rotation(degrees: f32) -> Matrix3<f32> {
    let (s, c) = degrees.to_radians().sin_cos();
    Matrix3::new(
        c, -s, 0.0, //
        s, c, 0.0, //
        0.0, 0.0, 1.0,
    )
}

/// `x' = x + y·tan(ax)`, `y' = y + x·tan(ay)`.
pub fn skew(degrees_x: f32, degrees_y: f32) -> Matrix3<f32> {
    let tx = degrees_x.to_radians().tan();
    let ty = degrees_y.to_radians().tan();
    Matrix3::new(
        1.0, tx, 0.0, //
        ty, 1.0, 0.0, //
        0.0, 0.0, 1.0,
    )
}

pub fn right_angle(rotate: RotateType) -> Matrix3<f32> {
    let (c, s) = match rotate {
        RotateType::None => (1.0, 0.0),
        RotateType::Rotate90 => (0.0, 1.0),
        RotateType::Rotate180 => (-1.0, 0.0),
        RotateType::Rotate270 => (0.0, -1.0),
    };
    Matrix3::new(
        c, -s, 0.0, //
        s, c, 0.0, //
        0.0, 0.0, 1.0,
    )
}

pub fn flip(flip: FlipType) -> Matrix3<f32> {
    let (sx, sy) = match flip {
        FlipType::None => (1.0, 1.0),
        FlipType::Horizontal => (-1.0, 1.0),
        FlipType::Vertical => (1.0, -1.0),
    };
    Matrix3::new(
        sx, 0.0, 0.0, //
        0.0, sy, 0.0, //
        0.0, 0.0, 1.0,
    )
}

/// Integer size of the axis-aligned box around a `width × height` rectangle
/// centred on the origin after `forward` is applied.
pub fn bounding_size(forward: &Matrix3<f32>, width: f32, height: f32) -> (usize, usize) {
    const EPS: f32 = 1e-3;
    let (hw, hh) = (width * 0.5, height * 0.5);
    let corners = [
        Point2::new(-hw, -hh),
        Point2::new(hw, -hh),
        Point2::new(hw, hh),
        Point2::new(-hw, hh),
    ];
    let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
    let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
    for corner in corners {
        let p = forward.transform_point(&corner);
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let w = (max_x - min_x - EPS).ceil().max(1.0);
    let h = (max_y - min_y - EPS).ceil().max(1.0);
    (w as usize, h as usize)
}

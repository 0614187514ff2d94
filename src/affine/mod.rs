//! Geometric transforms: arbitrary affine sampling, right-angle rotation and
//! flips, EXIF orientation correction, and cropping.

pub mod crop;
pub mod matrix;
pub mod orientation;
pub mod transform;

pub use self::crop::CropProcessor;
pub use self::orientation::{auto_orient, rotate_flip, FlipType, Orientation, RotateType};
pub use self::transform::AffineProcessor;

//! Error type shared by the pixel container and every processor.
//!
//! Configuration errors are raised by constructors before any pixel is
//! touched; invocation errors are raised by [`crate::Pipeline::apply`] before
//! the parallel phase starts. Degenerate (zero-area) regions are not errors.
use crate::geometry::Rectangle;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessError {
    #[error("invalid dimensions {width}x{height}: width and height must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("pixel array has {actual} elements, expected {expected}")]
    PixelCountMismatch { expected: usize, actual: usize },

    #[error("{name} = {value} is outside the valid range [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid {rows}x{cols} kernel: sides must be odd with one weight per cell")]
    InvalidKernel { rows: usize, cols: usize },

    #[error("region {rect:?} does not intersect image bounds {width}x{height}")]
    RegionOutsideBounds {
        rect: Rectangle,
        width: usize,
        height: usize,
    },

    #[error("transform matrix is not invertible")]
    SingularTransform,
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

pub type Result<T, E = ProcessError> = std::result::Result<T, E>;

/// Fails with [`ProcessError::OutOfRange`] unless `min <= value <= max`.
pub(crate) fn ensure_range<T>(name: &'static str, value: T, min: T, max: T) -> Result<()>
where
    T: PartialOrd + Into<f64> + Copy,
{
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ProcessError::OutOfRange {
            name,
            value: value.into(),
            min: min.into(),
            max: max.into(),
        })
    }
}

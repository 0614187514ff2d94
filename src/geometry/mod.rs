//! Integer rectangles, region clamping, and the small amount of 2D geometry
//! the compositing processors need.
//!
//! [`clamp_region`] is the single place where a requested rectangle is
//! reconciled with a buffer's extents; every row-parallel processor derives
//! its row range and addressing offsets from the [`ClampedRegion`] it returns.

pub mod ellipse;
pub mod rect;
pub mod region;

pub use self::ellipse::Ellipse;
pub use self::rect::{Point, Rectangle};
pub use self::region::{clamp_region, ClampedRegion};

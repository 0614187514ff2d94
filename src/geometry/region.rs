//! Region clamping.
//!
//! A requested rectangle is intersected with `[0, width) × [0, height)`.
//! Besides the clamped bounds the result carries an addressing origin per
//! axis:
//!
//! - origin inside the buffer: the origin stays at the rectangle's own
//!   offset, so region-relative coordinates are `x - rect.x`;
//! - origin clamped up to 0: the origin collapses to 0 and that axis is
//!   addressed buffer-relative from then on.
//!
//! The rule is evaluated independently per axis. Processors that write into a
//! region-sized target (crop) or sample a region-anchored overlay (blend) go
//! through [`ClampedRegion::region_x`]/[`ClampedRegion::region_y`]; processors
//! that rewrite a full-size clone of the source only use the bounds.
use super::Rectangle;
use std::ops::Range;

/// Result of [`clamp_region`]. All ranges are half-open and lie inside the
/// buffer; an empty range means the request covered no pixels on that axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClampedRegion {
    pub min_x: usize,
    pub max_x: usize,
    pub min_y: usize,
    pub max_y: usize,
    pub offset_x: usize,
    pub offset_y: usize,
}

impl ClampedRegion {
    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.min_y..self.max_y
    }

    #[inline]
    pub fn columns(&self) -> Range<usize> {
        self.min_x..self.max_x
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Region-relative column for buffer column `x`.
    #[inline]
    pub fn region_x(&self, x: usize) -> usize {
        x - self.offset_x
    }

    /// Region-relative row for buffer row `y`.
    #[inline]
    pub fn region_y(&self, y: usize) -> usize {
        y - self.offset_y
    }

    /// The clamped bounds as a rectangle in buffer coordinates.
    pub fn as_rect(&self) -> Rectangle {
        Rectangle::new(
            self.min_x as i32,
            self.min_y as i32,
            self.width() as i32,
            self.height() as i32,
        )
    }
}

fn clamp_axis(start: i32, len: i32, extent: usize) -> (usize, usize, usize) {
    let extent = extent as i64;
    let start = start as i64;
    let end = start + (len.max(0) as i64);
    let min = start.clamp(0, extent);
    let max = end.clamp(min, extent);
    let offset = if start >= 0 { min } else { 0 };
    (min as usize, max as usize, offset as usize)
}

/// Intersect `rect` with a `width × height` buffer and resolve the
/// addressing origin for each axis.
pub fn clamp_region(rect: Rectangle, width: usize, height: usize) -> ClampedRegion {
    let (min_x, max_x, offset_x) = clamp_axis(rect.x, rect.width, width);
    let (min_y, max_y, offset_y) = clamp_axis(rect.y, rect.height, height);
    ClampedRegion {
        min_x,
        max_x,
        min_y,
        max_y,
        offset_x,
        offset_y,
    }
}

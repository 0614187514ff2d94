//! Scoped pixel access.
//!
//! [`PixelAccessor`] borrows a buffer's storage mutably, so at most one exists
//! per buffer and it is released when it goes out of scope, on every exit
//! path. [`PixelView`] is the shared, read-only counterpart handed to row
//! workers. Indexing is by `(x, y)`; debug builds assert the coordinates.
use super::traits::{ImageView, ImageViewMut};
use std::ops::{Index, IndexMut};

pub struct PixelAccessor<'a, C> {
    width: usize,
    height: usize,
    data: &'a mut [C],
}

impl<'a, C> PixelAccessor<'a, C> {
    pub(crate) fn new(width: usize, height: usize, data: &'a mut [C]) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }
}

impl<C: Copy> ImageView for PixelAccessor<'_, C> {
    type Pixel = C;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn as_slice(&self) -> &[C] {
        &*self.data
    }
}

impl<C: Copy> ImageViewMut for PixelAccessor<'_, C> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [C] {
        &mut *self.data
    }
}

impl<C> Index<(usize, usize)> for PixelAccessor<'_, C> {
    type Output = C;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &C {
        debug_assert!(x < self.width && y < self.height);
        &self.data[y * self.width + x]
    }
}

impl<C> IndexMut<(usize, usize)> for PixelAccessor<'_, C> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut C {
        debug_assert!(x < self.width && y < self.height);
        &mut self.data[y * self.width + x]
    }
}

#[derive(Clone, Copy)]
pub struct PixelView<'a, C> {
    width: usize,
    height: usize,
    data: &'a [C],
}

impl<'a, C> PixelView<'a, C> {
    pub(crate) fn new(width: usize, height: usize, data: &'a [C]) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }
}

impl<C: Copy> PixelView<'_, C> {
    /// Sample with coordinates clamped to the buffer edges (edge replication).
    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize) -> C {
        let cx = x.clamp(0, self.width as isize - 1) as usize;
        let cy = y.clamp(0, self.height as isize - 1) as usize;
        self.data[cy * self.width + cx]
    }

    /// `None` when `(x, y)` lies outside the buffer.
    #[inline]
    pub fn get_checked(&self, x: isize, y: isize) -> Option<C> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width + x as usize])
    }
}

impl<C: Copy> ImageView for PixelView<'_, C> {
    type Pixel = C;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn as_slice(&self) -> &[C] {
        self.data
    }
}

impl<C> Index<(usize, usize)> for PixelView<'_, C> {
    type Output = C;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &C {
        debug_assert!(x < self.width && y < self.height);
        &self.data[y * self.width + x]
    }
}

use crate::geometry::Rectangle;
use std::slice::{ChunksExact, ChunksExactMut};

/// Read access to a contiguous, row-major pixel grid (`stride == width`).
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// All pixels in row-major order; `len == width * height`.
    fn as_slice(&self) -> &[Self::Pixel];

    #[inline]
    fn row(&self, y: usize) -> &[Self::Pixel] {
        let w = self.width();
        &self.as_slice()[y * w..(y + 1) * w]
    }

    fn rows(&self) -> ChunksExact<'_, Self::Pixel> {
        self.as_slice().chunks_exact(self.width().max(1))
    }

    #[inline]
    fn get(&self, x: usize, y: usize) -> Self::Pixel {
        debug_assert!(
            x < self.width() && y < self.height(),
            "pixel ({x}, {y}) outside {}x{}",
            self.width(),
            self.height()
        );
        self.as_slice()[y * self.width() + x]
    }

    fn bounds(&self) -> Rectangle {
        Rectangle::from_size(self.width(), self.height())
    }
}

/// Write access on top of [`ImageView`].
pub trait ImageViewMut: ImageView {
    fn as_mut_slice(&mut self) -> &mut [Self::Pixel];

    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel] {
        let w = self.width();
        &mut self.as_mut_slice()[y * w..(y + 1) * w]
    }

    fn rows_mut(&mut self) -> ChunksExactMut<'_, Self::Pixel> {
        let w = self.width().max(1);
        self.as_mut_slice().chunks_exact_mut(w)
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, pixel: Self::Pixel) {
        debug_assert!(
            x < self.width() && y < self.height(),
            "pixel ({x}, {y}) outside {}x{}",
            self.width(),
            self.height()
        );
        let w = self.width();
        self.as_mut_slice()[y * w + x] = pixel;
    }
}

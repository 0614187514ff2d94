//! Owned pixel container.
//!
//! [`PixelBuffer`] is the unit every processor reads from and writes to. It
//! upholds `data.len() == width * height` with both dimensions positive;
//! every constructor and replacement method validates that before mutating.
use super::accessor::{PixelAccessor, PixelView};
use super::traits::{ImageView, ImageViewMut};
use crate::color::PixelColor;
use crate::error::{ProcessError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer<C> {
    width: usize,
    height: usize,
    data: Vec<C>,
}

/// `width * height`, rejecting zero sides and products that overflow.
fn pixel_count(width: usize, height: usize) -> Result<usize> {
    match width.checked_mul(height) {
        Some(count) if count > 0 => Ok(count),
        _ => Err(ProcessError::InvalidDimensions { width, height }),
    }
}

fn validate(width: usize, height: usize, len: usize) -> Result<()> {
    let expected = pixel_count(width, height)?;
    if len != expected {
        return Err(ProcessError::PixelCountMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

impl<C: PixelColor> PixelBuffer<C> {
    /// A `width × height` buffer of default (transparent) pixels.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, C::default())
    }

    /// A `width × height` buffer where every pixel is `color`.
    pub fn filled(width: usize, height: usize, color: C) -> Result<Self> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![color; len],
        })
    }

    /// Wrap an existing row-major pixel vector.
    pub fn from_pixels(width: usize, height: usize, data: Vec<C>) -> Result<Self> {
        validate(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn pixels(&self) -> &[C] {
        &self.data
    }

    pub fn into_pixels(self) -> Vec<C> {
        self.data
    }

    /// Replace dimensions and pixels, taking ownership of `data`.
    pub fn set_pixels(&mut self, width: usize, height: usize, data: Vec<C>) -> Result<()> {
        validate(width, height, data.len())?;
        self.width = width;
        self.height = height;
        self.data = data;
        Ok(())
    }

    /// Replace dimensions and pixels with a copy of `data`.
    pub fn clone_pixels(&mut self, width: usize, height: usize, data: &[C]) -> Result<()> {
        validate(width, height, data.len())?;
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.extend_from_slice(data);
        Ok(())
    }

    /// Exclusive read/write access for the lifetime of the returned guard.
    pub fn lock(&mut self) -> PixelAccessor<'_, C> {
        PixelAccessor::new(self.width, self.height, &mut self.data)
    }

    /// Shared read-only access; may be handed to any number of row workers.
    pub fn view(&self) -> PixelView<'_, C> {
        PixelView::new(self.width, self.height, &self.data)
    }
}

impl<C: Copy> ImageView for PixelBuffer<C> {
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
        &self.data
    }
}

impl<C: Copy> ImageViewMut for PixelBuffer<C> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;

    #[test]
    fn rejects_non_positive_dimensions() {
        assert_eq!(
            PixelBuffer::<Rgba8>::new(0, 4).unwrap_err(),
            ProcessError::InvalidDimensions {
                width: 0,
                height: 4
            }
        );
        assert!(PixelBuffer::<Rgba8>::new(3, 0).is_err());
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        assert_eq!(
            PixelBuffer::filled(usize::MAX, 2, Rgba8::new(1, 2, 3, 4)).unwrap_err(),
            ProcessError::InvalidDimensions {
                width: usize::MAX,
                height: 2
            }
        );
        assert!(PixelBuffer::from_pixels(usize::MAX, 2, vec![Rgba8::default(); 2]).is_err());

        let mut img = PixelBuffer::<Rgba8>::new(2, 2).unwrap();
        let before = img.clone();
        assert!(img.set_pixels(2, usize::MAX, vec![Rgba8::default(); 4]).is_err());
        assert!(img.clone_pixels(usize::MAX / 2 + 1, 2, &[Rgba8::default(); 4]).is_err());
        assert_eq!(img, before);
    }

    #[test]
    fn set_pixels_validates_length_without_mutating() {
        let mut img = PixelBuffer::filled(2, 2, Rgba8::new(1, 2, 3, 4)).unwrap();
        let err = img.set_pixels(3, 3, vec![Rgba8::default(); 8]).unwrap_err();
        assert_eq!(
            err,
            ProcessError::PixelCountMismatch {
                expected: 9,
                actual: 8
            }
        );
        assert_eq!(img.width(), 2);
        assert!(img.pixels().iter().all(|&p| p == Rgba8::new(1, 2, 3, 4)));

        img.set_pixels(3, 1, vec![Rgba8::default(); 3]).unwrap();
        assert_eq!((img.width(), img.height()), (3, 1));
    }

    #[test]
    fn clone_pixels_copies_source() {
        let src = vec![Rgba8::new(9, 9, 9, 9); 6];
        let mut img = PixelBuffer::<Rgba8>::new(1, 1).unwrap();
        img.clone_pixels(2, 3, &src).unwrap();
        assert_eq!(img.pixels(), src.as_slice());
        assert_eq!(img.row(2), &src[4..6]);
    }

    #[test]
    fn lock_then_view_sees_writes() {
        let mut img = PixelBuffer::<Rgba8>::new(4, 3).unwrap();
        {
            let mut px = img.lock();
            px[(3, 2)] = Rgba8::new(255, 0, 0, 255);
        }
        assert_eq!(img.view().get(3, 2), Rgba8::new(255, 0, 0, 255));
        assert_eq!(img.bounds(), crate::geometry::Rectangle::new(0, 0, 4, 3));
    }
}

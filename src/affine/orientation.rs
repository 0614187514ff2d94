//! Right-angle rotations, flips and EXIF orientation correction.
use super::AffineProcessor;
use crate::color::PixelColor;
use crate::error::Result;
use crate::image::PixelBuffer;
use crate::processor::Pipeline;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RotateType {
    #[default]
    None,
    Rotate90,
    Rotate180,
    Rotate270,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlipType {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// EXIF orientation tag values. Names give where row 0 and column 0 of the
/// stored pixels sit in the upright picture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
#[repr(u16)]
pub enum Orientation {
    #[default]
    Unknown = 0,
    TopLeft = 1,
    TopRight = 2,
    BottomRight = 3,
    BottomLeft = 4,
    LeftTop = 5,
    RightTop = 6,
    RightBottom = 7,
    LeftBottom = 8,
}

impl Orientation {
    /// Values outside `1..=8` read as [`Orientation::Unknown`].
    pub fn from_exif(value: u16) -> Self {
        match value {
            1 => Self::TopLeft,
            2 => Self::TopRight,
            3 => Self::BottomRight,
            4 => Self::BottomLeft,
            5 => Self::LeftTop,
            6 => Self::RightTop,
            7 => Self::RightBottom,
            8 => Self::LeftBottom,
            _ => Self::Unknown,
        }
    }

    pub fn to_exif(self) -> u16 {
        self as u16
    }

    /// Rotations and flips, in order, that bring the stored pixels upright.
    fn corrections(self) -> &'static [Correction] {
        use Correction::{Flip, Rotate};
        match self {
            Self::Unknown | Self::TopLeft => &[],
            Self::TopRight => &[Flip(FlipType::Horizontal)],
            Self::BottomRight => &[Rotate(RotateType::Rotate180)],
            Self::BottomLeft => &[Flip(FlipType::Vertical)],
            Self::LeftTop => &[Rotate(RotateType::Rotate90), Flip(FlipType::Horizontal)],
            Self::RightTop => &[Rotate(RotateType::Rotate90)],
            Self::RightBottom => &[Flip(FlipType::Vertical), Rotate(RotateType::Rotate270)],
            Self::LeftBottom => &[Rotate(RotateType::Rotate270)],
        }
    }
}

impl From<u16> for Orientation {
    fn from(value: u16) -> Self {
        Self::from_exif(value)
    }
}

impl From<Orientation> for u16 {
    fn from(orientation: Orientation) -> Self {
        orientation.to_exif()
    }
}

#[derive(Clone, Copy, Debug)]
enum Correction {
    Rotate(RotateType),
    Flip(FlipType),
}

/// Rotate by a right angle, then flip. `None` steps are skipped.
pub fn rotate_flip<'a, C: PixelColor>(
    pipeline: &Pipeline,
    image: &'a mut PixelBuffer<C>,
    rotate: RotateType,
    flip: FlipType,
) -> Result<&'a mut PixelBuffer<C>> {
    if rotate != RotateType::None {
        pipeline.process_all(&AffineProcessor::rotate_right_angle(rotate), image)?;
    }
    if flip != FlipType::None {
        pipeline.process_all(&AffineProcessor::flip(flip), image)?;
    }
    Ok(image)
}

/// Correct `image` for `orientation` and reset it to
/// [`Orientation::TopLeft`]. Unknown and already-upright images are left
/// untouched (and an unknown code stays unknown).
pub fn auto_orient<'a, C: PixelColor>(
    pipeline: &Pipeline,
    image: &'a mut PixelBuffer<C>,
    orientation: &mut Orientation,
) -> Result<&'a mut PixelBuffer<C>> {
    let steps = orientation.corrections();
    if steps.is_empty() {
        return Ok(image);
    }
    debug!("auto-orient: {orientation:?} via {steps:?}");
    for step in steps {
        match *step {
            Correction::Rotate(rotate) => rotate_flip(pipeline, image, rotate, FlipType::None)?,
            Correction::Flip(flip) => rotate_flip(pipeline, image, RotateType::None, flip)?,
        };
    }
    *orientation = Orientation::TopLeft;
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;
    use crate::image::ImageView;

    fn numbered(w: usize, h: usize) -> PixelBuffer<Rgba8> {
        let data = (0..w * h).map(|i| Rgba8::new(i as u8, 0, 0, 255)).collect();
        PixelBuffer::from_pixels(w, h, data).unwrap()
    }

    /// How a camera would store `upright` under each orientation tag.
    fn stored_as(orientation: Orientation, upright: &PixelBuffer<Rgba8>) -> PixelBuffer<Rgba8> {
        let (w, h) = (upright.width(), upright.height());
        let transposed = matches!(
            orientation,
            Orientation::LeftTop
                | Orientation::RightTop
                | Orientation::RightBottom
                | Orientation::LeftBottom
        );
        let (sw, sh) = if transposed { (h, w) } else { (w, h) };
        let mut data = Vec::with_capacity(w * h);
        for sy in 0..sh {
            for sx in 0..sw {
                let (x, y) = match orientation {
                    Orientation::Unknown | Orientation::TopLeft => (sx, sy),
                    Orientation::TopRight => (w - 1 - sx, sy),
                    Orientation::BottomRight => (w - 1 - sx, h - 1 - sy),
                    Orientation::BottomLeft => (sx, h - 1 - sy),
                    Orientation::LeftTop => (sy, sx),
                    Orientation::RightTop => (w - 1 - sy, sx),
                    Orientation::RightBottom => (w - 1 - sy, h - 1 - sx),
                    Orientation::LeftBottom => (sy, h - 1 - sx),
                };
                data.push(upright.get(x, y));
            }
        }
        PixelBuffer::from_pixels(sw, sh, data).unwrap()
    }

    #[test]
    fn exif_codes_round_trip() {
        for v in 0..=8u16 {
            assert_eq!(Orientation::from_exif(v).to_exif(), v);
        }
        assert_eq!(Orientation::from_exif(42), Orientation::Unknown);
        let o: Orientation = serde_json::from_str("6").unwrap();
        assert_eq!(o, Orientation::RightTop);
    }

    #[test]
    fn every_orientation_is_corrected() {
        let upright = numbered(3, 2);
        let pipeline = Pipeline::new();
        for code in 1..=8u16 {
            let mut orientation = Orientation::from_exif(code);
            let mut img = stored_as(orientation, &upright);
            auto_orient(&pipeline, &mut img, &mut orientation).unwrap();
            assert_eq!(img, upright, "orientation {code}");
            assert_eq!(orientation, Orientation::TopLeft);
        }
    }

    #[test]
    fn second_auto_orient_is_a_no_op() {
        let upright = numbered(4, 3);
        let pipeline = Pipeline::new();
        let mut orientation = Orientation::RightBottom;
        let mut img = stored_as(orientation, &upright);
        auto_orient(&pipeline, &mut img, &mut orientation).unwrap();
        let once = img.clone();
        auto_orient(&pipeline, &mut img, &mut orientation).unwrap();
        assert_eq!(img, once);
        assert_eq!(orientation, Orientation::TopLeft);
    }

    #[test]
    fn unknown_orientation_is_left_alone() {
        let mut img = numbered(2, 2);
        let before = img.clone();
        let mut orientation = Orientation::Unknown;
        auto_orient(&Pipeline::new(), &mut img, &mut orientation).unwrap();
        assert_eq!(img, before);
        assert_eq!(orientation, Orientation::Unknown);
    }

    #[test]
    fn rotate_flip_composes() {
        let mut img = numbered(3, 2);
        rotate_flip(&Pipeline::new(), &mut img, RotateType::Rotate180, FlipType::Horizontal).unwrap();
        // 180° then mirror = vertical flip.
        let reds: Vec<u8> = img.pixels().iter().map(|p| p.r).collect();
        assert_eq!(reds, vec![3, 4, 5, 0, 1, 2]);
    }
}

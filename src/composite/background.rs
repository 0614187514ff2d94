use crate::color::{lerp, ColorVector, PixelColor};
use crate::processor::{ImageProcessor, RowContext};

/// Alpha below this is treated as fully transparent.
const EPSILON: f32 = 0.001;

/// Flattens transparency onto a solid colour.
///
/// Transparent pixels become the background, partially transparent pixels
/// move halfway toward it, opaque pixels pass through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundColorProcessor {
    color: ColorVector,
}

impl BackgroundColorProcessor {
    pub fn new<C: PixelColor>(color: C) -> Self {
        Self {
            color: color.to_vector(),
        }
    }

    pub fn color(&self) -> ColorVector {
        self.color
    }
}

impl<C: PixelColor> ImageProcessor<C> for BackgroundColorProcessor {
    fn name(&self) -> &'static str {
        "background-color"
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        for x in ctx.region.columns() {
            let color = ctx.source[(x, y)].to_vector();
            let out = if color.w.abs() < EPSILON {
                self.color
            } else if color.w > 0.0 && color.w < 1.0 {
                lerp(&color, &self.color, 0.5)
            } else {
                color
            };
            row[x] = C::from_vector(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba32F;
    use crate::image::{ImageView, PixelBuffer};
    use crate::processor::Pipeline;

    #[test]
    fn alpha_extremes_and_midpoint() {
        let bg = Rgba32F::new(1.0, 1.0, 0.0, 1.0);
        let data = vec![
            Rgba32F::new(0.2, 0.4, 0.6, 0.0),
            Rgba32F::new(0.2, 0.4, 0.6, 1.0),
            Rgba32F::new(0.2, 0.4, 0.6, 0.5),
        ];
        let mut img = PixelBuffer::from_pixels(3, 1, data).unwrap();
        Pipeline::new()
            .process_all(&BackgroundColorProcessor::new(bg), &mut img)
            .unwrap();
        assert_eq!(img.get(0, 0), bg);
        assert_eq!(img.get(1, 0), Rgba32F::new(0.2, 0.4, 0.6, 1.0));
        let mid = img.get(2, 0);
        let expected = [0.6, 0.7, 0.3, 0.75];
        for (got, want) in [mid.r, mid.g, mid.b, mid.a].into_iter().zip(expected) {
            assert!((got - want).abs() < 1e-6, "{got} vs {want}");
        }
    }
}

//! Radial compositing around the centre of the region.
//!
//! Both processors interpolate between a fixed colour and the source pixel by
//! the pixel's distance from the region centre. Distances are measured from
//! the integer centre of the requested rectangle to integer pixel
//! coordinates.
use crate::color::{lerp, ColorVector, PixelColor};
use crate::error::{ensure_range, Result};
use crate::geometry::{Ellipse, Rectangle};
use crate::processor::{ImageProcessor, RowContext};
use nalgebra::{distance, Point2};

fn center_of(rect: &Rectangle) -> Point2<f32> {
    let c = rect.center();
    Point2::new(c.x as f32, c.y as f32)
}

/// A configured radius wins only when positive and smaller than `half`.
fn effective_radius(configured: Option<f32>, half: f32) -> f32 {
    match configured {
        Some(r) if r > 0.0 => r.min(half),
        _ => half,
    }
}

fn check_radius(name: &'static str, radius: f32) -> Result<()> {
    ensure_range(name, radius, 0.0, f32::MAX)
}

/// Fades a glow colour out from the centre.
///
/// Inside a circle of radius `min(radius, width / 2)` (or `width / 2` when no
/// radius is set) a pixel becomes `lerp(glow, source, d / radius)`: the glow
/// colour at the centre, the untouched source at the rim. Pixels outside the
/// circle are not written.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowProcessor {
    color: ColorVector,
    radius: Option<f32>,
}

impl GlowProcessor {
    pub fn new<C: PixelColor>(color: C) -> Self {
        Self {
            color: color.to_vector(),
            radius: None,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Result<Self> {
        check_radius("radius", radius)?;
        self.radius = Some(radius);
        Ok(self)
    }

    pub fn color(&self) -> ColorVector {
        self.color
    }

    pub fn radius(&self) -> Option<f32> {
        self.radius
    }
}

impl Default for GlowProcessor {
    /// Opaque black glow, automatic radius.
    fn default() -> Self {
        Self {
            color: ColorVector::new(0.0, 0.0, 0.0, 1.0),
            radius: None,
        }
    }
}

impl<C: PixelColor> ImageProcessor<C> for GlowProcessor {
    fn name(&self) -> &'static str {
        "glow"
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        let center = center_of(&ctx.source_rect);
        let max_distance = effective_radius(self.radius, ctx.source_rect.width as f32 * 0.5);
        let circle = Ellipse::new(center, max_distance, max_distance);
        for x in ctx.region.columns() {
            let p = Point2::new(x as f32, y as f32);
            if !circle.contains(p.x, p.y) {
                continue;
            }
            let t = distance(&center, &p) / max_distance;
            let source = ctx.source[(x, y)].to_vector();
            row[x] = C::from_vector(lerp(&self.color, &source, t));
        }
    }
}

/// Darkens toward a vignette colour away from the centre.
///
/// With radii `rx`, `ry` (configured, capped at half the region, or half the
/// region by default) and `max = sqrt(rx² + ry²)`, every pixel in the region
/// becomes `lerp(vignette, source, 1 - 0.9 * d / max)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VignetteProcessor {
    color: ColorVector,
    radius_x: Option<f32>,
    radius_y: Option<f32>,
}

impl VignetteProcessor {
    pub fn new<C: PixelColor>(color: C) -> Self {
        Self {
            color: color.to_vector(),
            radius_x: None,
            radius_y: None,
        }
    }

    pub fn with_radii(mut self, radius_x: f32, radius_y: f32) -> Result<Self> {
        check_radius("radius_x", radius_x)?;
        check_radius("radius_y", radius_y)?;
        self.radius_x = Some(radius_x);
        self.radius_y = Some(radius_y);
        Ok(self)
    }

    pub fn color(&self) -> ColorVector {
        self.color
    }
}

impl Default for VignetteProcessor {
    /// Opaque black vignette, automatic radii.
    fn default() -> Self {
        Self {
            color: ColorVector::new(0.0, 0.0, 0.0, 1.0),
            radius_x: None,
            radius_y: None,
        }
    }
}

impl<C: PixelColor> ImageProcessor<C> for VignetteProcessor {
    fn name(&self) -> &'static str {
        "vignette"
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        let rect = &ctx.source_rect;
        let center = center_of(rect);
        let rx = effective_radius(self.radius_x, rect.width as f32 * 0.5);
        let ry = effective_radius(self.radius_y, rect.height as f32 * 0.5);
        let max_distance = (rx * rx + ry * ry).sqrt();
        for x in ctx.region.columns() {
            let d = distance(&center, &Point2::new(x as f32, y as f32));
            let source = ctx.source[(x, y)].to_vector();
            let t = 1.0 - 0.9 * (d / max_distance);
            row[x] = C::from_vector(lerp(&self.color, &source, t));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba32F;
    use crate::image::{ImageView, PixelBuffer};
    use crate::processor::Pipeline;

    fn approx_eq(a: Rgba32F, b: Rgba32F) -> bool {
        let d = (a.to_vector() - b.to_vector()).abs();
        d.max() < 1e-5
    }

    const WHITE: Rgba32F = Rgba32F::new(1.0, 1.0, 1.0, 1.0);
    const RED: Rgba32F = Rgba32F::new(1.0, 0.0, 0.0, 1.0);

    #[test]
    fn glow_is_solid_at_centre_and_absent_outside() {
        let mut img = PixelBuffer::filled(10, 10, WHITE).unwrap();
        Pipeline::new()
            .process_all(&GlowProcessor::new(RED), &mut img)
            .unwrap();
        assert_eq!(img.get(5, 5), RED);
        // Corner lies outside the radius-5 circle.
        assert_eq!(img.get(0, 0), WHITE);
        // Three pixels out: 3/5 of the way back to the source.
        let p = img.get(8, 5);
        assert!(approx_eq(p, Rgba32F::new(1.0, 0.6, 0.6, 1.0)), "{p:?}");
    }

    #[test]
    fn glow_radius_is_capped_at_half_width() {
        let mut a = PixelBuffer::filled(10, 10, WHITE).unwrap();
        let mut b = a.clone();
        let pipeline = Pipeline::new();
        pipeline
            .process_all(&GlowProcessor::new(RED).with_radius(50.0).unwrap(), &mut a)
            .unwrap();
        pipeline.process_all(&GlowProcessor::new(RED), &mut b).unwrap();
        assert_eq!(a, b);

        let mut c = PixelBuffer::filled(10, 10, WHITE).unwrap();
        pipeline
            .process_all(&GlowProcessor::new(RED).with_radius(2.0).unwrap(), &mut c)
            .unwrap();
        assert_eq!(c.get(8, 5), WHITE);
        assert!(GlowProcessor::new(RED).with_radius(-1.0).is_err());
    }

    #[test]
    fn vignette_keeps_centre_and_darkens_corners() {
        let black = Rgba32F::new(0.0, 0.0, 0.0, 1.0);
        let mut img = PixelBuffer::filled(10, 10, WHITE).unwrap();
        Pipeline::new()
            .process_all(&VignetteProcessor::new(black), &mut img)
            .unwrap();
        assert_eq!(img.get(5, 5), WHITE);
        let corner = img.get(0, 0);
        // d = max distance at (0, 0): 1 - 0.9 = 0.1 of the source.
        assert!(approx_eq(corner, Rgba32F::new(0.1, 0.1, 0.1, 1.0)), "{corner:?}");
        assert!(img.get(2, 2).r > corner.r);
    }
}

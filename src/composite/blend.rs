use crate::color::{lerp, PixelColor};
use crate::error::{ensure_range, Result};
use crate::image::{ImageView, PixelBuffer};
use crate::processor::{ImageProcessor, RowContext};

/// Blends a second buffer over the region.
///
/// The overlay is anchored at the region's addressing origin (see
/// [`crate::geometry::clamp_region`]). Pixels the overlay does not cover, or
/// where it is fully transparent, are left alone. A non-zero opacity is the
/// interpolation factor; an opacity of zero defers to the overlay's own alpha
/// at each pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct BlendProcessor<C> {
    overlay: PixelBuffer<C>,
    opacity: f32,
}

impl<C: PixelColor> BlendProcessor<C> {
    /// `percent` opacity in `[0, 100]`.
    pub fn new(overlay: PixelBuffer<C>, percent: f32) -> Result<Self> {
        ensure_range("percent", percent, 0.0, 100.0)?;
        Ok(Self {
            overlay,
            opacity: percent / 100.0,
        })
    }

    pub fn overlay(&self) -> &PixelBuffer<C> {
        &self.overlay
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

impl<C: PixelColor> ImageProcessor<C> for BlendProcessor<C> {
    fn name(&self) -> &'static str {
        "blend"
    }

    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]) {
        let oy = ctx.region.region_y(y);
        if oy >= self.overlay.height() {
            return;
        }
        for x in ctx.region.columns() {
            let ox = ctx.region.region_x(x);
            if ox >= self.overlay.width() {
                break;
            }
            let over = self.overlay.get(ox, oy).to_vector();
            if over.w <= 0.0 {
                continue;
            }
            let t = if self.opacity > 0.0 { self.opacity } else { over.w };
            let color = ctx.source[(x, y)].to_vector();
            row[x] = C::from_vector(lerp(&color, &over, t));
        }
    }
}

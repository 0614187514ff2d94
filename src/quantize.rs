//! Palette reduction boundary.
//!
//! A [`Quantizer`] turns a buffer into a palette plus one index per pixel.
//! [`quantize`] runs one and writes the expanded result back into the buffer.
//! [`PopularityQuantizer`] is the bundled implementation: a 15-bit color
//! histogram whose most populated cells become the palette.
use crate::color::{ColorVector, PixelColor};
use crate::error::{ensure_range, ProcessError, Result};
use crate::image::{ImageView, PixelBuffer};
use log::debug;
use nalgebra::Vector3;

pub const MAX_PALETTE: usize = 256;

/// Indexed image produced by a [`Quantizer`].
#[derive(Clone, Debug, PartialEq)]
pub struct QuantizedImage<C> {
    pub width: usize,
    pub height: usize,
    pub palette: Vec<C>,
    /// Row-major, one entry per pixel.
    pub indices: Vec<u8>,
}

impl<C: PixelColor> QuantizedImage<C> {
    /// Expand indices through the palette. Indices past the palette end read
    /// as the default (transparent) color.
    pub fn to_pixels(&self) -> Vec<C> {
        self.indices
            .iter()
            .map(|&i| self.palette.get(i as usize).copied().unwrap_or_default())
            .collect()
    }
}

pub trait Quantizer<C: PixelColor> {
    /// Alpha below which a pixel is treated as fully transparent.
    fn threshold(&self) -> f32;

    fn quantize(&self, image: &PixelBuffer<C>, max_colors: usize) -> Result<QuantizedImage<C>>;
}

fn check_max_colors(max_colors: usize) -> Result<()> {
    ensure_range("max_colors", max_colors as f64, 1.0, MAX_PALETTE as f64)
}

/// Reduce `image` to at most `max_colors` (`1..=256`) colors in place.
pub fn quantize<'a, C, Q>(
    image: &'a mut PixelBuffer<C>,
    quantizer: &Q,
    max_colors: usize,
) -> Result<&'a mut PixelBuffer<C>>
where
    C: PixelColor,
    Q: Quantizer<C> + ?Sized,
{
    check_max_colors(max_colors)?;
    let indexed = quantizer.quantize(image, max_colors)?;
    if indexed.palette.len() > max_colors {
        return Err(ProcessError::OutOfRange {
            name: "palette",
            value: indexed.palette.len() as f64,
            min: 1.0,
            max: max_colors as f64,
        });
    }
    debug!(
        "quantize: {} colors for {}x{}",
        indexed.palette.len(),
        indexed.width,
        indexed.height
    );
    let pixels = indexed.to_pixels();
    image.set_pixels(indexed.width, indexed.height, pixels)?;
    Ok(image)
}

const BITS: usize = 5;
const CELLS: usize = 1 << (3 * BITS);

#[inline]
fn cell_of(v: &ColorVector) -> usize {
    let level = |c: f32| ((c.clamp(0.0, 1.0) * 255.0) as usize) >> (8 - BITS);
    (level(v.x) << (2 * BITS)) | (level(v.y) << BITS) | level(v.z)
}

#[derive(Clone, Copy, Default)]
struct Cell {
    sum: ColorVector,
    count: u32,
}

/// Histogram quantizer: the `max_colors` most frequent cells of a 5-5-5 RGB
/// grid, each represented by the mean of its members. Pixels whose alpha is
/// below the threshold share a single transparent palette entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopularityQuantizer {
    threshold: f32,
}

impl PopularityQuantizer {
    pub const DEFAULT_THRESHOLD: f32 = 0.5;

    pub fn new(threshold: f32) -> Result<Self> {
        ensure_range("threshold", threshold, 0.0, 1.0)?;
        Ok(Self { threshold })
    }
}

impl Default for PopularityQuantizer {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl<C: PixelColor> Quantizer<C> for PopularityQuantizer {
    fn threshold(&self) -> f32 {
        self.threshold
    }

    fn quantize(&self, image: &PixelBuffer<C>, max_colors: usize) -> Result<QuantizedImage<C>> {
        check_max_colors(max_colors)?;
        let vectors: Vec<ColorVector> = image.pixels().iter().map(|p| p.to_vector()).collect();

        let mut cells = vec![Cell::default(); CELLS];
        let mut transparent = 0usize;
        for v in &vectors {
            if v.w < self.threshold {
                transparent += 1;
                continue;
            }
            let cell = &mut cells[cell_of(v)];
            cell.sum += v;
            cell.count += 1;
        }

        let mut ranked: Vec<usize> = (0..CELLS).filter(|&i| cells[i].count > 0).collect();
        ranked.sort_by(|&a, &b| cells[b].count.cmp(&cells[a].count).then(a.cmp(&b)));

        // The transparent entry only takes a slot if opaque colors still fit.
        let reserve = transparent > 0 && (ranked.is_empty() || max_colors > 1);
        let slots = max_colors - usize::from(reserve);
        ranked.truncate(slots);

        let means: Vec<ColorVector> = ranked
            .iter()
            .map(|&i| cells[i].sum / cells[i].count as f32)
            .collect();
        let mut palette: Vec<C> = means.iter().map(|&m| C::from_vector(m)).collect();
        let transparent_index = if reserve {
            palette.push(C::default());
            Some((palette.len() - 1) as u8)
        } else {
            None
        };

        let mut lookup: Vec<Option<u8>> = vec![None; CELLS];
        let indices = vectors
            .iter()
            .map(|v| {
                if let (Some(t), true) = (transparent_index, v.w < self.threshold) {
                    return t;
                }
                let key = cell_of(v);
                *lookup[key].get_or_insert_with(|| nearest(&means, v))
            })
            .collect();

        Ok(QuantizedImage {
            width: image.width(),
            height: image.height(),
            palette,
            indices,
        })
    }
}

fn nearest(means: &[ColorVector], v: &ColorVector) -> u8 {
    let rgb = Vector3::new(v.x, v.y, v.z);
    let mut best = (0usize, f32::INFINITY);
    for (i, m) in means.iter().enumerate() {
        let d = (Vector3::new(m.x, m.y, m.z) - rgb).norm_squared();
        if d < best.1 {
            best = (i, d);
        }
    }
    best.0 as u8
}

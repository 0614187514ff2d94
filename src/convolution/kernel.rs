//! Weight tables for the convolution processors.
//!
//! [`Kernel2D`] is a dense grid with odd side lengths, sampled around its
//! centre cell. [`Kernel1D`] holds the taps of one axis of a separable
//! filter. Both are immutable once built and shared read-only by every row
//! worker.
use crate::error::{ensure_range, ProcessError, Result};

/// Largest radius accepted by the generated kernels. Gaussian sigmas are
/// capped at the same value since their radius is `ceil(sigma)`.
pub const MAX_RADIUS: usize = 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct Kernel2D {
    rows: usize,
    cols: usize,
    weights: Vec<f32>,
}

fn check_shape(rows: usize, cols: usize, len: usize) -> Result<()> {
    if rows % 2 == 0 || cols % 2 == 0 || len != rows * cols {
        return Err(ProcessError::InvalidKernel { rows, cols });
    }
    Ok(())
}

impl Kernel2D {
    /// Row-major weights, `weights.len() == rows * cols`.
    pub fn new(rows: usize, cols: usize, weights: Vec<f32>) -> Result<Self> {
        check_shape(rows, cols, weights.len())?;
        Ok(Self {
            rows,
            cols,
            weights,
        })
    }

    pub fn from_rows<const R: usize, const K: usize>(table: [[f32; K]; R]) -> Result<Self> {
        Self::new(R, K, table.iter().flatten().copied().collect())
    }

    /// Built-in tables are odd-sized by construction.
    pub(crate) fn from_table<const N: usize>(table: [[f32; N]; N]) -> Self {
        debug_assert!(N % 2 == 1);
        Self {
            rows: N,
            cols: N,
            weights: table.iter().flatten().copied().collect(),
        }
    }

    /// 1x1 kernel of weight 1.
    pub fn identity() -> Self {
        Self::from_table([[1.0]])
    }

    /// Uniform normalised `(2r+1)²` kernel, `radius <= MAX_RADIUS`.
    pub fn box_blur(radius: usize) -> Result<Self> {
        ensure_range("radius", radius as f64, 0.0, MAX_RADIUS as f64)?;
        Ok(Self::uniform(radius))
    }

    pub(crate) fn uniform(radius: usize) -> Self {
        let side = 2 * radius + 1;
        let weight = 1.0 / (side * side) as f32;
        Self {
            rows: side,
            cols: side,
            weights: vec![weight; side * side],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn radius_x(&self) -> usize {
        self.cols / 2
    }

    #[inline]
    pub fn radius_y(&self) -> usize {
        self.rows / 2
    }

    #[inline]
    pub fn weight(&self, fy: usize, fx: usize) -> f32 {
        self.weights[fy * self.cols + fx]
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

/// Taps of one axis of a separable filter, left to right.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel1D {
    taps: Vec<f32>,
}

/// Unnormalised Gaussian samples for `sigma`, `2*ceil(sigma)+1` taps.
fn gaussian_samples(sigma: f32) -> Result<Vec<f32>> {
    ensure_range("sigma", sigma, f32::MIN_POSITIVE, MAX_RADIUS as f32)?;
    let radius = sigma.ceil() as isize;
    let denom = 2.0 * sigma * sigma;
    Ok((-radius..=radius)
        .map(|x| (-((x * x) as f32) / denom).exp())
        .collect())
}

impl Kernel1D {
    pub fn new(taps: Vec<f32>) -> Result<Self> {
        check_shape(1, taps.len(), taps.len())?;
        Ok(Self { taps })
    }

    /// Normalised Gaussian.
    pub fn gaussian(sigma: f32) -> Result<Self> {
        let mut taps = gaussian_samples(sigma)?;
        let sum: f32 = taps.iter().sum();
        taps.iter_mut().for_each(|t| *t /= sum);
        Ok(Self { taps })
    }

    /// Gaussian with every tap negated except the centre, which is raised so
    /// the taps still sum to one.
    pub fn sharpen(sigma: f32) -> Result<Self> {
        let mut taps = gaussian_samples(sigma)?;
        let sum: f32 = taps.iter().sum();
        let mid = taps.len() / 2;
        for (i, t) in taps.iter_mut().enumerate() {
            let raised = if i == mid { 2.0 * sum - *t } else { -*t };
            *t = raised / sum;
        }
        Ok(Self { taps })
    }

    #[inline]
    pub fn taps(&self) -> &[f32] {
        &self.taps
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.taps.len() / 2
    }
}

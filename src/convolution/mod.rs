//! Neighbourhood transforms.
//!
//! - [`dense`]: one 2D kernel, weighted RGB sum per pixel.
//! - [`gradient`]: an X/Y kernel pair combined by magnitude (edge operators).
//! - [`two_pass`]: a horizontal then a vertical 1D kernel applied in
//!   sequence (Gaussian blur and sharpen).
//!
//! Every engine clamps samples to the buffer edges and keeps the target's
//! alpha. [`edges`] and [`blur`] are the named operators built on top.

pub mod blur;
pub mod dense;
pub mod edges;
pub mod gradient;
pub mod kernel;
pub mod two_pass;

pub use self::blur::{BoxBlur, GaussianBlur, GaussianSharpen};
pub use self::dense::ConvolutionProcessor;
pub use self::edges::{EdgeDetection, EdgeDetector};
pub use self::gradient::GradientProcessor;
pub use self::kernel::{Kernel1D, Kernel2D};
pub use self::two_pass::SeparableProcessor;

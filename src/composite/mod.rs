//! Per-pixel compositing over the canonical color vector.
//!
//! Each processor is a single rule applied independently per pixel, so all of
//! them run fully parallel. The radial pair doubles as the post-composite
//! layer of the stylised colour presets.

pub mod alpha;
pub mod background;
pub mod blend;
pub mod radial;

pub use self::alpha::AlphaProcessor;
pub use self::background::BackgroundColorProcessor;
pub use self::blend::BlendProcessor;
pub use self::radial::{GlowProcessor, VignetteProcessor};

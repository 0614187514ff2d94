//! Processor lifecycle and orchestration.
//!
//! Every transform implements [`ImageProcessor`]: three hooks run by
//! [`Pipeline::apply`] in a fixed order.
//!
//! 1. `setup` (invoking thread): may rewrite the source in place or resize the
//!    target canvas.
//! 2. `process_row` (worker threads): called once per target row in
//!    [`ImageProcessor::rows`]. Each call owns exactly one row slice of the
//!    target, so workers never share output memory. The source is read-only.
//! 3. `post_process` (invoking thread): runs after every row has finished and
//!    may run further processors over the finished target.
//!
//! `setup` and `post_process` default to no-ops. Row progress is reported
//! through [`ProgressHandlers`]; delivery order across rows is unspecified
//! and handlers may be invoked from several threads at once.

mod dispatch;
pub mod options;
pub mod pipeline;
pub mod progress;

pub use self::options::ParallelOptions;
pub use self::pipeline::Pipeline;
pub use self::progress::{ProgressHandler, ProgressHandlers, RowProgress, SubscriptionId};

use crate::color::PixelColor;
use crate::error::Result;
use crate::geometry::{ClampedRegion, Rectangle};
use crate::image::{PixelBuffer, PixelView};
use std::ops::Range;

/// Read-only state shared by all row workers of one invocation.
pub struct RowContext<'a, C> {
    /// Source pixels after `setup`.
    pub source: PixelView<'a, C>,
    /// Rectangle requested by the caller, unclamped.
    pub source_rect: Rectangle,
    /// `source_rect` clamped to the source buffer.
    pub region: ClampedRegion,
    pub target_width: usize,
    pub target_height: usize,
}

/// A transform that can be driven by [`Pipeline`].
pub trait ImageProcessor<C: PixelColor>: Sync {
    /// Short identifier used in log records.
    fn name(&self) -> &'static str;

    /// Whether [`Pipeline::process`] seeds the target with a copy of the
    /// source (filters) rather than a blank canvas of the same size
    /// (samplers that write every target pixel themselves).
    fn clones_source(&self) -> bool {
        true
    }

    fn setup(
        &self,
        _target: &mut PixelBuffer<C>,
        _source: &mut PixelBuffer<C>,
        _source_rect: Rectangle,
        _pipeline: &Pipeline,
    ) -> Result<()> {
        Ok(())
    }

    /// Target rows handed to `process_row`. Rows past the target's height
    /// are dropped by the pipeline.
    fn rows(&self, ctx: &RowContext<'_, C>) -> Range<usize> {
        ctx.region.rows()
    }

    /// Write target row `y`. Must only depend on `ctx`, `y` and `row`.
    fn process_row(&self, ctx: &RowContext<'_, C>, y: usize, row: &mut [C]);

    fn post_process(
        &self,
        _target: &mut PixelBuffer<C>,
        _source_rect: Rectangle,
        _pipeline: &Pipeline,
    ) -> Result<()> {
        Ok(())
    }
}

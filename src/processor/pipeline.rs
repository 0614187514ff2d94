use super::dispatch::WorkerPool;
use super::{ImageProcessor, ParallelOptions, ProgressHandlers, RowContext, RowProgress, SubscriptionId};
use crate::color::PixelColor;
use crate::error::{ProcessError, Result};
use crate::geometry::{clamp_region, Rectangle};
use crate::image::{ImageView, PixelBuffer};
use log::debug;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Drives processors through their setup / parallel / post phases.
///
/// A pipeline carries no per-invocation state, so one instance can run any
/// number of processors back to back. Chaining works by feeding the buffer
/// returned by [`Pipeline::process`] into the next call. A thread bound is
/// turned into a worker pool once, when the pipeline is built.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    options: ParallelOptions,
    workers: WorkerPool,
    progress: ProgressHandlers,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel_options(options: ParallelOptions) -> Result<Self> {
        Ok(Self {
            options,
            workers: WorkerPool::build(&options)?,
            progress: ProgressHandlers::new(),
        })
    }

    pub fn parallel_options(&self) -> &ParallelOptions {
        &self.options
    }

    /// Register a row-progress handler. See [`super::progress`] for the
    /// delivery guarantees (there are few).
    pub fn on_progress<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&RowProgress) + Send + Sync + 'static,
    {
        self.progress.subscribe(handler)
    }

    pub fn remove_progress(&mut self, id: SubscriptionId) -> bool {
        self.progress.unsubscribe(id)
    }

    /// Same parallel options and worker pool, no subscribers. Used for
    /// processors run from another processor's setup or post phase.
    pub fn nested(&self) -> Self {
        Self {
            options: self.options,
            workers: self.workers.clone(),
            progress: ProgressHandlers::new(),
        }
    }

    /// Run `processor` over `source_rect` of `source`, writing into `target`.
    ///
    /// Fails before any pixel is written when `source_rect` has positive area
    /// but lies entirely outside `source`. An empty `source_rect` is a no-op.
    pub fn apply<C, P>(
        &self,
        processor: &P,
        target: &mut PixelBuffer<C>,
        source: &mut PixelBuffer<C>,
        source_rect: Rectangle,
    ) -> Result<()>
    where
        C: PixelColor,
        P: ImageProcessor<C> + ?Sized,
    {
        let name = processor.name();
        if source_rect.is_empty() {
            debug!("{name}: empty region {source_rect:?}, nothing to do");
            return Ok(());
        }
        if !source_rect.intersects(&source.bounds()) {
            return Err(ProcessError::RegionOutsideBounds {
                rect: source_rect,
                width: source.width(),
                height: source.height(),
            });
        }

        processor.setup(target, source, source_rect, self)?;

        let region = clamp_region(source_rect, source.width(), source.height());
        let ctx = RowContext {
            source: source.view(),
            source_rect,
            region,
            target_width: target.width(),
            target_height: target.height(),
        };
        let rows = processor.rows(&ctx);
        let rows = rows.start.min(ctx.target_height)..rows.end.min(ctx.target_height);
        let total_rows = rows.len();
        debug!(
            "{name}: region {:?} -> rows {rows:?} on {}x{} target",
            region.as_rect(),
            ctx.target_width,
            ctx.target_height
        );

        let processed = AtomicUsize::new(0);
        let progress = &self.progress;
        self.workers.for_each_row(target, rows, |y, row| {
            processor.process_row(&ctx, y, row);
            if !progress.is_empty() {
                let rows_processed = processed.fetch_add(1, Ordering::Relaxed) + 1;
                progress.notify(&RowProgress {
                    row: y,
                    rows_processed,
                    total_rows,
                });
            }
        });

        processor.post_process(target, source_rect, self)
    }

    /// Run `processor` over `source_rect` of `image` and replace `image` with
    /// the result. Filters start from a copy of `image`; samplers start from a
    /// blank canvas and may resize it during setup.
    pub fn process<'a, C, P>(
        &self,
        processor: &P,
        image: &'a mut PixelBuffer<C>,
        source_rect: Rectangle,
    ) -> Result<&'a mut PixelBuffer<C>>
    where
        C: PixelColor,
        P: ImageProcessor<C> + ?Sized,
    {
        let mut target = if processor.clones_source() {
            image.clone()
        } else {
            PixelBuffer::new(image.width(), image.height())?
        };
        self.apply(processor, &mut target, image, source_rect)?;
        *image = target;
        Ok(image)
    }

    /// [`Pipeline::process`] over the whole image.
    pub fn process_all<'a, C, P>(
        &self,
        processor: &P,
        image: &'a mut PixelBuffer<C>,
    ) -> Result<&'a mut PixelBuffer<C>>
    where
        C: PixelColor,
        P: ImageProcessor<C> + ?Sized,
    {
        let bounds = image.bounds();
        self.process(processor, image, bounds)
    }
}

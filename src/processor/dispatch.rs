//! Row-parallel dispatch over a target buffer.
//!
//! The target's storage is split into one `&mut` slice per row, so each
//! worker owns its rows outright. With the `parallel` feature rows are
//! scheduled by rayon, inside a dedicated pool when a thread bound is set;
//! without it they run in order on the calling thread.
//!
//! The bounded pool is built once per [`WorkerPool`] and shared by every
//! clone of it, so nested passes reuse their parent's workers.
use super::ParallelOptions;
use crate::color::PixelColor;
use crate::error::Result;
use crate::image::{ImageView, ImageViewMut, PixelBuffer};
use std::ops::Range;

#[cfg(feature = "parallel")]
use std::sync::Arc;

/// Workers that run the row phase. Cloning shares the underlying pool.
#[derive(Clone, Debug, Default)]
pub(crate) struct WorkerPool {
    /// `None` runs on rayon's global pool.
    #[cfg(feature = "parallel")]
    pub(super) pool: Option<Arc<rayon::ThreadPool>>,
}

impl WorkerPool {
    pub(crate) fn build(options: &ParallelOptions) -> Result<Self> {
        options.validate()?;

        #[cfg(feature = "parallel")]
        let pool = match options.max_degree_of_parallelism {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| crate::error::ProcessError::ThreadPool(e.to_string()))?;
                log::debug!("built a {threads}-thread row pool");
                Some(Arc::new(pool))
            }
            None => None,
        };

        Ok(Self {
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    pub(crate) fn for_each_row<C, F>(&self, target: &mut PixelBuffer<C>, rows: Range<usize>, f: F)
    where
        C: PixelColor,
        F: Fn(usize, &mut [C]) + Send + Sync,
    {
        let width = target.width();
        let end = rows.end.min(target.height());
        let start = rows.start.min(end);
        if start == end {
            return;
        }
        let slice = &mut target.as_mut_slice()[start * width..end * width];

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let mut run = || {
                slice
                    .par_chunks_mut(width)
                    .enumerate()
                    .for_each(|(i, row)| f(start + i, row));
            };
            match &self.pool {
                Some(pool) => {
                    log::trace!(
                        "dispatching rows {start}..{end} on a {}-thread pool",
                        pool.current_num_threads()
                    );
                    pool.install(run);
                }
                None => run(),
            }
        }

        #[cfg(not(feature = "parallel"))]
        slice
            .chunks_mut(width)
            .enumerate()
            .for_each(|(i, row)| f(start + i, row));
    }
}

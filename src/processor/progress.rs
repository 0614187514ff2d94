//! Multicast row-progress notifications.
//!
//! Handlers are invoked from whichever worker finished the row, possibly
//! concurrently, and rows are not reported in order. `rows_processed` is a
//! snapshot of a shared counter; subscribers must not expect it to increase
//! monotonically across deliveries.
use std::fmt;
use std::sync::Arc;

/// Payload delivered to progress handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowProgress {
    /// Target row that was just written.
    pub row: usize,
    /// Rows finished so far in this invocation, including `row`.
    pub rows_processed: usize,
    /// Rows scheduled for this invocation.
    pub total_rows: usize,
}

pub type ProgressHandler = Arc<dyn Fn(&RowProgress) + Send + Sync>;

/// Token returned by [`ProgressHandlers::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Clone, Default)]
pub struct ProgressHandlers {
    next_id: u64,
    handlers: Vec<(SubscriptionId, ProgressHandler)>,
}

impl ProgressHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&RowProgress) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Arc::new(handler)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sid, _)| *sid != id);
        self.handlers.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub(crate) fn notify(&self, event: &RowProgress) {
        for (_, handler) in &self.handlers {
            handler(event);
        }
    }
}

impl fmt::Debug for ProgressHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressHandlers")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}

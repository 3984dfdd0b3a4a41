//! Loading counter with a `watch`-published busy flag

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;

use super::guard::LoadingGuard;

#[derive(Debug)]
struct CounterInner {
    count: Mutex<usize>,
    busy: watch::Sender<bool>,
}

/// Reference count of outstanding operations exposed as a busy signal
///
/// Clones share the same count. The busy flag is only republished when it
/// flips, so observers see exactly one notification per idle/busy edge.
#[derive(Debug, Clone)]
pub struct LoadingCounter {
    inner: Arc<CounterInner>,
}

impl LoadingCounter {
    #[must_use]
    pub fn new() -> Self {
        let (busy, _) = watch::channel(false);
        Self {
            inner: Arc::new(CounterInner {
                count: Mutex::new(0),
                busy,
            }),
        }
    }

    /// Increment the count and republish the busy flag
    pub fn add_loader(&self) {
        let mut count = self.inner.count.lock();
        *count += 1;
        self.publish(*count);
    }

    /// Decrement the count and republish the busy flag
    ///
    /// The count never goes below zero. An unpaired call is logged and
    /// otherwise ignored.
    pub fn remove_loader(&self) {
        let mut count = self.inner.count.lock();
        if *count == 0 {
            log::warn!("remove_loader called with no outstanding loaders");
            return;
        }
        *count -= 1;
        self.publish(*count);
    }

    /// Register an outstanding operation for the lifetime of the returned guard
    #[must_use = "dropping the guard immediately releases the loader"]
    pub fn acquire(&self) -> LoadingGuard {
        self.add_loader();
        LoadingGuard::new(self.clone())
    }

    /// Number of operations currently outstanding
    #[must_use]
    pub fn count(&self) -> usize {
        *self.inner.count.lock()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        *self.inner.busy.borrow()
    }

    /// Subscribe to busy-flag changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.busy.subscribe()
    }

    // Called with the count lock held so concurrent updates publish in order.
    fn publish(&self, count: usize) {
        let busy = count > 0;
        self.inner.busy.send_if_modified(|current| {
            if *current == busy {
                return false;
            }
            *current = busy;
            true
        });
    }
}

impl Default for LoadingCounter {
    fn default() -> Self {
        Self::new()
    }
}

//! Running totals of presenter activity

use std::sync::atomic::{AtomicU64, Ordering};

use super::types::PresenterEvent;

/// Counters folded from every lifecycle event the presenter records
///
/// Counted whether or not anyone subscribes to the bus, and whether or not
/// broadcasting is enabled.
#[derive(Debug, Default)]
pub struct PresenterStats {
    queries_updated: AtomicU64,
    searches_issued: AtomicU64,
    searches_completed: AtomicU64,
    results_discarded: AtomicU64,
    searches_failed: AtomicU64,
    messages_cleared: AtomicU64,
}

impl PresenterStats {
    pub(crate) fn record(&self, event: &PresenterEvent) {
        let counter = match event {
            PresenterEvent::QueryUpdated { .. } => &self.queries_updated,
            PresenterEvent::SearchStarted { .. } => &self.searches_issued,
            PresenterEvent::SearchCompleted { .. } => &self.searches_completed,
            PresenterEvent::ResultsDiscarded { .. } => &self.results_discarded,
            PresenterEvent::SearchFailed { .. } => &self.searches_failed,
            // Dismissing an id that is already gone changes nothing
            PresenterEvent::MessageCleared { removed: true, .. } => &self.messages_cleared,
            PresenterEvent::MessageCleared { .. } | PresenterEvent::Shutdown { .. } => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            queries_updated: self.queries_updated.load(Ordering::Relaxed),
            searches_issued: self.searches_issued.load(Ordering::Relaxed),
            searches_completed: self.searches_completed.load(Ordering::Relaxed),
            results_discarded: self.results_discarded.load(Ordering::Relaxed),
            searches_failed: self.searches_failed.load(Ordering::Relaxed),
            messages_cleared: self.messages_cleared.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`PresenterStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub queries_updated: u64,
    pub searches_issued: u64,
    /// Searches whose results were published
    pub searches_completed: u64,
    /// Successful searches dropped because a later-issued one was already shown
    pub results_discarded: u64,
    pub searches_failed: u64,
    pub messages_cleared: u64,
}

impl StatsSnapshot {
    /// Searches that reported back, whatever the outcome
    #[must_use]
    pub fn searches_settled(&self) -> u64 {
        self.searches_completed + self.results_discarded + self.searches_failed
    }

    /// Issued searches that have not reported back
    ///
    /// Searches abandoned at shutdown stay in this count.
    #[must_use]
    pub fn searches_outstanding(&self) -> u64 {
        self.searches_issued.saturating_sub(self.searches_settled())
    }

    /// Share of settled searches whose results reached the screen
    #[must_use]
    pub fn hit_rate(&self) -> Option<f64> {
        let settled = self.searches_settled();
        (settled > 0).then(|| self.searches_completed as f64 / settled as f64)
    }
}

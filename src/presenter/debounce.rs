//! Cancellable trailing-edge debounce timer

use std::pin::Pin;
use std::time::Duration;
use tokio::time::{Instant, Sleep};

/// Holds the latest pushed value until `delay` passes with no newer push
///
/// Each [`push`](Debouncer::push) replaces the pending value and restarts
/// the timer, so only the last value of a burst is ever yielded.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<T>,
    timer: Pin<Box<Sleep>>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            timer: Box::pin(tokio::time::sleep(delay)),
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value`, superseding any pending one
    ///
    /// Returns the superseded value, if there was one.
    pub fn push(&mut self, value: T) -> Option<T> {
        let superseded = self.pending.replace(value);
        self.timer.as_mut().reset(Instant::now() + self.delay);
        superseded
    }

    /// Drop the pending value without yielding it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the pending value's quiet period to elapse
    ///
    /// Never resolves while nothing is pending. Cancel safe: dropping the
    /// future before it resolves leaves the pending value in place.
    pub async fn ready(&mut self) -> T {
        if self.pending.is_none() {
            return std::future::pending().await;
        }
        self.timer.as_mut().await;
        match self.pending.take() {
            Some(value) => value,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUANTUM: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_yields_after_quiet_period() {
        let mut debouncer = Debouncer::new(QUANTUM);
        let start = Instant::now();

        debouncer.push("batman");
        let value = debouncer.ready().await;

        assert_eq!(value, "batman");
        assert_eq!(start.elapsed(), QUANTUM);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_push_restarts_timer_and_keeps_last_value() {
        let mut debouncer = Debouncer::new(QUANTUM);
        let start = Instant::now();

        assert_eq!(debouncer.push("batman"), None);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(debouncer.push("batman begins"), Some("batman"));

        let value = debouncer.ready().await;
        assert_eq!(value, "batman begins");
        assert_eq!(start.elapsed(), Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_debouncer_never_fires() {
        let mut debouncer: Debouncer<&str> = Debouncer::new(QUANTUM);
        let fired = tokio::time::timeout(Duration::from_secs(5), debouncer.ready()).await;
        assert!(fired.is_err(), "nothing pending, nothing to yield");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_value() {
        let mut debouncer = Debouncer::new(QUANTUM);
        debouncer.push("joker");
        assert_eq!(debouncer.cancel(), Some("joker"));

        let fired = tokio::time::timeout(QUANTUM * 2, debouncer.ready()).await;
        assert!(fired.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_ready_future_keeps_value() {
        let mut debouncer = Debouncer::new(QUANTUM);
        debouncer.push("robin");

        let early = tokio::time::timeout(Duration::from_millis(50), debouncer.ready()).await;
        assert!(early.is_err());
        assert!(debouncer.is_pending());

        assert_eq!(debouncer.ready().await, "robin");
    }
}

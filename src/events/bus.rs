//! Broadcast of presenter lifecycle events

use std::sync::Arc;
use tokio::sync::broadcast;

use super::stats::PresenterStats;
use super::types::PresenterEvent;

/// Fan-out of [`PresenterEvent`]s plus the presenter's activity totals
///
/// Publishing never blocks and never fails: with nobody subscribed, or with
/// broadcasting disabled, the event is only counted. Slow subscribers skip
/// ahead and observe `RecvError::Lagged`. Clones share the channel and stats.
#[derive(Debug, Clone)]
pub struct PresenterEventBus {
    sender: broadcast::Sender<PresenterEvent>,
    stats: Arc<PresenterStats>,
    broadcast: bool,
}

impl PresenterEventBus {
    /// Create a bus buffering up to `capacity` events per subscriber
    ///
    /// A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            log::warn!("Presenter event capacity of 0 raised to 1");
        }
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            stats: Arc::new(PresenterStats::default()),
            broadcast: true,
        }
    }

    /// A bus that only keeps stats; subscribers never receive anything
    #[must_use]
    pub fn silent() -> Self {
        Self {
            broadcast: false,
            ..Self::new(1)
        }
    }

    /// Count `event` and hand it to current subscribers
    ///
    /// Returns how many subscribers received it.
    pub fn publish(&self, event: PresenterEvent) -> usize {
        self.stats.record(&event);
        if !self.broadcast {
            return 0;
        }
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                log::trace!("No subscribers for presenter event {event:?}");
                0
            }
        }
    }

    /// Subscribe to events published from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PresenterEvent> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn is_broadcasting(&self) -> bool {
        self.broadcast
    }

    #[must_use]
    pub fn stats(&self) -> &PresenterStats {
        &self.stats
    }
}

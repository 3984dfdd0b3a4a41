//! Getter methods for `PresenterConfig`

use std::time::Duration;

use super::types::PresenterConfig;

impl PresenterConfig {
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub fn debounce_ms(&self) -> u64 {
        self.debounce_ms
    }

    #[must_use]
    pub fn initial_query(&self) -> &str {
        &self.initial_query
    }

    #[must_use]
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    #[must_use]
    pub fn enable_events(&self) -> bool {
        self.enable_events
    }
}

//! Fluent builder for `PresenterConfig`
//!
//! Every field has a default, so the builder needs no typestate. Validation
//! happens once in `build()` and is shared with JSON loading.

use anyhow::{Context, Result, anyhow};
use std::time::Duration;

use super::types::PresenterConfig;
use crate::utils::MAX_DEBOUNCE_MS;

#[derive(Debug, Clone, Default)]
pub struct PresenterConfigBuilder {
    pub(crate) config: PresenterConfig,
}

impl PresenterConfig {
    /// Create a builder for configuring a `PresenterConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> PresenterConfigBuilder {
        PresenterConfigBuilder::default()
    }

    /// Load a configuration from JSON, filling missing fields with defaults
    ///
    /// # Example
    /// ```rust
    /// # use search_presenter::config::PresenterConfig;
    /// # fn main() -> anyhow::Result<()> {
    /// let config = PresenterConfig::from_json(r#"{ "debounce_ms": 150 }"#)?;
    /// assert_eq!(config.debounce_ms(), 150);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PresenterConfig =
            serde_json::from_str(json).context("Invalid presenter configuration JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the presenter relies on
    ///
    /// # Errors
    ///
    /// Returns an error if the event capacity is zero or the debounce quantum
    /// exceeds `MAX_DEBOUNCE_MS`.
    pub fn validate(&self) -> Result<()> {
        if self.event_capacity == 0 {
            return Err(anyhow!("event_capacity must be greater than zero"));
        }
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(anyhow!(
                "debounce_ms must be at most {MAX_DEBOUNCE_MS}, got {}",
                self.debounce_ms
            ));
        }
        Ok(())
    }
}

impl PresenterConfigBuilder {
    /// Set the debounce quantum
    ///
    /// Sub-millisecond precision is truncated.
    #[must_use]
    pub fn debounce(mut self, delay: Duration) -> Self {
        self.config.debounce_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn debounce_ms(mut self, millis: u64) -> Self {
        self.config.debounce_ms = millis;
        self
    }

    #[must_use]
    pub fn initial_query(mut self, query: impl Into<String>) -> Self {
        self.config.initial_query = query.into();
        self
    }

    /// Set the lifecycle event bus capacity
    #[must_use]
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.config.event_capacity = capacity;
        self
    }

    #[must_use]
    pub fn enable_events(mut self, enabled: bool) -> Self {
        self.config.enable_events = enabled;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any value fails [`PresenterConfig::validate`].
    pub fn build(self) -> Result<PresenterConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

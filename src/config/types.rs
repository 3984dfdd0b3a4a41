//! Core configuration types for the search presenter
//!
//! This module contains the `PresenterConfig` struct that defines the tunable
//! parameters of a presenter instance.

use serde::{Deserialize, Serialize};

use crate::utils::{DEFAULT_DEBOUNCE_MS, DEFAULT_EVENT_CAPACITY};

/// Main configuration struct for a search presenter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// Quiet period after the last query edit before a search is issued.
    pub(crate) debounce_ms: u64,

    /// Query text shown before the first edit.
    ///
    /// Searched once the first debounce quantum elapses, unless an edit
    /// arrives first.
    pub(crate) initial_query: String,

    /// Buffer size of the lifecycle event bus.
    ///
    /// Checked to be greater than zero by the builder and `from_json`; a
    /// zero that bypasses validation is raised to one by the bus.
    pub(crate) event_capacity: usize,

    /// Whether lifecycle events are published at all
    pub(crate) enable_events: bool,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            initial_query: String::new(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
            enable_events: true,
        }
    }
}

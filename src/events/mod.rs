//! Lifecycle events for observing a running presenter
//!
//! Every transition the presenter makes (query edits, search start,
//! completion, discard and failure, message dismissal, shutdown) is recorded
//! on a [`PresenterEventBus`]. The bus keeps running [`PresenterStats`] and
//! broadcasts the events to any subscribers. No presenter state depends on
//! anyone receiving them.

mod bus;
mod stats;
mod types;

pub use bus::PresenterEventBus;
pub use stats::{PresenterStats, StatsSnapshot};
pub use types::{PresenterEvent, ShutdownReason};

//! Debounced search presenter
//!
//! `SearchPresenter` turns free-text query edits into a debounced stream of
//! search invocations, tracks outstanding searches with a [`LoadingCounter`]
//! and turns failures into dismissible messages on a [`MessageQueue`]. The
//! rendering layer reads [`PresentationState`] snapshots and sends
//! [`UiEvent`]s back through an [`EventSink`].
//!
//! # Architecture
//!
//! - `source` - The opaque search collaborator trait
//! - `debounce` - Resettable trailing-edge timer
//! - `state` - UI events, event sink and the presentation snapshot
//! - `orchestrator` - Driver task owning every state transition
//! - `errors` - Search invocation and API errors
//!
//! # Example
//!
//! ```ignore
//! use search_presenter::{PresenterConfig, SearchPresenter};
//!
//! let presenter = SearchPresenter::start(
//!     |query: String| async move { catalog.lookup(&query).await },
//!     PresenterConfig::default(),
//! );
//!
//! presenter.update_query("batman")?;
//! let mut states = presenter.subscribe();
//! while states.changed().await.is_ok() {
//!     render(&states.borrow_and_update());
//! }
//! ```

mod debounce;
mod errors;
mod orchestrator;
mod source;
mod state;

pub use debounce::Debouncer;
pub use errors::{PresenterError, SearchInvocationError};
pub use source::SearchSource;
pub use state::{EventSink, PresentationState, UiEvent};

use std::sync::Arc;
use tokio::sync::{Notify, mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::PresenterConfig;
use crate::events::{PresenterEventBus, StatsSnapshot};
use crate::loading::LoadingCounter;
use crate::messages::{MessageId, MessageQueue};
use orchestrator::{Orchestrator, OrchestratorParts};

/// Handle to a running search presenter
///
/// Dropping the handle stops the presenter abruptly; prefer
/// [`shutdown`](SearchPresenter::shutdown) for an orderly stop.
pub struct SearchPresenter<S: SearchSource> {
    config: PresenterConfig,
    sink: EventSink,
    state: watch::Receiver<PresentationState<S::Item>>,
    query: watch::Receiver<String>,
    loading: LoadingCounter,
    messages: MessageQueue,
    events: PresenterEventBus,
    shutdown: Arc<Notify>,
    driver: Option<JoinHandle<()>>,
}

impl<S: SearchSource> SearchPresenter<S> {
    /// Start a presenter backed by `source`
    ///
    /// The initial query from `config` is displayed at once and searched
    /// after one debounce quantum, unless an `UpdateQuery` supersedes it.
    /// An `event_capacity` of zero is raised to one.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(source: S, config: PresenterConfig) -> Self {
        let (sender, inbox) = mpsc::unbounded_channel();
        let sink = EventSink::new(sender);
        let loading = LoadingCounter::new();
        let messages = MessageQueue::new();
        let events = if config.enable_events() {
            PresenterEventBus::new(config.event_capacity())
        } else {
            PresenterEventBus::silent()
        };

        let (query_tx, query_rx) = watch::channel(config.initial_query().to_string());
        let (state_tx, state_rx) = watch::channel(PresentationState::assemble(
            config.initial_query().to_string(),
            Arc::new(Vec::new()),
            false,
            None,
            sink.clone(),
        ));

        let orchestrator = Orchestrator::new(OrchestratorParts {
            source,
            debounce: config.debounce(),
            loading: loading.clone(),
            messages: messages.clone(),
            events: events.clone(),
            query: query_tx,
            state: state_tx,
            sink: sink.clone(),
        });

        let shutdown = Arc::new(Notify::new());
        let driver = tokio::spawn(orchestrator.run(inbox, Arc::clone(&shutdown)));

        tracing::debug!(
            debounce_ms = config.debounce_ms(),
            events = config.enable_events(),
            "Search presenter started"
        );

        Self {
            config,
            sink,
            state: state_rx,
            query: query_rx,
            loading,
            messages,
            events,
            shutdown,
            driver: Some(driver),
        }
    }

    /// Start a presenter with the default configuration
    pub fn with_defaults(source: S) -> Self {
        Self::start(source, PresenterConfig::default())
    }

    /// A cloneable handle for sending UI events
    #[must_use]
    pub fn event_sink(&self) -> EventSink {
        self.sink.clone()
    }

    /// Replace the live query text and schedule a debounced search
    ///
    /// # Errors
    ///
    /// Returns [`PresenterError::Closed`] once the presenter has shut down.
    pub fn update_query(&self, query: impl Into<String>) -> Result<(), PresenterError> {
        self.sink.update_query(query)
    }

    /// Dismiss a message; unknown ids are ignored
    ///
    /// # Errors
    ///
    /// Returns [`PresenterError::Closed`] once the presenter has shut down.
    pub fn clear_message(&self, id: MessageId) -> Result<(), PresenterError> {
        self.sink.clear_message(id)
    }

    /// The latest presentation snapshot
    #[must_use]
    pub fn state(&self) -> PresentationState<S::Item> {
        self.state.borrow().clone()
    }

    /// Subscribe to presentation snapshots
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PresentationState<S::Item>> {
        self.state.clone()
    }

    /// Subscribe to the live query text
    #[must_use]
    pub fn query_signal(&self) -> watch::Receiver<String> {
        self.query.clone()
    }

    /// The presenter's loading counter
    ///
    /// Other work on the same screen may hold loaders on it; the
    /// `refreshing` flag reflects all of them.
    #[must_use]
    pub fn loading(&self) -> &LoadingCounter {
        &self.loading
    }

    #[must_use]
    pub fn messages(&self) -> &MessageQueue {
        &self.messages
    }

    /// Lifecycle events; silent when events are disabled in the config
    #[must_use]
    pub fn events(&self) -> &PresenterEventBus {
        &self.events
    }

    /// Activity totals since start, kept even when events are disabled
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.events.stats().snapshot()
    }

    #[must_use]
    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    /// Returns true while the driver task is still processing events
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.driver
            .as_ref()
            .is_some_and(|driver| !driver.is_finished())
    }

    /// Stop the presenter and wait for it to release its resources
    ///
    /// Drops any pending debounced query and aborts in-flight searches. When
    /// this returns the loading counter holds no presenter loaders.
    pub async fn shutdown(mut self) {
        self.shutdown.notify_one();
        let Some(driver) = self.driver.take() else {
            return;
        };
        if let Err(error) = driver.await {
            tracing::error!(error = %error, "Search presenter driver ended abnormally");
        }
    }
}

impl<S: SearchSource> Drop for SearchPresenter<S> {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }
}

//! Driver task owning every presenter state transition
//!
//! One task receives UI events, runs the debounce timer, issues searches into
//! a `JoinSet` and applies their outcomes. Searches run concurrently with each
//! other and with the driver; they only report back through the outcome they
//! return, which also carries their loading guard.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, mpsc, watch};
use tokio::task::{JoinError, JoinSet};
use tokio::time::Instant;

use super::debounce::Debouncer;
use super::errors::SearchInvocationError;
use super::source::SearchSource;
use super::state::{EventSink, PresentationState, UiEvent};
use crate::events::{PresenterEvent, PresenterEventBus, ShutdownReason};
use crate::loading::{LoadingCounter, LoadingGuard};
use crate::messages::{Message, MessageQueue};

/// Result of one search invocation, handed back to the driver
struct SearchOutcome<T> {
    seq: u64,
    query: String,
    elapsed: Duration,
    result: Result<Vec<T>, SearchInvocationError>,
    /// Released only after the driver has applied the outcome
    guard: LoadingGuard,
}

pub(crate) struct Orchestrator<S: SearchSource> {
    source: Arc<S>,
    debouncer: Debouncer<String>,
    loading: LoadingCounter,
    messages: MessageQueue,
    events: PresenterEventBus,
    query: watch::Sender<String>,
    results: Arc<Vec<S::Item>>,
    state: watch::Sender<PresentationState<S::Item>>,
    sink: EventSink,
    /// Sequence number of the last issued search
    issued_seq: u64,
    /// Sequence number of the search whose results are on screen (0 = none)
    published_seq: u64,
    in_flight: JoinSet<SearchOutcome<S::Item>>,
}

pub(crate) struct OrchestratorParts<S: SearchSource> {
    pub source: S,
    pub debounce: Duration,
    pub loading: LoadingCounter,
    pub messages: MessageQueue,
    pub events: PresenterEventBus,
    pub query: watch::Sender<String>,
    pub state: watch::Sender<PresentationState<S::Item>>,
    pub sink: EventSink,
}

impl<S: SearchSource> Orchestrator<S> {
    /// The initial query is debounced like an edit, so the screen searches
    /// it once the first quantum elapses unless the user types first.
    pub(crate) fn new(parts: OrchestratorParts<S>) -> Self {
        let results = Arc::clone(&parts.state.borrow().search_results);
        let mut debouncer = Debouncer::new(parts.debounce);
        debouncer.push(parts.query.borrow().clone());
        Self {
            source: Arc::new(parts.source),
            debouncer,
            loading: parts.loading,
            messages: parts.messages,
            events: parts.events,
            query: parts.query,
            results,
            state: parts.state,
            sink: parts.sink,
            issued_seq: 0,
            published_seq: 0,
            in_flight: JoinSet::new(),
        }
    }

    /// Process events until shutdown is requested or every sink is gone
    pub(crate) async fn run(
        mut self,
        mut inbox: mpsc::UnboundedReceiver<UiEvent>,
        shutdown: Arc<Notify>,
    ) {
        let mut busy_rx = self.loading.subscribe();
        let mut message_rx = self.messages.subscribe();

        let reason = loop {
            tokio::select! {
                biased;

                () = shutdown.notified() => break ShutdownReason::Requested,

                event = inbox.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break ShutdownReason::InputClosed,
                },

                Some(joined) = self.in_flight.join_next() => self.handle_joined(joined),

                query = self.debouncer.ready() => self.issue(query),

                // Loaders or messages added from outside the presenter
                Ok(()) = busy_rx.changed() => {}
                Ok(()) = message_rx.changed() => {}
            }

            self.publish_state();
        };

        self.teardown(reason).await;
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::UpdateQuery(query) => {
                let changed = self.query.send_if_modified(|current| {
                    if *current == query {
                        return false;
                    }
                    current.clone_from(&query);
                    true
                });
                if !changed {
                    tracing::trace!(query = %query, "Query unchanged, not rescheduling");
                    return;
                }
                self.emit(PresenterEvent::query_updated(query.clone()));

                if let Some(superseded) = self.debouncer.push(query) {
                    tracing::trace!(superseded = %superseded, "Debounced query superseded");
                }
            }
            UiEvent::ClearMessage(id) => {
                let removed = self.messages.clear_message(id);
                tracing::debug!(message_id = %id, removed, "Message dismissed");
                self.emit(PresenterEvent::message_cleared(id, removed));
            }
        }
    }

    /// Start a search for `query` without waiting on earlier ones
    fn issue(&mut self, query: String) {
        self.issued_seq += 1;
        let seq = self.issued_seq;
        let guard = self.loading.acquire();
        let source = Arc::clone(&self.source);

        tracing::debug!(seq, query = %query, "Issuing search");
        self.emit(PresenterEvent::search_started(seq, query.clone()));

        self.in_flight.spawn(async move {
            let started = Instant::now();
            // Call inside the guarded future so a panic before the first
            // await is caught as well.
            let invocation = AssertUnwindSafe(async { source.search(query.clone()).await });
            let result = match invocation.catch_unwind().await {
                Ok(Ok(items)) => Ok(items),
                Ok(Err(cause)) => Err(SearchInvocationError::failed(query.clone(), &cause)),
                Err(payload) => Err(SearchInvocationError::panicked(query.clone(), &*payload)),
            };
            SearchOutcome {
                seq,
                query,
                elapsed: started.elapsed(),
                result,
                guard,
            }
        });
    }

    fn handle_joined(&mut self, joined: Result<SearchOutcome<S::Item>, JoinError>) {
        match joined {
            Ok(outcome) => self.apply(outcome),
            Err(error) if error.is_cancelled() => {
                tracing::trace!("Search task cancelled");
            }
            Err(error) => {
                // Panics are caught inside the task; reaching this is a bug.
                tracing::error!(error = %error, "Search task failed outside the collaborator");
            }
        }
    }

    fn apply(&mut self, outcome: SearchOutcome<S::Item>) {
        let SearchOutcome {
            seq,
            query,
            elapsed,
            result,
            guard,
        } = outcome;

        match result {
            Ok(items) if seq > self.published_seq => {
                tracing::debug!(
                    seq,
                    query = %query,
                    results = items.len(),
                    duration_ms = elapsed.as_millis(),
                    "Search completed"
                );
                let result_count = items.len();
                self.published_seq = seq;
                self.results = Arc::new(items);
                self.emit(PresenterEvent::search_completed(
                    seq,
                    query,
                    result_count,
                    elapsed,
                ));
            }
            Ok(_) => {
                tracing::debug!(
                    seq,
                    query = %query,
                    superseded_by = self.published_seq,
                    "Discarding stale search results"
                );
                self.emit(PresenterEvent::results_discarded(
                    seq,
                    query,
                    self.published_seq,
                ));
            }
            Err(error) => {
                tracing::warn!(
                    seq,
                    query = %query,
                    error = %error,
                    duration_ms = elapsed.as_millis(),
                    "Search failed"
                );
                let message_id = self.messages.emit(Message::from(&error));
                self.emit(PresenterEvent::search_failed(
                    seq,
                    query,
                    error.description().to_string(),
                    message_id,
                ));
            }
        }

        drop(guard);
    }

    fn publish_state(&self) {
        let next = PresentationState::assemble(
            self.query.borrow().clone(),
            Arc::clone(&self.results),
            self.loading.is_busy(),
            self.messages.current(),
            self.sink.clone(),
        );
        self.state.send_if_modified(|current| {
            if current.same_inputs(&next) {
                return false;
            }
            *current = next;
            true
        });
    }

    fn emit(&self, event: PresenterEvent) {
        self.events.publish(event);
    }

    /// Release the timer and every in-flight search
    async fn teardown(mut self, reason: ShutdownReason) {
        if let Some(pending) = self.debouncer.cancel() {
            tracing::debug!(query = %pending, "Dropping pending debounced query");
        }

        let abandoned = self.in_flight.len();
        self.in_flight.abort_all();
        while self.in_flight.join_next().await.is_some() {}
        if abandoned > 0 {
            tracing::debug!(abandoned, "Abandoned in-flight searches on shutdown");
        }

        self.publish_state();
        tracing::info!(reason = ?reason, "Search presenter stopped");

        self.emit(PresenterEvent::shutdown(reason));
    }
}

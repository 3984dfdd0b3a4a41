//! UI-facing inputs and outputs of the presenter

use std::sync::Arc;
use tokio::sync::mpsc;

use super::errors::PresenterError;
use crate::messages::{Message, MessageId};

/// Events the rendering layer sends to the presenter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Replace the live query text
    ///
    /// Text equal to the current query is ignored: nothing is rescheduled
    /// and no search is issued.
    UpdateQuery(String),
    /// Dismiss the message with the given id
    ClearMessage(MessageId),
}

/// Cloneable handle for delivering [`UiEvent`]s to a running presenter
#[derive(Debug, Clone)]
pub struct EventSink {
    sender: mpsc::UnboundedSender<UiEvent>,
}

impl EventSink {
    pub(crate) fn new(sender: mpsc::UnboundedSender<UiEvent>) -> Self {
        Self { sender }
    }

    /// Deliver an event
    ///
    /// # Errors
    ///
    /// Returns [`PresenterError::Closed`] once the presenter has shut down.
    pub fn send(&self, event: UiEvent) -> Result<(), PresenterError> {
        self.sender.send(event).map_err(|_| PresenterError::Closed)
    }

    pub fn update_query(&self, query: impl Into<String>) -> Result<(), PresenterError> {
        self.send(UiEvent::UpdateQuery(query.into()))
    }

    pub fn clear_message(&self, id: MessageId) -> Result<(), PresenterError> {
        self.send(UiEvent::ClearMessage(id))
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Snapshot of everything a view needs to render the search screen
///
/// Never mutated independently: the presenter reassembles it from the latest
/// query, results, busy flag and current message after every transition.
#[derive(Debug, Clone)]
pub struct PresentationState<T> {
    pub query: String,
    pub search_results: Arc<Vec<T>>,
    /// True while at least one search is outstanding
    pub refreshing: bool,
    pub message: Option<Message>,
    pub event_sink: EventSink,
}

impl<T> PresentationState<T> {
    #[must_use]
    pub fn assemble(
        query: String,
        search_results: Arc<Vec<T>>,
        refreshing: bool,
        message: Option<Message>,
        event_sink: EventSink,
    ) -> Self {
        Self {
            query,
            search_results,
            refreshing,
            message,
            event_sink,
        }
    }

    #[must_use]
    pub fn results(&self) -> &[T] {
        &self.search_results
    }

    /// Whether two snapshots were assembled from the same inputs
    ///
    /// Results are compared by identity; every published result set is a
    /// fresh allocation.
    #[must_use]
    pub fn same_inputs(&self, other: &Self) -> bool {
        self.query == other.query
            && Arc::ptr_eq(&self.search_results, &other.search_results)
            && self.refreshing == other.refreshing
            && self.message.as_ref().map(|m| m.id) == other.message.as_ref().map(|m| m.id)
    }
}

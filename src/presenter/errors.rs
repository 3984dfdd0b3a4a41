//! Error types for the search presenter
//!
//! Search failures never propagate to the caller. They are converted into
//! queued [`Message`]s; these types exist so the conversion, logging and
//! lifecycle events all describe the failure the same way.

use std::any::Any;
use thiserror::Error;

use crate::messages::Message;

/// Failure of a single search invocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchInvocationError {
    /// The search collaborator returned an error
    #[error("Search for {query:?} failed: {cause}")]
    Failed { query: String, cause: String },

    /// The search collaborator panicked
    #[error("Search for {query:?} panicked: {detail}")]
    Panicked { query: String, detail: String },
}

impl SearchInvocationError {
    /// Wrap an error returned by the collaborator, keeping its context chain
    #[must_use]
    pub fn failed(query: String, cause: &anyhow::Error) -> Self {
        Self::Failed {
            query,
            cause: format!("{cause:#}"),
        }
    }

    /// Wrap a panic payload caught from the collaborator
    #[must_use]
    pub fn panicked(query: String, payload: &(dyn Any + Send)) -> Self {
        let detail = if let Some(text) = payload.downcast_ref::<&'static str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self::Panicked { query, detail }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        match self {
            Self::Failed { query, .. } | Self::Panicked { query, .. } => query,
        }
    }

    /// The human-readable cause shown to the user
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Failed { cause, .. } => cause,
            Self::Panicked { detail, .. } => detail,
        }
    }
}

impl From<&SearchInvocationError> for Message {
    fn from(error: &SearchInvocationError) -> Self {
        Message::new(error.description())
    }
}

/// Errors returned by the presenter's public API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresenterError {
    /// The presenter has shut down and no longer accepts events
    #[error("Search presenter has shut down")]
    Closed,
}

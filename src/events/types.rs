//! Event type definitions for the presenter event system

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::messages::MessageId;

/// Reason for presenter shutdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShutdownReason {
    /// `SearchPresenter::shutdown` was called
    Requested,
    /// Every event sink was dropped
    InputClosed,
}

/// Events emitted while the presenter runs
///
/// `seq` is the issuance sequence number of a search invocation. Numbers
/// start at 1 and increase by one per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PresenterEvent {
    /// The live query text changed
    QueryUpdated {
        query: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// A debounced query was handed to the search collaborator
    SearchStarted {
        seq: u64,
        query: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// A search succeeded and its results were published
    SearchCompleted {
        seq: u64,
        query: String,
        result_count: usize,
        duration: Duration,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// A search succeeded but a later-issued search had already published
    ResultsDiscarded {
        seq: u64,
        query: String,
        superseded_by: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// A search failed and a message was queued for the user
    SearchFailed {
        seq: u64,
        query: String,
        error: String,
        message_id: MessageId,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// The user dismissed a message
    MessageCleared {
        id: MessageId,
        removed: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// The presenter stopped processing events
    Shutdown {
        reason: ShutdownReason,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// Helper functions for creating common events
impl PresenterEvent {
    #[must_use]
    pub fn query_updated(query: String) -> Self {
        Self::QueryUpdated {
            query,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn search_started(seq: u64, query: String) -> Self {
        Self::SearchStarted {
            seq,
            query,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn search_completed(seq: u64, query: String, result_count: usize, duration: Duration) -> Self {
        Self::SearchCompleted {
            seq,
            query,
            result_count,
            duration,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn results_discarded(seq: u64, query: String, superseded_by: u64) -> Self {
        Self::ResultsDiscarded {
            seq,
            query,
            superseded_by,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn search_failed(seq: u64, query: String, error: String, message_id: MessageId) -> Self {
        Self::SearchFailed {
            seq,
            query,
            error,
            message_id,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn message_cleared(id: MessageId, removed: bool) -> Self {
        Self::MessageCleared {
            id,
            removed,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn shutdown(reason: ShutdownReason) -> Self {
        Self::Shutdown {
            reason,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Issuance sequence number, for search lifecycle events
    #[must_use]
    pub fn seq(&self) -> Option<u64> {
        match self {
            Self::SearchStarted { seq, .. }
            | Self::SearchCompleted { seq, .. }
            | Self::ResultsDiscarded { seq, .. }
            | Self::SearchFailed { seq, .. } => Some(*seq),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_search_lifecycle(&self) -> bool {
        self.seq().is_some()
    }
}

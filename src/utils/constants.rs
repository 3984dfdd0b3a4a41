//! Shared configuration constants for the search presenter
//!
//! This module contains default values used throughout the codebase to
//! ensure consistency and avoid magic numbers.

/// Default debounce quantum: 300 milliseconds
///
/// Long enough to swallow a burst of keystrokes, short enough that results
/// still feel immediate once typing pauses.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Upper bound accepted for the debounce quantum
pub const MAX_DEBOUNCE_MS: u64 = 60_000;

/// Default capacity of the presenter event bus
///
/// Subscribers that fall further behind than this observe
/// `broadcast::error::RecvError::Lagged`.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

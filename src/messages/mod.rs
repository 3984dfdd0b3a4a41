//! Dismissible user-facing messages
//!
//! `MessageQueue` keeps messages in arrival order and exposes the head of the
//! queue as the single "current" message a view should display. Each message
//! has a unique id the user dismisses it by.

mod queue;
mod types;

pub use queue::MessageQueue;
pub use types::{Message, MessageId};

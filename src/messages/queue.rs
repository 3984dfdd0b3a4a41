//! FIFO message queue with a published "current message"

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::watch;

use super::types::{Message, MessageId};

#[derive(Debug)]
struct QueueInner {
    messages: Mutex<VecDeque<Message>>,
    current: watch::Sender<Option<Message>>,
}

/// Ordered queue of dismissible messages
///
/// The head of the queue is the current message. Every mutation republishes
/// it, and subscribers are only woken when the head actually changes.
/// Clones share the same queue.
#[derive(Debug, Clone)]
pub struct MessageQueue {
    inner: Arc<QueueInner>,
}

impl MessageQueue {
    #[must_use]
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(QueueInner {
                messages: Mutex::new(VecDeque::new()),
                current,
            }),
        }
    }

    /// Append a new message and return its id
    pub fn emit_message(&self, message: impl Into<String>) -> MessageId {
        self.emit(Message::new(message))
    }

    /// Append a prebuilt message and return its id
    ///
    /// A message whose id is already queued replaces nothing; the existing
    /// entry is kept and the duplicate is dropped, so ids stay unique.
    pub fn emit(&self, message: Message) -> MessageId {
        let id = message.id;
        let mut messages = self.inner.messages.lock();
        if messages.iter().any(|queued| queued.id == id) {
            log::warn!("Message {id} already queued, ignoring duplicate");
            return id;
        }

        // Keep arrival order even if a caller stamped the message earlier
        // than one that is already queued.
        let position = messages
            .iter()
            .rposition(|queued| queued.created_at <= message.created_at)
            .map_or(0, |idx| idx + 1);
        messages.insert(position, message);
        log::debug!("Queued message {id} ({} pending)", messages.len());

        self.publish(&messages);
        id
    }

    /// Remove the message with the given id
    ///
    /// Returns `false` if no such message is queued; dismissing twice is not
    /// an error.
    pub fn clear_message(&self, id: MessageId) -> bool {
        let mut messages = self.inner.messages.lock();
        let Some(position) = messages.iter().position(|queued| queued.id == id) else {
            log::trace!("Message {id} already cleared");
            return false;
        };
        messages.remove(position);
        self.publish(&messages);
        true
    }

    /// The message currently presented to the view, if any
    #[must_use]
    pub fn current(&self) -> Option<Message> {
        self.inner.current.borrow().clone()
    }

    /// Snapshot of every queued message in display order
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.inner.messages.lock().iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.messages.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.messages.lock().is_empty()
    }

    /// Subscribe to changes of the current message
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Message>> {
        self.inner.current.subscribe()
    }

    // Called with the queue lock held so the published head matches the queue.
    fn publish(&self, messages: &VecDeque<Message>) {
        let head = messages.front();
        self.inner.current.send_if_modified(|current| {
            if current.as_ref().map(|m| m.id) == head.map(|m| m.id) {
                return false;
            }
            *current = head.cloned();
            true
        });
    }
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

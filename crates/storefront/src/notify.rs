//! User-facing notifications ("toasts").
//!
//! The cart store reports failed operations through a [`Notifier`] instead of
//! returning errors. What the user sees depends on the consumer:
//!
//! - [`TracingNotifier`] writes the message to the log (CLI)
//! - [`ToastQueue`] collects messages so a response can carry them (HTTP API)

use std::sync::{Mutex, PoisonError};

/// Sink for messages shown to the shopper. Fire-and-forget.
pub trait Notifier: Send + Sync {
    /// Show an error message.
    fn error(&self, message: &str);
}

/// Notifier that logs messages as warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(toast = %message, "Cart notification");
    }
}

/// Notifier that queues messages until they are drained.
#[derive(Debug, Default)]
pub struct ToastQueue {
    messages: Mutex<Vec<String>>,
}

impl ToastQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued message, oldest first.
    pub fn drain(&self) -> Vec<String> {
        let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *messages)
    }

    /// Number of queued messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastQueue {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

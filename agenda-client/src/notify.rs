//! Toast notifications
//!
//! Mutation outcomes are reported through a [`Notifier`]; they never reach
//! the caller as a panic. [`NotificationCenter`] queues them for the front
//! end to drain and mirrors them to the log.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// One toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

/// Sink for user-facing, non-blocking notifications.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Queue of pending toasts, shared between the data layer and the UI.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    queue: Arc<Mutex<VecDeque<Notification>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: Level, message: &str) {
        self.queue.lock().push_back(Notification {
            level,
            message: message.to_string(),
        });
    }

    /// Take every queued toast, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.queue.lock().drain(..).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.queue.lock().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NotificationCenter {
    fn success(&self, message: &str) {
        tracing::info!(message, "Notification");
        self.push(Level::Success, message);
    }

    fn error(&self, message: &str) {
        tracing::warn!(message, "Error notification");
        self.push(Level::Error, message);
    }
}

//! User-facing notifications.
//!
//! Operations that want to tell the user something without failing push a
//! message into a [`NotificationSink`]. The presentation layer decides how
//! to show it.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something went wrong but the operation still produced a result.
    Warning,
    /// An operation failed.
    Error,
    /// Informational message.
    Info,
}

/// A notification pushed to a sink.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Notification {
    /// Message text.
    pub message: String,
    /// Severity.
    pub severity: Severity,
}

/// Destination for user-facing notifications. Fire and forget.
pub trait NotificationSink {
    /// Pushes a message.
    fn push(&self, message: &str, severity: Severity);
}

impl<T: NotificationSink + ?Sized> NotificationSink for &T {
    fn push(&self, message: &str, severity: Severity) {
        (**self).push(message, severity);
    }
}

/// Collects notifications in memory until they are drained.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Mutex<Vec<Notification>>,
}

impl NotificationQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all pending notifications in push order.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending())
    }

    /// Number of pending notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending().len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic elsewhere while holding the lock leaves the Vec intact.
    fn pending(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationSink for NotificationQueue {
    fn push(&self, message: &str, severity: Severity) {
        self.pending().push(Notification {
            message: message.to_string(),
            severity,
        });
    }
}

/// Forwards notifications to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn push(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Warning => tracing::warn!(target: "mailcompose::notify", "{message}"),
            Severity::Error => tracing::error!(target: "mailcompose::notify", "{message}"),
            Severity::Info => tracing::info!(target: "mailcompose::notify", "{message}"),
        }
    }
}

//! User-facing notifications
//!
//! The core decides what to tell the user; hosts decide how to show it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Neutral information
    Info,
    /// An operation completed
    Success,
    /// Something needs attention
    Warning,
    /// An operation failed
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub kind: NotificationKind,
    /// Text shown to the user
    pub message: String,
}

impl Notification {
    /// Creates a notification
    #[must_use]
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Info notification
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    /// Success notification
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    /// Warning notification
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, message)
    }

    /// Error notification
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }
}

/// Where notifications are delivered
pub trait Notifier {
    /// Shows a notification
    fn notify(&mut self, notification: Notification);
}

/// Notifier that keeps every notification in memory.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to a session.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Rc<RefCell<Vec<Notification>>>,
}

impl NotificationLog {
    /// Creates an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all notifications so far
    #[must_use]
    pub fn entries(&self) -> Vec<Notification> {
        self.entries.borrow().clone()
    }

    /// The most recent notification
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.entries.borrow().last().cloned()
    }

    /// Forgets everything logged so far
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Notifier for NotificationLog {
    fn notify(&mut self, notification: Notification) {
        self.entries.borrow_mut().push(notification);
    }
}

/// Message texts
pub mod messages {
    /// Login accepted
    pub const LOGIN_SUCCEEDED: &str = "Login successful!";
    /// Login rejected or unreachable service
    pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
    /// Token cleared
    pub const LOGGED_OUT: &str = "Logged out successfully";
    /// Save accepted
    pub const SAVE_SUCCEEDED: &str = "Snippet saved successfully!";
    /// Save failed
    pub const SAVE_FAILED: &str = "Failed to save snippet. Please try again.";
    /// Shared snippet applied
    pub const LOAD_SUCCEEDED: &str = "Snippet loaded successfully!";
    /// Shared snippet could not be fetched
    pub const LOAD_FAILED: &str = "Failed to load shared snippet";
    /// Share link copied
    pub const COPY_SUCCEEDED: &str = "Link copied to clipboard!";
    /// Share link could not be copied
    pub const COPY_FAILED: &str = "Failed to copy link. Please copy manually.";
}

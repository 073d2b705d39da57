//! Notifications printed to stderr

use codebin_core::notification::{Notification, NotificationKind, Notifier};

/// Prints notifications as single colored lines
#[derive(Debug, Clone, Copy)]
pub struct TerminalNotifier {
    color: bool,
    quiet: bool,
}

impl TerminalNotifier {
    /// `quiet` keeps only errors
    pub const fn new(color: bool, quiet: bool) -> Self {
        Self { color, quiet }
    }

    fn format(&self, notification: &Notification) -> String {
        let (label, ansi) = match notification.kind {
            NotificationKind::Info => ("info", "34"),
            NotificationKind::Success => ("ok", "32"),
            NotificationKind::Warning => ("warning", "33"),
            NotificationKind::Error => ("error", "31"),
        };
        if self.color {
            format!("\x1b[1;{ansi}m{label}\x1b[0m: {}", notification.message)
        } else {
            format!("{label}: {}", notification.message)
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notification: Notification) {
        if self.quiet && notification.kind != NotificationKind::Error {
            return;
        }
        eprintln!("{}", self.format(&notification));
    }
}

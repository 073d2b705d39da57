//! Headless hosts for the playground core.
//!
//! The project directory stands in for the editor, a preview output
//! directory for the sandbox, stderr for toasts.

mod clipboard;
mod files;
mod notifier;
mod sandbox;

pub use clipboard::SystemClipboard;
pub use files::{FilePanel, ProjectFiles};
pub use notifier::TerminalNotifier;
pub use sandbox::DirectorySandbox;

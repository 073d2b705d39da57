//! Clipboard seam for copying share links

use crate::error::ClipboardResult;

/// A clipboard that accepts text
pub trait Clipboard {
    /// Replaces the clipboard contents
    ///
    /// # Errors
    ///
    /// Returns a `ClipboardError` if the clipboard is missing or refuses
    /// the write.
    fn set_text(&mut self, text: &str) -> ClipboardResult<()>;
}

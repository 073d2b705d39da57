//! System clipboard via `arboard`

use codebin_core::clipboard::Clipboard;
use codebin_core::error::{ClipboardError, ClipboardResult};

/// The desktop clipboard, opened on first use
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Creates a handle; the clipboard is opened lazily
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> ClipboardResult<()> {
        let mut clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?,
        };
        let result = clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Denied(e.to_string()));
        self.inner = Some(clipboard);
        result
    }
}

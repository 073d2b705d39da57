//! Core data structures: documents and snippets

mod document;
mod snippet;

pub use document::{DEFAULT_MARKUP, Document, DocumentId, Documents};
pub use snippet::{Snippet, UNTITLED};

//! Named, shareable bundles of the three documents

use super::document::{DocumentId, Documents};

/// Title used when a snippet is saved without one
pub const UNTITLED: &str = "Untitled";

/// A named bundle of the three documents.
///
/// `share_id` is only present once the snippet has been persisted by the
/// snippet service (or was loaded from it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// User supplied title, may be empty
    pub title: String,
    /// Markup document content
    pub markup: String,
    /// Style document content
    pub style: String,
    /// Script document content
    pub script: String,
    /// Identifier assigned by the service
    pub share_id: Option<String>,
}

impl Snippet {
    /// Captures the current documents under a title
    #[must_use]
    pub fn from_documents(title: impl Into<String>, documents: &Documents) -> Self {
        Self {
            title: title.into(),
            markup: documents.content(DocumentId::Markup).to_string(),
            style: documents.content(DocumentId::Style).to_string(),
            script: documents.content(DocumentId::Script).to_string(),
            share_id: None,
        }
    }

    /// Title to persist, falling back to [`UNTITLED`]
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// Builds the document table for this snippet
    #[must_use]
    pub fn to_documents(&self) -> Documents {
        Documents::from_contents(&self.markup, &self.style, &self.script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_all_documents() {
        let docs = Documents::from_contents("<p>hi</p>", "p{color:red}", "console.log(1)");
        let snippet = Snippet::from_documents("T", &docs);
        assert_eq!(snippet.markup, "<p>hi</p>");
        assert_eq!(snippet.style, "p{color:red}");
        assert_eq!(snippet.script, "console.log(1)");
        assert!(snippet.share_id.is_none());
        assert_eq!(snippet.to_documents(), docs);
    }

    #[test]
    fn blank_title_falls_back_to_untitled() {
        let snippet = Snippet::from_documents("  ", &Documents::new());
        assert_eq!(snippet.display_title(), UNTITLED);
        let named = Snippet::from_documents("Demo", &Documents::new());
        assert_eq!(named.display_title(), "Demo");
    }
}

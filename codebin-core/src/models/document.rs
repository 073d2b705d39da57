//! The three linked source documents of a playground session

use std::fmt;

use serde::{Deserialize, Serialize};

/// Markup the playground starts with before anything is loaded
pub const DEFAULT_MARKUP: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width">
    <title>Bin Code</title>
  </head>
<body>

</body>
</html>
"#;

/// Identifies one of the three editable documents.
///
/// The declaration order is the tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentId {
    /// HTML body content
    Markup,
    /// CSS embedded as a style block
    Style,
    /// JavaScript executed after the markup
    Script,
}

impl DocumentId {
    /// All documents in tab order
    pub const ALL: [Self; 3] = [Self::Markup, Self::Style, Self::Script];

    /// Position of this document in [`Self::ALL`] and in every per-document table
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Markup => 0,
            Self::Style => 1,
            Self::Script => 2,
        }
    }

    /// Language tag handed to the text-editing component
    #[must_use]
    pub const fn language(self) -> &'static str {
        match self {
            Self::Markup => "html",
            Self::Style => "css",
            Self::Script => "javascript",
        }
    }

    /// Tab label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Markup => "HTML",
            Self::Style => "CSS",
            Self::Script => "JavaScript",
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markup => write!(f, "markup"),
            Self::Style => write!(f, "style"),
            Self::Script => write!(f, "script"),
        }
    }
}

/// One editable source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: DocumentId,
    content: String,
}

impl Document {
    /// Creates a document with the given content
    #[must_use]
    pub fn new(id: DocumentId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }

    /// Which document this is
    #[must_use]
    pub const fn id(&self) -> DocumentId {
        self.id
    }

    /// Current text
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Language tag for the editor
    #[must_use]
    pub const fn language(&self) -> &'static str {
        self.id.language()
    }
}

/// Lookup table holding the three documents, keyed by [`DocumentId`].
///
/// Documents are never removed, only overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Documents {
    slots: [Document; 3],
}

impl Documents {
    /// Creates the initial set: boilerplate markup, empty style and script
    #[must_use]
    pub fn new() -> Self {
        Self::from_contents(DEFAULT_MARKUP, "", "")
    }

    /// Creates a set from explicit contents
    #[must_use]
    pub fn from_contents(
        markup: impl Into<String>,
        style: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            slots: [
                Document::new(DocumentId::Markup, markup),
                Document::new(DocumentId::Style, style),
                Document::new(DocumentId::Script, script),
            ],
        }
    }

    /// Returns the document with the given id
    #[must_use]
    pub fn get(&self, id: DocumentId) -> &Document {
        &self.slots[id.index()]
    }

    /// Returns the text of the given document
    #[must_use]
    pub fn content(&self, id: DocumentId) -> &str {
        self.get(id).content()
    }

    /// Overwrites one document.
    ///
    /// Returns `true` if the content actually changed.
    pub fn set(&mut self, id: DocumentId, content: impl Into<String>) -> bool {
        let content = content.into();
        let slot = &mut self.slots[id.index()];
        if slot.content == content {
            return false;
        }
        slot.content = content;
        true
    }

    /// Overwrites all three documents at once
    pub fn replace_all(&mut self, other: Self) {
        *self = other;
    }

    /// Iterates the documents in tab order
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.slots.iter()
    }
}

impl Default for Documents {
    fn default() -> Self {
        Self::new()
    }
}

//! Text-editing component seam
//!
//! The playground never edits text itself. A host provides an
//! [`EditorPanel`] (the container next to the preview) that creates one
//! [`EditorSurface`] per document; change notifications flow back through
//! `PlaygroundSession::on_content_changed`.

use std::fmt;

use crate::config::EditorSettings;
use crate::error::EditorResult;
use crate::layout::WidthSpec;
use crate::models::DocumentId;

/// Colour theme of the editing surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTheme {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl EditorTheme {
    /// Theme that follows the system colour scheme preference
    #[must_use]
    pub const fn from_dark_mode(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    /// Identifier understood by the editing component
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Light => "vs",
            Self::Dark => "vs-dark",
        }
    }
}

impl fmt::Display for EditorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Options a surface is created with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    /// Document this surface edits
    pub document: DocumentId,
    /// Initial content
    pub content: String,
    /// Language tag for highlighting
    pub language: &'static str,
    /// Colour theme
    pub theme: EditorTheme,
    /// Font size in points
    pub font_size: u8,
    /// Indentation width
    pub tab_size: u8,
    /// Indent with spaces
    pub insert_spaces: bool,
    /// Soft wrap long lines
    pub word_wrap: bool,
    /// Show line numbers
    pub line_numbers: bool,
    /// Show the minimap
    pub minimap: bool,
    /// Let the component relayout itself on container changes
    pub automatic_layout: bool,
    /// Allow scrolling past the last line
    pub scroll_beyond_last_line: bool,
    /// Format pasted text
    pub format_on_paste: bool,
    /// Format while typing
    pub format_on_type: bool,
}

impl EditorOptions {
    /// Options for one document.
    ///
    /// Automatic layout stays off: the resize engine relayouts explicitly.
    #[must_use]
    pub fn for_document(
        document: DocumentId,
        content: impl Into<String>,
        settings: &EditorSettings,
    ) -> Self {
        Self {
            document,
            content: content.into(),
            language: document.language(),
            theme: EditorTheme::from_dark_mode(settings.dark_mode),
            font_size: settings.font_size,
            tab_size: settings.tab_size,
            insert_spaces: true,
            word_wrap: settings.word_wrap,
            line_numbers: true,
            minimap: false,
            automatic_layout: false,
            scroll_beyond_last_line: false,
            format_on_paste: true,
            format_on_type: true,
        }
    }
}

/// One editing surface, bound to a single document
pub trait EditorSurface {
    /// Current text
    fn value(&self) -> String;

    /// Replaces the text without raising a change notification
    fn set_value(&mut self, value: &str);

    /// Shows or hides the surface
    fn set_visible(&mut self, visible: bool);

    /// Whether the surface is shown
    fn is_visible(&self) -> bool;

    /// Moves keyboard focus to the surface
    fn focus(&mut self);

    /// Recomputes the viewport after a size change
    fn relayout(&mut self);

    /// Switches the colour theme
    fn set_theme(&mut self, theme: EditorTheme);

    /// Releases the surface; called at most once
    fn dispose(&mut self);
}

/// Container hosting the editing surfaces
pub trait EditorPanel {
    /// Surface type this panel creates
    type Surface: EditorSurface;

    /// Creates a surface for one document
    ///
    /// # Errors
    ///
    /// Returns `EditorError::CreateFailed` if the component cannot be built.
    fn create_surface(&mut self, options: &EditorOptions) -> EditorResult<Self::Surface>;

    /// Applies the editor panel width
    fn set_width(&mut self, width: &WidthSpec);

    /// Shows or hides the whole panel
    fn set_visible(&mut self, visible: bool);
}

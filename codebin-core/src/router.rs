//! Tab/document router
//!
//! Maps the three documents onto their editing surfaces and keeps exactly
//! one of them visible.

use crate::config::EditorSettings;
use crate::editor::{EditorOptions, EditorPanel, EditorSurface, EditorTheme};
use crate::error::EditorResult;
use crate::models::{DocumentId, Documents};

/// Owns the editor panel and one surface per document
pub struct TabRouter<P: EditorPanel> {
    panel: P,
    surfaces: [P::Surface; 3],
    active: DocumentId,
    theme: EditorTheme,
    disposed: bool,
}

impl<P: EditorPanel> TabRouter<P> {
    /// Creates the three surfaces; only the markup surface is visible.
    ///
    /// # Errors
    ///
    /// Returns the panel's error if any surface cannot be created. Surfaces
    /// created before the failure are disposed.
    pub fn new(mut panel: P, documents: &Documents, settings: &EditorSettings) -> EditorResult<Self> {
        let mut create = |id: DocumentId| {
            let options = EditorOptions::for_document(id, documents.content(id), settings);
            panel.create_surface(&options)
        };

        let mut markup = create(DocumentId::Markup)?;
        let mut style = match create(DocumentId::Style) {
            Ok(surface) => surface,
            Err(e) => {
                markup.dispose();
                return Err(e);
            }
        };
        let script = match create(DocumentId::Script) {
            Ok(surface) => surface,
            Err(e) => {
                markup.dispose();
                style.dispose();
                return Err(e);
            }
        };

        let mut router = Self {
            panel,
            surfaces: [markup, style, script],
            active: DocumentId::Markup,
            theme: EditorTheme::from_dark_mode(settings.dark_mode),
            disposed: false,
        };
        router.show_only(DocumentId::Markup);
        tracing::debug!(theme = %router.theme, "Editor surfaces created");
        Ok(router)
    }

    /// The active document
    #[must_use]
    pub const fn active(&self) -> DocumentId {
        self.active
    }

    /// Current editor theme
    #[must_use]
    pub const fn theme(&self) -> EditorTheme {
        self.theme
    }

    /// Activates a tab: shows its surface only, focuses and relayouts it.
    ///
    /// Document content is left untouched.
    pub fn switch_to(&mut self, id: DocumentId) {
        if self.disposed {
            return;
        }
        self.active = id;
        self.show_only(id);
        let surface = &mut self.surfaces[id.index()];
        surface.focus();
        surface.relayout();
        tracing::debug!(tab = %id, "Switched tab");
    }

    fn show_only(&mut self, id: DocumentId) {
        for document in DocumentId::ALL {
            self.surfaces[document.index()].set_visible(document == id);
        }
    }

    /// Surface bound to a document
    #[must_use]
    pub fn surface(&self, id: DocumentId) -> &P::Surface {
        &self.surfaces[id.index()]
    }

    /// Mutable surface bound to a document
    pub fn surface_mut(&mut self, id: DocumentId) -> &mut P::Surface {
        &mut self.surfaces[id.index()]
    }

    /// Relayouts every surface
    pub fn relayout_all(&mut self) {
        if self.disposed {
            return;
        }
        for surface in &mut self.surfaces {
            surface.relayout();
        }
    }

    /// Pushes new content into a surface
    pub fn set_content(&mut self, id: DocumentId, content: &str) {
        if self.disposed {
            return;
        }
        self.surfaces[id.index()].set_value(content);
    }

    /// Pushes every document into its surface
    pub fn set_all_content(&mut self, documents: &Documents) {
        for document in documents.iter() {
            self.set_content(document.id(), document.content());
        }
    }

    /// Applies a theme to all surfaces
    pub fn apply_theme(&mut self, theme: EditorTheme) {
        self.theme = theme;
        if self.disposed {
            return;
        }
        for surface in &mut self.surfaces {
            surface.set_theme(theme);
        }
    }

    /// The editor panel
    #[must_use]
    pub const fn panel(&self) -> &P {
        &self.panel
    }

    /// Mutable editor panel
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Returns true once the surfaces have been released
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Releases every surface; later calls do nothing
    pub fn dispose_all(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for surface in &mut self.surfaces {
            surface.dispose();
        }
        tracing::debug!("Editor surfaces disposed");
    }
}

impl<P: EditorPanel> Drop for TabRouter<P> {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

impl<P: EditorPanel + std::fmt::Debug> std::fmt::Debug for TabRouter<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabRouter")
            .field("panel", &self.panel)
            .field("active", &self.active)
            .field("theme", &self.theme)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

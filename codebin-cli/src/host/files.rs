//! Project directory backing the three documents

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use codebin_core::editor::{EditorOptions, EditorPanel, EditorSurface, EditorTheme};
use codebin_core::error::EditorResult;
use codebin_core::layout::WidthSpec;
use codebin_core::models::{DEFAULT_MARKUP, DocumentId, Documents};

const TITLE_FILE: &str = "title";

/// The files of a playground project
#[derive(Debug, Clone)]
pub struct ProjectFiles {
    dir: PathBuf,
}

impl ProjectFiles {
    /// Uses `dir` as the project directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The project directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding a document
    pub fn path(&self, id: DocumentId) -> PathBuf {
        self.dir.join(file_name(id))
    }

    /// Document stored at `path`, if it is one of the project files
    pub fn document_for_path(&self, path: &Path) -> Option<DocumentId> {
        let name = path.file_name()?;
        DocumentId::ALL
            .into_iter()
            .find(|id| name == file_name(*id))
    }

    /// Reads one document; `None` if its file does not exist
    pub fn read(&self, id: DocumentId) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(id)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Reads all documents; a missing markup file gives the boilerplate
    pub fn read_documents(&self) -> io::Result<Documents> {
        let markup = self
            .read(DocumentId::Markup)?
            .unwrap_or_else(|| DEFAULT_MARKUP.to_string());
        let style = self.read(DocumentId::Style)?.unwrap_or_default();
        let script = self.read(DocumentId::Script)?.unwrap_or_default();
        Ok(Documents::from_contents(markup, style, script))
    }

    /// Returns true if any document file exists
    pub fn has_documents(&self) -> bool {
        DocumentId::ALL.iter().any(|id| self.path(*id).exists())
    }

    /// Writes one document, creating the directory if needed
    pub fn write(&self, id: DocumentId, content: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(id), content)
    }

    /// Reads the `title` file, trimmed
    pub fn read_title(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(self.dir.join(TITLE_FILE)) {
            Ok(title) => Ok(Some(title.trim().to_string()).filter(|t| !t.is_empty())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Writes the `title` file; an empty title removes it
    pub fn write_title(&self, title: &str) -> io::Result<()> {
        let path = self.dir.join(TITLE_FILE);
        if title.trim().is_empty() {
            return match fs::remove_file(&path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            };
        }
        fs::create_dir_all(&self.dir)?;
        fs::write(path, format!("{title}\n"))
    }

    /// Replaces the project with a loaded snippet: all three documents and
    /// the title
    pub fn write_snippet(&self, documents: &Documents, title: &str) -> io::Result<()> {
        for document in documents.iter() {
            self.write(document.id(), document.content())?;
        }
        self.write_title(title)?;
        tracing::debug!(dir = %self.dir.display(), "Project written");
        Ok(())
    }
}

const fn file_name(id: DocumentId) -> &'static str {
    match id {
        DocumentId::Markup => "index.html",
        DocumentId::Style => "style.css",
        DocumentId::Script => "script.js",
    }
}

/// Editing surface holding the content of one project file.
///
/// Content pushed by the session stays in memory; commands persist it with
/// [`ProjectFiles::write_snippet`] so write failures reach the caller.
#[derive(Debug)]
pub struct FileSurface {
    document: DocumentId,
    value: String,
    visible: bool,
}

impl EditorSurface for FileSurface {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        tracing::trace!(document = %self.document, len = value.len(), "Surface content replaced");
        self.value = value.to_string();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn focus(&mut self) {
        tracing::trace!(document = %self.document, "Focus");
    }

    fn relayout(&mut self) {}

    fn set_theme(&mut self, theme: EditorTheme) {
        tracing::trace!(document = %self.document, theme = %theme, "Theme applied");
    }

    fn dispose(&mut self) {
        tracing::trace!(document = %self.document, "Surface released");
    }
}

/// Editor panel over a project directory
#[derive(Debug)]
pub struct FilePanel {
    project: ProjectFiles,
}

impl FilePanel {
    /// Creates a panel for `project`
    pub const fn new(project: ProjectFiles) -> Self {
        Self { project }
    }
}

impl EditorPanel for FilePanel {
    type Surface = FileSurface;

    fn create_surface(&mut self, options: &EditorOptions) -> EditorResult<FileSurface> {
        tracing::trace!(document = %options.document, path = %self.project.path(options.document).display(), "Surface created");
        Ok(FileSurface {
            document: options.document,
            value: options.content.clone(),
            visible: false,
        })
    }

    fn set_width(&mut self, width: &WidthSpec) {
        tracing::trace!(width = %width, "Editor panel width");
    }

    fn set_visible(&mut self, visible: bool) {
        tracing::trace!(visible, "Editor panel visibility");
    }
}

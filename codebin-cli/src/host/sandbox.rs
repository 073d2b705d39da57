//! Preview sandbox backed by throwaway directories

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use codebin_core::error::{RenderError, RenderResult};
use codebin_core::layout::PreviewWidth;
use codebin_core::preview::{ContextId, SandboxHost};

const DOCUMENT_FILE: &str = "index.html";
const CURRENT_FILE: &str = "CURRENT";
const CONTEXT_PREFIX: &str = "context-";

/// Mounts every render in a fresh `context-NNNNNN` directory under the
/// output directory and deletes the previous one first.
///
/// `CURRENT` names the live context directory. Context directories left by
/// earlier runs are swept before the first render.
#[derive(Debug)]
pub struct DirectorySandbox {
    out_dir: PathBuf,
    current: Option<PathBuf>,
    swept: bool,
}

impl DirectorySandbox {
    /// Creates a sandbox rooted at `out_dir`; nothing is touched until the
    /// first render
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            current: None,
            swept: false,
        }
    }

    /// Directory of a context
    pub fn context_dir(&self, id: ContextId) -> PathBuf {
        self.out_dir.join(format!("{CONTEXT_PREFIX}{:06}", id.get()))
    }

    /// Document file of the live context
    pub fn current_document(&self) -> Option<PathBuf> {
        self.current.as_deref().map(|dir| dir.join(DOCUMENT_FILE))
    }

    fn discard_current(&mut self) -> RenderResult<()> {
        match self.current.take() {
            Some(dir) => discard_dir(&dir),
            None => Ok(()),
        }
    }

    /// Removes every context directory in the output directory
    fn sweep_stale_contexts(&mut self) -> RenderResult<()> {
        let entries = match fs::read_dir(&self.out_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(RenderError::ContextCreation(format!(
                    "cannot read {}: {e}",
                    self.out_dir.display()
                )));
            }
        };

        let mut swept = 0usize;
        for entry in entries.flatten() {
            let is_context = entry.file_name().to_string_lossy().starts_with(CONTEXT_PREFIX)
                && entry.file_type().is_ok_and(|kind| kind.is_dir());
            if is_context {
                discard_dir(&entry.path())?;
                swept += 1;
            }
        }
        if swept > 0 {
            tracing::debug!(count = swept, dir = %self.out_dir.display(), "Swept stale sandbox contexts");
        }
        self.swept = true;
        Ok(())
    }
}

fn discard_dir(dir: &Path) -> RenderResult<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RenderError::ContextCreation(format!(
            "cannot discard {}: {e}",
            dir.display()
        ))),
    }
}

fn write_pointer(out_dir: &Path, context_dir: &Path) -> std::io::Result<()> {
    let name = context_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    fs::write(out_dir.join(CURRENT_FILE), format!("{name}\n"))
}

impl SandboxHost for DirectorySandbox {
    fn create_context(&mut self, id: ContextId) -> RenderResult<()> {
        self.discard_current()?;
        if !self.swept {
            self.sweep_stale_contexts()?;
        }

        let dir = self.context_dir(id);
        discard_dir(&dir)?;
        fs::create_dir_all(&dir).map_err(|e| {
            RenderError::ContextCreation(format!("cannot create {}: {e}", dir.display()))
        })?;
        tracing::debug!(context = %id, dir = %dir.display(), "Sandbox context created");
        self.current = Some(dir);
        Ok(())
    }

    fn write_document(&mut self, id: ContextId, document: &str) -> RenderResult<()> {
        let dir = self.context_dir(id);
        if self.current.as_deref() != Some(dir.as_path()) {
            return Err(RenderError::Write(format!("{id} is not the live context")));
        }
        fs::write(dir.join(DOCUMENT_FILE), document)
            .and_then(|()| write_pointer(&self.out_dir, &dir))
            .map_err(|e| RenderError::Write(e.to_string()))
    }

    fn set_interactive(&mut self, interactive: bool) {
        tracing::trace!(interactive, "Preview interaction");
    }

    fn apply_width(&mut self, width: &PreviewWidth) {
        tracing::trace!(width = %width, "Preview width");
    }

    fn set_visible(&mut self, visible: bool) {
        tracing::trace!(visible, "Preview visibility");
    }
}

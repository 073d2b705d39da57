//! Sandbox renderer
//!
//! Every render throws away the previous execution context and mounts the
//! composed document into a brand-new one, so globals, timers and listeners
//! created by user script cannot survive into the next run.

use std::fmt;

use crate::error::RenderResult;
use crate::layout::PreviewWidth;
use crate::models::Documents;
use crate::tracing::span_names;

use super::compose::{ConsoleOptions, compose_document};

/// Sequence number of a sandbox context.
///
/// Strictly increasing within a session; two renders never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

impl ContextId {
    /// Creates an id from a raw sequence number
    #[must_use]
    pub const fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    /// Raw sequence number
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Context({})", self.0)
    }
}

/// Container that hosts the isolated preview context.
///
/// Implementations must provide a real isolation primitive (a fresh
/// document realm, a separate process, a throwaway directory) so that
/// nothing from one context is observable in the next.
pub trait SandboxHost {
    /// Discards the current context entirely and creates a new one.
    ///
    /// The old context must be gone before this returns, even on error.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::ContextCreation` if the new context cannot be built.
    fn create_context(&mut self, id: ContextId) -> RenderResult<()>;

    /// Writes the composed document into the context created for `id`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Write` if the document cannot be written.
    fn write_document(&mut self, id: ContextId, document: &str) -> RenderResult<()>;

    /// Enables or disables pointer interaction with the preview
    fn set_interactive(&mut self, interactive: bool);

    /// Applies the derived preview panel width
    fn apply_width(&mut self, width: &PreviewWidth);

    /// Shows or hides the preview panel
    fn set_visible(&mut self, visible: bool);
}

/// Result of a single render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A fresh context holds the new document
    Mounted(ContextId),
    /// Rendering failed; whatever the host shows now stays as it is
    Failed {
        /// Context that was created before the failure, if any
        context: Option<ContextId>,
        /// Description of the failure
        reason: String,
    },
}

impl RenderOutcome {
    /// Returns true if the document was mounted
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        matches!(self, Self::Mounted(_))
    }

    /// The context involved in this render, if one was created
    #[must_use]
    pub const fn context(&self) -> Option<ContextId> {
        match self {
            Self::Mounted(id) => Some(*id),
            Self::Failed { context, .. } => *context,
        }
    }
}

/// Rebuilds the preview from the documents on demand
#[derive(Debug)]
pub struct SandboxRenderer<H> {
    host: H,
    console: ConsoleOptions,
    next_sequence: u64,
    current: Option<ContextId>,
}

impl<H: SandboxHost> SandboxRenderer<H> {
    /// Creates a renderer that mounts into `host`
    #[must_use]
    pub fn new(host: H, console: ConsoleOptions) -> Self {
        Self {
            host,
            console,
            next_sequence: 1,
            current: None,
        }
    }

    /// Composes the documents and mounts them into a new context.
    ///
    /// Failures are logged and reported through the outcome; they never
    /// reach the caller as an error.
    pub fn render(&mut self, documents: &Documents, console_visible: bool) -> RenderOutcome {
        let id = ContextId::new(self.next_sequence);
        self.next_sequence += 1;

        let span = crate::trace_operation!(
            span_names::PREVIEW_RENDER,
            context = %id,
            console = console_visible
        );
        let _guard = span.enter();

        let console = console_visible.then_some(&self.console);
        let document = compose_document(documents, console);

        if let Err(e) = self.host.create_context(id) {
            tracing::error!(context = %id, error = %e, "Preview update error");
            self.current = None;
            return RenderOutcome::Failed {
                context: None,
                reason: e.to_string(),
            };
        }
        self.current = Some(id);

        match self.host.write_document(id, &document) {
            Ok(()) => {
                tracing::debug!(context = %id, bytes = document.len(), "Preview mounted");
                RenderOutcome::Mounted(id)
            }
            Err(e) => {
                tracing::error!(context = %id, error = %e, "Preview update error");
                RenderOutcome::Failed {
                    context: Some(id),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// The most recently created context
    #[must_use]
    pub const fn current_context(&self) -> Option<ContextId> {
        self.current
    }

    /// Console display options
    #[must_use]
    pub const fn console_options(&self) -> &ConsoleOptions {
        &self.console
    }

    /// The sandbox host
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the sandbox host
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

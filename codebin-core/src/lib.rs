//! `Codebin` Core Library
//!
//! This crate provides the core of the Codebin live code playground: the
//! three linked documents, the debounced live-preview pipeline, the
//! editor/preview layout engine, the tab router, the snippet service client
//! and the session aggregate that ties them together. It has no UI toolkit
//! dependency; every host surface is a trait.
//!
//! # Crate Structure
//!
//! - [`models`] - Documents and snippets
//! - [`preview`] - Debounce scheduler, pause controller, sandbox renderer
//! - [`layout`] - Width specification and the resize state machine
//! - [`editor`] / [`router`] - Text-editing component seam and tab routing
//! - [`api`] / [`auth`] / [`share`] - Snippet service, login state, share links
//! - [`session`] - `PlaygroundSession`, the single owner of session state
//! - [`config`] - Settings and their persistence
//! - [`testing`] - In-memory hosts

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod error;
pub mod layout;
pub mod models;
pub mod notification;
pub mod preview;
pub mod router;
pub mod session;
pub mod share;
pub mod testing;
pub mod tracing;

pub use api::{HttpSnippetApi, SnippetApi};
pub use auth::{AuthState, FileTokenStore, MemoryTokenStore, TokenStore};
pub use clipboard::Clipboard;
pub use config::{AppSettings, ConfigManager};
pub use editor::{EditorOptions, EditorPanel, EditorSurface, EditorTheme};
pub use error::{
    ApiError, ApiResult, ClipboardError, ClipboardResult, CodebinError, ConfigError, ConfigResult,
    EditorError, EditorResult, RenderError, RenderResult, StorageError, StorageResult,
};
pub use layout::{
    LayoutHost, LayoutState, ListenerRegistry, ListenerSet, PointerListener, PreviewWidth,
    ResizeEngine, WidthSpec,
};
pub use models::{DEFAULT_MARKUP, Document, DocumentId, Documents, Snippet, UNTITLED};
pub use notification::{Notification, NotificationKind, NotificationLog, Notifier};
pub use preview::{
    ContextId, PreviewState, RenderOutcome, RenderTrigger, SandboxHost, SandboxRenderer, TimerId,
    UpdateScheduler,
};
pub use router::TabRouter;
pub use session::{LoadOutcome, PlaygroundSession, SaveOutcome, SessionParts};
pub use tracing::{TracingConfig, TracingError, TracingLevel, TracingOutput, init_tracing};

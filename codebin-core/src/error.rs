//! Error types for `Codebin`
//!
//! Each concern has its own error enum and result alias. [`CodebinError`]
//! aggregates them for callers that do not care which layer failed.

use thiserror::Error;

/// Errors from the snippet service client.
///
/// Every variant is a network failure from the user's point of view:
/// it is surfaced as a transient notification and never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("HTTP {status} - {reason}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase
        reason: String,
    },

    /// The response body was not the expected JSON
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The configured service URL cannot be used as a base
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),
}

/// Result type for snippet service calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised while building or filling a sandbox context
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The host could not create a fresh execution context
    #[error("Failed to create sandbox context: {0}")]
    ContextCreation(String),

    /// Writing the composed document into the context failed
    #[error("Failed to write preview document: {0}")]
    Write(String),
}

/// Result type for sandbox operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors from the text-editing component
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// The editor surface could not be created
    #[error("Failed to create editor for {document}: {reason}")]
    CreateFailed {
        /// Document the surface was meant to edit
        document: String,
        /// Host supplied reason
        reason: String,
    },
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors from the system clipboard
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard is available in this environment
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard refused the write
    #[error("Clipboard write denied: {0}")]
    Denied(String),
}

/// Result type for clipboard operations
pub type ClipboardResult<T> = Result<T, ClipboardError>;

/// Errors from loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration directory could be determined
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// Reading or writing a configuration file failed
    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML for [`crate::config::AppSettings`]
    #[error("Failed to parse settings: {0}")]
    Parse(String),

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    /// A setting has an unusable value
    #[error("Invalid setting `{key}`: {reason}")]
    Invalid {
        /// Dotted setting key
        key: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors from durable client-side storage (the auth token)
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Top-level error for `Codebin` operations
#[derive(Debug, Error)]
pub enum CodebinError {
    /// Snippet service failure
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Preview rendering failure
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Editor component failure
    #[error(transparent)]
    Editor(#[from] EditorError),

    /// Clipboard failure
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    /// Configuration failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Token storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

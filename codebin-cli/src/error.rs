//! CLI error types and exit codes.

use codebin_core::error::{ApiError, CodebinError, ConfigError, EditorError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, project files, or other local errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Network failure - the snippet service could not be reached or
    /// rejected the request
    pub const NETWORK_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snippet service error
    #[error("Service error: {0}")]
    Api(String),

    /// Save attempted without a stored token
    #[error("Not logged in. Run `codebin login --email <EMAIL>` first")]
    NotLoggedIn,

    /// Project directory error
    #[error("Project error: {0}")]
    Project(String),

    /// Editor host error
    #[error("Editor error: {0}")]
    Editor(String),

    /// Preview could not be rendered
    #[error("Render error: {0}")]
    Render(String),

    /// File watching error
    #[error("Watch error: {0}")]
    Watch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        Self::Api(err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<EditorError> for CliError {
    fn from(err: EditorError) -> Self {
        Self::Editor(err.to_string())
    }
}

impl From<CodebinError> for CliError {
    fn from(err: CodebinError) -> Self {
        match err {
            CodebinError::Api(e) => e.into(),
            CodebinError::Config(e) => e.into(),
            CodebinError::Editor(e) => e.into(),
            CodebinError::Render(e) => Self::Render(e.to_string()),
            CodebinError::Clipboard(e) => Self::Project(e.to_string()),
            CodebinError::Storage(e) => Self::Config(e.to_string()),
        }
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, project, render, IO)
    /// - 2: Network failure (service unreachable or request rejected)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Api(_) => exit_codes::NETWORK_FAILURE,
            Self::Config(_)
            | Self::NotLoggedIn
            | Self::Project(_)
            | Self::Editor(_)
            | Self::Render(_)
            | Self::Watch(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}

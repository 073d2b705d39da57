//! Tracing integration for structured logging
//!
//! This module wires the `tracing` crate into codebin: subscriber setup for
//! hosts, span macros with consistent naming, and the span names used by the
//! preview, layout and backend operations.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Set once a subscriber has been installed
static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// The filter directive did not parse
    #[error("Invalid log filter `{filter}`: {reason}")]
    InvalidFilter {
        /// The rejected directive
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A subscriber is already installed
    #[error("Tracing has already been initialized")]
    AlreadyInitialized,

    /// The log file could not be opened
    #[error("Cannot open log file {path}: {reason}")]
    LogFile {
        /// Requested log file
        path: PathBuf,
        /// OS error text
        reason: String,
    },

    /// Installing the subscriber failed
    #[error("Failed to initialize tracing: {0}")]
    InitializationFailed(String),
}

/// Result type for tracing operations
pub type TracingResult<T> = Result<T, TracingError>;

/// Log verbosity, ordered from quietest to chattiest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TracingLevel {
    /// Only errors
    Error,
    /// Errors and warnings
    Warn,
    /// Errors, warnings and info (default)
    #[default]
    Info,
    /// Render, drag and request details
    Debug,
    /// Everything, including scheduler timer churn
    Trace,
}

impl TracingLevel {
    const ALL: [Self; 5] = [Self::Error, Self::Warn, Self::Info, Self::Debug, Self::Trace];

    /// Directive name used in filters and settings
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Level for a `-v` count on top of `self`, capped at trace
    #[must_use]
    pub fn raised_by(self, steps: u8) -> Self {
        let index = (self as usize).saturating_add(usize::from(steps));
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }
}

impl std::str::FromStr for TracingLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "warning" {
            return Ok(Self::Warn);
        }
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or(())
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where log lines go.
///
/// Never stdout: commands print their results there.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TracingOutput {
    /// Standard error, next to user-facing notices
    #[default]
    Stderr,
    /// Appended to a file, without ANSI colors
    File(PathBuf),
}

/// Configuration for tracing initialization
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level
    pub level: TracingLevel,
    /// Output destination
    pub output: TracingOutput,
    /// ANSI colors on terminal output
    pub ansi: bool,
    /// Custom filter string (overrides level if set)
    pub filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: TracingLevel::default(),
            output: TracingOutput::default(),
            ansi: true,
            filter: None,
        }
    }
}

impl TracingConfig {
    /// Creates a new tracing configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level
    #[must_use]
    pub const fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the output destination
    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Enables or disables ANSI colors
    #[must_use]
    pub const fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Sets a custom filter string
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Filter directive: the custom filter, or every codebin crate at the
    /// configured level
    #[must_use]
    pub fn directive(&self) -> String {
        self.filter.clone().unwrap_or_else(|| {
            let level = self.level.as_str();
            format!("codebin={level},codebin_core={level},codebin_cli={level}")
        })
    }

    /// Colors only make sense on a terminal stream
    #[must_use]
    pub const fn uses_ansi(&self) -> bool {
        self.ansi && matches!(self.output, TracingOutput::Stderr)
    }
}

fn make_writer(output: &TracingOutput) -> TracingResult<BoxMakeWriter> {
    match output {
        TracingOutput::Stderr => Ok(BoxMakeWriter::new(std::io::stderr)),
        TracingOutput::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| TracingError::LogFile {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| TracingError::LogFile {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            Ok(BoxMakeWriter::new(Arc::new(file)))
        }
    }
}

/// Installs the global subscriber.
///
/// Call once at host startup; a second call returns
/// [`TracingError::AlreadyInitialized`].
///
/// # Errors
///
/// Returns an error if tracing is already initialized, the custom filter is
/// invalid, or the log file cannot be opened.
pub fn init_tracing(config: &TracingConfig) -> TracingResult<()> {
    let directive = config.directive();
    let filter = EnvFilter::try_new(&directive).map_err(|e| TracingError::InvalidFilter {
        filter: directive.clone(),
        reason: e.to_string(),
    })?;
    let writer = make_writer(&config.output)?;

    if TRACING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Err(TracingError::AlreadyInitialized);
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(config.uses_ansi())
                .with_writer(writer),
        )
        .try_init()
        .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    tracing::debug!(level = %config.level, output = ?config.output, "Tracing initialized");
    Ok(())
}

/// Macro for creating operation spans with standard fields
///
/// # Examples
///
/// ```ignore
/// use codebin_core::trace_operation;
///
/// let span = trace_operation!("api.save", title = %snippet.display_title());
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! trace_operation {
    ($name:expr) => {
        tracing::info_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Macro for creating debug-level operation spans
///
/// Similar to `trace_operation!` but at debug level for chatty operations
/// such as drag gestures.
#[macro_export]
macro_rules! trace_operation_debug {
    ($name:expr) => {
        tracing::debug_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::debug_span!($name, $($field)*)
    };
}

/// Standard span names for codebin operations
pub mod span_names {
    /// Preview render span
    pub const PREVIEW_RENDER: &str = "preview.render";
    /// Resize gesture span
    pub const LAYOUT_DRAG: &str = "layout.drag";
    /// Login request span
    pub const API_LOGIN: &str = "api.login";
    /// Save request span
    pub const API_SAVE: &str = "api.save";
    /// Shared snippet load span
    pub const API_LOAD: &str = "api.load";
    /// Configuration load span
    pub const CONFIG_LOAD: &str = "config.load";
    /// Configuration save span
    pub const CONFIG_SAVE: &str = "config.save";
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_tracing_level_from_str() {
        assert_eq!("error".parse::<TracingLevel>(), Ok(TracingLevel::Error));
        assert_eq!("WARN".parse::<TracingLevel>(), Ok(TracingLevel::Warn));
        assert_eq!("warning".parse::<TracingLevel>(), Ok(TracingLevel::Warn));
        assert_eq!(" Info ".parse::<TracingLevel>(), Ok(TracingLevel::Info));
        assert_eq!("trace".parse::<TracingLevel>(), Ok(TracingLevel::Trace));
        assert!("loud".parse::<TracingLevel>().is_err());
    }

    #[test]
    fn test_raised_by_caps_at_trace() {
        assert_eq!(TracingLevel::Info.raised_by(0), TracingLevel::Info);
        assert_eq!(TracingLevel::Info.raised_by(1), TracingLevel::Debug);
        assert_eq!(TracingLevel::Warn.raised_by(9), TracingLevel::Trace);
        assert_eq!(TracingLevel::Trace.raised_by(u8::MAX), TracingLevel::Trace);
    }

    #[test]
    fn test_directive_follows_level() {
        let config = TracingConfig::new().with_level(TracingLevel::Debug);
        assert_eq!(
            config.directive(),
            "codebin=debug,codebin_core=debug,codebin_cli=debug"
        );

        let custom = config.with_filter("codebin_core=trace");
        assert_eq!(custom.directive(), "codebin_core=trace");
    }

    #[test]
    fn test_file_output_never_uses_ansi() {
        let config = TracingConfig::new();
        assert!(config.uses_ansi());
        assert!(!config.clone().with_ansi(false).uses_ansi());
        assert!(
            !config
                .with_output(TracingOutput::File(PathBuf::from("codebin.log")))
                .uses_ansi()
        );
    }

    #[test]
    fn test_log_file_is_created_with_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("codebin.log");
        assert!(make_writer(&TracingOutput::File(path.clone())).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_unopenable_log_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = make_writer(&TracingOutput::File(dir.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, TracingError::LogFile { .. }));
    }
}

//! Application settings model

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::layout::WidthSpec;
use crate::preview::{ConsoleOptions, DEFAULT_QUIET_PERIOD};
use crate::tracing::{TracingLevel, TracingOutput};

/// Base URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Top-level settings, persisted as `settings.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Backend service
    pub api: ApiSettings,
    /// Live preview
    pub preview: PreviewSettings,
    /// Editor/preview split
    pub layout: LayoutSettings,
    /// Text-editing component
    pub editor: EditorSettings,
    /// Log output
    pub logging: LoggingSettings,
}

impl AppSettings {
    /// Checks values serde cannot constrain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending key.
    pub fn validate(&self) -> ConfigResult<()> {
        reqwest::Url::parse(&self.api.base_url).map_err(|e| ConfigError::Invalid {
            key: "api.base_url",
            reason: e.to_string(),
        })?;
        if let Some(origin) = &self.api.share_origin {
            reqwest::Url::parse(origin).map_err(|e| ConfigError::Invalid {
                key: "api.share_origin",
                reason: e.to_string(),
            })?;
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "api.timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.preview.console.transparency) {
            return Err(ConfigError::Invalid {
                key: "preview.console.transparency",
                reason: "must be between 0 and 1".to_string(),
            });
        }
        if self.preview.console.display_size > 100 {
            return Err(ConfigError::Invalid {
                key: "preview.console.display_size",
                reason: "must be a percentage".to_string(),
            });
        }
        if self.editor.tab_size == 0 {
            return Err(ConfigError::Invalid {
                key: "editor.tab_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.logging.level.parse::<TracingLevel>().is_err() {
            return Err(ConfigError::Invalid {
                key: "logging.level",
                reason: format!("unknown level `{}`", self.logging.level),
            });
        }
        Ok(())
    }
}

/// Backend service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Service base URL; endpoints are resolved against it
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Origin used for share links, defaults to the base URL
    pub share_origin: Option<String>,
}

impl ApiSettings {
    /// Request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Origin share links are built from
    #[must_use]
    pub fn share_origin(&self) -> &str {
        self.share_origin.as_deref().unwrap_or(&self.base_url)
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            share_origin: None,
        }
    }
}

/// Live preview settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Debounce quiet period in milliseconds
    pub quiet_period_ms: u64,
    /// Whether the debug console starts visible
    pub console_visible: bool,
    /// Whether execution starts paused
    pub paused: bool,
    /// Debug console bootstrap options
    pub console: ConsoleOptions,
}

impl PreviewSettings {
    /// Debounce quiet period
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            quiet_period_ms: DEFAULT_QUIET_PERIOD.as_millis() as u64,
            console_visible: true,
            paused: false,
            console: ConsoleOptions::default(),
        }
    }
}

/// Split layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Startup split, restored whenever the preview is shown again
    pub default_editor_width: WidthSpec,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            default_editor_width: WidthSpec::DEFAULT,
        }
    }
}

/// Text-editing component settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Font size in points
    pub font_size: u8,
    /// Indentation width
    pub tab_size: u8,
    /// Soft wrap long lines
    pub word_wrap: bool,
    /// Use the dark theme
    pub dark_mode: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font_size: 14,
            tab_size: 2,
            word_wrap: true,
            dark_mode: false,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Base level, raised by `-v` on the command line
    pub level: String,
    /// Log file; logs go to stderr when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl LoggingSettings {
    /// Parsed level, falling back to info
    #[must_use]
    pub fn tracing_level(&self) -> TracingLevel {
        self.level.parse().unwrap_or_default()
    }

    /// Where log lines go
    #[must_use]
    pub fn tracing_output(&self) -> TracingOutput {
        self.file
            .clone()
            .map_or(TracingOutput::Stderr, TracingOutput::File)
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: TracingLevel::Info.to_string(),
            file: None,
        }
    }
}

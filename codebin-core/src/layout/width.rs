//! Editor width specification and the derived preview width

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Width of the editor panel, as a share of the container or in pixels.
///
/// The preview panel width is never stored; it is always derived from this
/// value through [`WidthSpec::preview_width`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WidthSpec {
    /// Percentage of the container, 0 to 100
    Percent(u8),
    /// Absolute pixel length, never negative
    Pixels(f64),
}

impl WidthSpec {
    /// Split used on startup and when the preview is shown again
    pub const DEFAULT: Self = Self::Percent(50);

    /// Editor width while the preview is hidden
    pub const FULL: Self = Self::Percent(100);

    /// Creates a pixel width, clamping negatives to zero
    #[must_use]
    pub fn pixels(value: f64) -> Self {
        Self::Pixels(value.max(0.0))
    }

    /// Derives the preview panel width
    #[must_use]
    pub fn preview_width(self) -> PreviewWidth {
        match self {
            Self::Percent(percent) => PreviewWidth::Percent(100 - percent.min(100)),
            Self::Pixels(px) => PreviewWidth::Remainder(px),
        }
    }

    /// Resolves to pixels within a container of the given width
    #[must_use]
    pub fn resolve(self, container_width: f64) -> f64 {
        match self {
            Self::Percent(percent) => container_width * f64::from(percent) / 100.0,
            Self::Pixels(px) => px,
        }
    }
}

impl Default for WidthSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for WidthSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(percent) => write!(f, "{percent}%"),
            Self::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

/// Error returned when a width string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid width `{0}` (expected e.g. `50%` or `320px`)")]
pub struct ParseWidthError(String);

impl FromStr for WidthSpec {
    type Err = ParseWidthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ParseWidthError(s.to_string());

        if let Some(percent) = trimmed.strip_suffix('%') {
            let value: u8 = percent.trim().parse().map_err(|_| invalid())?;
            if value > 100 {
                return Err(invalid());
            }
            return Ok(Self::Percent(value));
        }

        let px = trimmed.strip_suffix("px").unwrap_or(trimmed);
        let value: f64 = px.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        Ok(Self::Pixels(value))
    }
}

impl TryFrom<String> for WidthSpec {
    type Error = ParseWidthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WidthSpec> for String {
    fn from(value: WidthSpec) -> Self {
        value.to_string()
    }
}

/// Width of the preview panel, derived from the editor width
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewWidth {
    /// Complementary percentage
    Percent(u8),
    /// Whatever is left after the given editor pixel width
    Remainder(f64),
}

impl fmt::Display for PreviewWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(percent) => write!(f, "{percent}%"),
            Self::Remainder(px) => write!(f, "calc(100% - {px}px)"),
        }
    }
}

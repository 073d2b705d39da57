//! Configuration management for `Codebin`
//!
//! This module provides the `ConfigManager` for loading and saving
//! `settings.toml`, and the settings model it reads.

mod manager;
pub mod settings;

pub use manager::ConfigManager;
pub use settings::{
    ApiSettings, AppSettings, DEFAULT_API_URL, EditorSettings, LayoutSettings, LoggingSettings,
    PreviewSettings,
};

//! Shared utility functions used across command modules.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use codebin_core::api::HttpSnippetApi;
use codebin_core::auth::FileTokenStore;
use codebin_core::config::{AppSettings, ConfigManager};
use codebin_core::layout::ListenerSet;
use codebin_core::models::Documents;
use codebin_core::session::{PlaygroundSession, SessionParts};
use codebin_core::tracing::{TracingConfig, TracingLevel, init_tracing};

use crate::cli::GlobalOptions;
use crate::error::CliError;
use crate::host::{DirectorySandbox, FilePanel, ProjectFiles, TerminalNotifier};

/// Session type the CLI drives
pub type CliSession = PlaygroundSession<FilePanel, DirectorySandbox>;

/// Nominal container width for the headless layout, in pixels
const HEADLESS_CONTAINER_WIDTH: f64 = 1280.0;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Everything a command needs besides its own arguments
pub struct CommandContext {
    /// Configuration directory
    pub config: ConfigManager,
    /// Effective settings, command line overrides applied
    pub settings: AppSettings,
    /// Global flags
    pub options: GlobalOptions,
}

impl CommandContext {
    /// Loads settings, applies overrides and sets up logging
    pub fn load(options: &GlobalOptions) -> Result<Self, CliError> {
        let config = create_config_manager(options.config.as_deref())?;
        let mut settings = config.load_settings()?;
        if let Some(url) = &options.api_url {
            settings.api.base_url.clone_from(url);
            settings.validate()?;
        }

        init_logging(&settings, options);
        tracing::debug!(config_dir = %config.config_dir().display(), "Configuration loaded");

        Ok(Self {
            config,
            settings,
            options: options.clone(),
        })
    }

    /// Notifier honouring `--quiet` and `--no-color`
    pub fn notifier(&self) -> TerminalNotifier {
        let color = !self.options.no_color && std::io::stderr().is_terminal();
        TerminalNotifier::new(color, self.options.quiet)
    }

    /// Client for the configured service
    pub fn api(&self) -> Result<HttpSnippetApi, CliError> {
        Ok(HttpSnippetApi::from_settings(&self.settings.api)?)
    }

    /// The stored token file
    pub fn token_store(&self) -> FileTokenStore {
        FileTokenStore::new(self.config.token_path())
    }

    /// Starts a session over a project directory
    pub fn open_session(
        &self,
        settings: &AppSettings,
        project: &ProjectFiles,
        out_dir: &Path,
        documents: Documents,
    ) -> Result<CliSession, CliError> {
        let parts = SessionParts {
            panel: FilePanel::new(project.clone()),
            sandbox: DirectorySandbox::new(out_dir),
            listeners: ListenerSet::new(),
            token_store: Box::new(self.token_store()),
            notifier: Box::new(self.notifier()),
            container_width: HEADLESS_CONTAINER_WIDTH,
        };
        Ok(CliSession::start_with(settings, parts, documents)?)
    }

    /// Prints a line unless `--quiet`
    pub fn say(&self, message: impl std::fmt::Display) {
        if !self.options.quiet {
            eprintln!("{message}");
        }
    }
}

fn init_logging(settings: &AppSettings, options: &GlobalOptions) {
    let level = if options.quiet {
        TracingLevel::Error
    } else {
        settings.logging.tracing_level().raised_by(options.verbose)
    };
    let config = TracingConfig::new()
        .with_level(level)
        .with_output(settings.logging.tracing_output())
        .with_ansi(!options.no_color && std::io::stderr().is_terminal());
    if let Err(e) = init_tracing(&config) {
        eprintln!("Warning: {e}");
    }
}

/// Default preview output directory of a project
pub fn default_out_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(".codebin").join("preview")
}

/// Single-threaded runtime for the network calls and the watch loop
pub fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_dir_lives_inside_project() {
        assert_eq!(
            default_out_dir(Path::new("/p")),
            Path::new("/p/.codebin/preview")
        );
    }

    #[test]
    fn explicit_config_dir_is_used() {
        let manager = create_config_manager(Some(Path::new("/tmp/cb"))).unwrap();
        assert_eq!(manager.token_path(), Path::new("/tmp/cb/token"));
    }
}

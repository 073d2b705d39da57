//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Codebin command-line interface: a headless host for the playground
#[derive(Parser)]
#[command(name = "codebin")]
#[command(author, version, about = "Codebin live code playground, headless")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Snippet service base URL, overriding the configuration
    #[arg(long, global = true, env = "CODEBIN_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Options shared by every command
    #[must_use]
    pub fn global(&self) -> GlobalOptions {
        GlobalOptions {
            config: self.config.clone(),
            verbose: self.verbose,
            quiet: self.quiet,
            no_color: self.no_color,
            api_url: self.api_url.clone(),
        }
    }
}

/// Global flags, detached from the parsed command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Configuration directory override
    pub config: Option<PathBuf>,
    /// `-v` count
    pub verbose: u8,
    /// Errors only
    pub quiet: bool,
    /// No ANSI colors
    pub no_color: bool,
    /// Service URL override
    pub api_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Log in to the snippet service
    #[command(about = "Log in and store the access token")]
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored access token
    Logout,

    /// Save the project as a shared snippet
    #[command(about = "Save the project and print its share link")]
    Save {
        /// Project directory (index.html, style.css, script.js)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Snippet title (defaults to the project's `title` file)
        #[arg(short, long)]
        title: Option<String>,

        /// Copy the share link to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Load a shared snippet into a project directory
    #[command(about = "Fetch a shared snippet by id or link")]
    Load {
        /// Share id or share link
        reference: String,

        /// Project directory to write into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Preview output directory (defaults to `<dir>/.codebin/preview`)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Overwrite existing project files
        #[arg(short, long)]
        force: bool,
    },

    /// Render the project once
    #[command(about = "Compose the preview document into a fresh sandbox directory")]
    Render {
        /// Project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Preview output directory (defaults to `<dir>/.codebin/preview`)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Leave the debug console out
        #[arg(long)]
        no_console: bool,
    },

    /// Re-render whenever the project changes
    #[command(about = "Watch the project and keep the preview up to date")]
    Watch {
        /// Project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Preview output directory (defaults to `<dir>/.codebin/preview`)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Leave the debug console out
        #[arg(long)]
        no_console: bool,

        /// Start with execution paused
        #[arg(long)]
        paused: bool,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

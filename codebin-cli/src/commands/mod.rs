//! Command handler modules for the CLI.

mod auth;
mod completions;
mod preview;
mod snippet;

use crate::cli::{Commands, GlobalOptions};
use crate::error::CliError;
use crate::util::CommandContext;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(options: &GlobalOptions, command: Commands) -> Result<(), CliError> {
    if let Commands::Completions { shell } = command {
        return completions::cmd_completions(shell);
    }

    let ctx = CommandContext::load(options)?;
    match command {
        Commands::Login { email, password } => auth::cmd_login(&ctx, &email, password),
        Commands::Logout => auth::cmd_logout(&ctx),
        Commands::Save { dir, title, copy } => snippet::cmd_save(&ctx, &dir, title, copy),
        Commands::Load {
            reference,
            dir,
            out,
            force,
        } => snippet::cmd_load(&ctx, &reference, &dir, out, force),
        Commands::Render {
            dir,
            out,
            no_console,
        } => preview::cmd_render(&ctx, &dir, out, no_console),
        Commands::Watch {
            dir,
            out,
            no_console,
            paused,
        } => preview::cmd_watch(&ctx, &dir, out, no_console, paused),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}

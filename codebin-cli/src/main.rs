//! `codebin` - headless command-line host for the Codebin playground
//!
//! Backs the three documents with files in a project directory, renders
//! previews into throwaway sandbox directories, watches the project for
//! edits and talks to the snippet service (login, save, load by share id).

mod cli;
mod commands;
mod error;
mod host;
mod util;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    let options = cli.global();

    let result = commands::dispatch(&options, cli.command);

    if let Err(e) = result {
        if !options.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}

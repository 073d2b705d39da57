//! Render and watch commands.

use std::path::{Path, PathBuf};
use std::time::Instant;

use codebin_core::models::DocumentId;
use codebin_core::preview::{RenderOutcome, sleep_until_deadline};
use notify::{Event, RecursiveMode, Watcher};
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use crate::error::CliError;
use crate::host::ProjectFiles;
use crate::util::{CliSession, CommandContext, default_out_dir, runtime};

/// Render command handler
pub fn cmd_render(
    ctx: &CommandContext,
    dir: &Path,
    out: Option<PathBuf>,
    no_console: bool,
) -> Result<(), CliError> {
    let project = ProjectFiles::new(dir);
    let documents = project.read_documents()?;
    let out_dir = out.unwrap_or_else(|| default_out_dir(dir));

    let mut settings = ctx.settings.clone();
    settings.preview.paused = false;
    if no_console {
        settings.preview.console_visible = false;
    }

    let mut session = ctx.open_session(&settings, &project, &out_dir, documents)?;
    let outcome = session.render_now();
    let result = match outcome {
        Some(RenderOutcome::Mounted(_)) => {
            if let Some(path) = session.sandbox().current_document() {
                println!("{}", path.display());
            }
            Ok(())
        }
        Some(RenderOutcome::Failed { reason, .. }) => Err(CliError::Render(reason)),
        None => Err(CliError::Render("rendering is paused".to_string())),
    };
    session.shutdown();
    result
}

/// Watch command handler
pub fn cmd_watch(
    ctx: &CommandContext,
    dir: &Path,
    out: Option<PathBuf>,
    no_console: bool,
    paused: bool,
) -> Result<(), CliError> {
    let project = ProjectFiles::new(dir);
    let documents = project.read_documents()?;
    let out_dir = out.unwrap_or_else(|| default_out_dir(dir));

    let mut settings = ctx.settings.clone();
    if paused {
        settings.preview.paused = true;
    }
    if no_console {
        settings.preview.console_visible = false;
    }

    let mut session = ctx.open_session(&settings, &project, &out_dir, documents)?;
    let result = runtime()?.block_on(watch_loop(ctx, &project, &mut session));
    session.shutdown();
    result
}

/// Interactive keys read from stdin while watching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchCommand {
    TogglePause,
    ToggleConsole,
    Render,
    SwitchTab(DocumentId),
    Quit,
}

fn parse_command(line: &str) -> Option<WatchCommand> {
    match line.trim() {
        "p" | "pause" => Some(WatchCommand::TogglePause),
        "c" | "console" => Some(WatchCommand::ToggleConsole),
        "r" | "render" => Some(WatchCommand::Render),
        "1" | "html" => Some(WatchCommand::SwitchTab(DocumentId::Markup)),
        "2" | "css" => Some(WatchCommand::SwitchTab(DocumentId::Style)),
        "3" | "js" => Some(WatchCommand::SwitchTab(DocumentId::Script)),
        "q" | "quit" | "exit" => Some(WatchCommand::Quit),
        _ => None,
    }
}

async fn watch_loop(
    ctx: &CommandContext,
    project: &ProjectFiles,
    session: &mut CliSession,
) -> Result<(), CliError> {
    let (events_tx, mut events_rx) = mpsc::unbounded_channel::<Event>();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            let _ = events_tx.send(event);
        }
        Err(e) => tracing::warn!(error = %e, "File watcher error"),
    })
    .map_err(|e| CliError::Watch(e.to_string()))?;
    watcher
        .watch(project.dir(), RecursiveMode::NonRecursive)
        .map_err(|e| CliError::Watch(format!("{}: {e}", project.dir().display())))?;

    ctx.say(format!(
        "Watching {} (p: pause, c: console, r: render, 1-3: tab, q: quit)",
        project.dir().display()
    ));
    if let Some(outcome) = session.render_now() {
        report(ctx, session, &outcome);
    } else {
        ctx.say("Execution paused");
    }

    let mut stdin = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        let deadline = session.next_render_deadline();
        tokio::select! {
            Some(event) = events_rx.recv() => {
                if event
                    .paths
                    .iter()
                    .any(|path| project.document_for_path(path).is_some())
                {
                    reload(project, session);
                }
            }
            line = stdin.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match parse_command(&line) {
                    Some(WatchCommand::Quit) => break,
                    Some(command) => run_command(ctx, session, command),
                    None if line.trim().is_empty() => {}
                    None => ctx.say(format!("Unknown command `{}`", line.trim())),
                },
                Ok(None) => stdin_open = false,
                Err(e) => {
                    tracing::warn!(error = %e, "Stdin closed");
                    stdin_open = false;
                }
            },
            () = sleep_until_deadline(deadline) => {
                if let Some(outcome) = session.poll_scheduled_render(Instant::now()) {
                    report(ctx, session, &outcome);
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    drop(watcher);
    Ok(())
}

/// Feeds every project file back through the editor change callback;
/// unchanged documents are ignored by the session
fn reload(project: &ProjectFiles, session: &mut CliSession) {
    let now = Instant::now();
    for id in DocumentId::ALL {
        match project.read(id) {
            Ok(Some(content)) => {
                if let Some(timer) = session.on_content_changed(id, content, now) {
                    tracing::debug!(document = %id, timer = %timer, "Preview update scheduled");
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(document = %id, error = %e, "Failed to read document"),
        }
    }
}

fn run_command(ctx: &CommandContext, session: &mut CliSession, command: WatchCommand) {
    match command {
        WatchCommand::TogglePause => match session.toggle_pause() {
            Some(outcome) => {
                ctx.say("Execution resumed");
                report(ctx, session, &outcome);
            }
            None => ctx.say("Execution paused"),
        },
        WatchCommand::ToggleConsole => {
            let outcome = session.toggle_console();
            let state = if session.preview().is_console_visible() {
                "shown"
            } else {
                "hidden"
            };
            ctx.say(format!("Console {state}"));
            report(ctx, session, &outcome);
        }
        WatchCommand::Render => match session.render_now() {
            Some(outcome) => report(ctx, session, &outcome),
            None => ctx.say("Execution paused; press p to resume"),
        },
        WatchCommand::SwitchTab(id) => {
            session.switch_tab(id);
            ctx.say(format!("Active tab: {}", id.label()));
        }
        WatchCommand::Quit => {}
    }
}

fn report(ctx: &CommandContext, session: &CliSession, outcome: &RenderOutcome) {
    match outcome {
        RenderOutcome::Mounted(id) => {
            if let Some(path) = session.sandbox().current_document() {
                ctx.say(format!("{id}: {}", path.display()));
            }
        }
        RenderOutcome::Failed { reason, .. } => ctx.say(format!("Preview update error: {reason}")),
    }
}

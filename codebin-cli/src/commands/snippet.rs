//! Save and load commands.

use std::path::{Path, PathBuf};

use codebin_core::models::Documents;
use codebin_core::session::{LoadOutcome, SaveOutcome};
use codebin_core::share::parse_share_reference;

use crate::error::CliError;
use crate::host::{ProjectFiles, SystemClipboard};
use crate::util::{CommandContext, default_out_dir, runtime};

/// Save command handler
pub fn cmd_save(
    ctx: &CommandContext,
    dir: &Path,
    title: Option<String>,
    copy: bool,
) -> Result<(), CliError> {
    let project = ProjectFiles::new(dir);
    if !project.has_documents() {
        return Err(CliError::Project(format!(
            "no index.html, style.css or script.js in {}",
            dir.display()
        )));
    }
    let documents = project.read_documents()?;
    let title = match title {
        Some(title) => Some(title),
        None => project.read_title()?,
    };

    let api = ctx.api()?;
    let mut session =
        ctx.open_session(&ctx.settings, &project, &default_out_dir(dir), documents)?;
    if let Some(title) = title {
        session.set_title(title);
    }

    let outcome = runtime()?.block_on(session.save(&api));
    let result = match outcome {
        SaveOutcome::Saved { share_url, .. } => {
            println!("{share_url}");
            if copy {
                session.copy_share_url(&mut SystemClipboard::new());
            }
            Ok(())
        }
        SaveOutcome::LoginRequired => Err(CliError::NotLoggedIn),
        SaveOutcome::Failed(e) => Err(e.into()),
    };
    session.shutdown();
    result
}

/// Load command handler
pub fn cmd_load(
    ctx: &CommandContext,
    reference: &str,
    dir: &Path,
    out: Option<PathBuf>,
    force: bool,
) -> Result<(), CliError> {
    let share_id = parse_share_reference(reference)
        .ok_or_else(|| CliError::Project(format!("`{reference}` is not a share id or link")))?;

    let project = ProjectFiles::new(dir);
    if project.has_documents() && !force {
        return Err(CliError::Project(format!(
            "{} already holds a project; pass --force to overwrite it",
            dir.display()
        )));
    }

    let api = ctx.api()?;
    let out_dir = out.unwrap_or_else(|| default_out_dir(dir));
    let mut session = ctx.open_session(&ctx.settings, &project, &out_dir, Documents::new())?;

    let outcome = runtime()?.block_on(session.load_shared(&api, &share_id));
    let result = match outcome {
        LoadOutcome::Loaded { render } => {
            if let Err(e) = project.write_snippet(session.documents(), session.title()) {
                session.shutdown();
                return Err(CliError::Project(format!(
                    "cannot write {}: {e}",
                    project.dir().display()
                )));
            }
            if render.is_some_and(|outcome| outcome.is_mounted())
                && let Some(path) = session.sandbox().current_document()
            {
                ctx.say(format!("Preview: {}", path.display()));
            }
            println!("{}", project.dir().display());
            Ok(())
        }
        LoadOutcome::Failed(e) => Err(e.into()),
    };
    session.shutdown();
    result
}

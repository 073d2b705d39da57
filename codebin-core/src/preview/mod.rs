//! Live preview pipeline
//!
//! Content changes flow through the [`UpdateScheduler`] (debounce), are
//! gated by the pause flag in [`PreviewState`], and end in the
//! [`SandboxRenderer`], which mounts a freshly composed document into a new
//! isolated context on every run.
//!
//! # Module Structure
//!
//! - `scheduler` - Quiet-period debouncing with a single pending timer
//! - `controller` - Pause and console toggles (`PreviewState`)
//! - `compose` - Preview document composition and console bootstrap
//! - `renderer` - Discard-and-recreate rendering through a `SandboxHost`

mod compose;
mod controller;
mod renderer;
mod scheduler;

use std::time::Instant;

pub use compose::{ConsoleOptions, DEFAULT_CONSOLE_SCRIPT, compose_document};
pub use controller::{PreviewState, RenderTrigger};
pub use renderer::{ContextId, RenderOutcome, SandboxHost, SandboxRenderer};
pub use scheduler::{DEFAULT_QUIET_PERIOD, PendingTimer, TimerId, UpdateScheduler};

/// Waits until `deadline`, or forever when there is none.
///
/// Host event loops race this against their input sources and then call
/// `PlaygroundSession::poll_scheduled_render`.
pub async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending::<()>().await,
    }
}

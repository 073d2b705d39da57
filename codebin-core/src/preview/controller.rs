//! Preview state and the execution pause controller

use std::time::{Duration, Instant};

use crate::config::PreviewSettings;

use super::scheduler::{TimerId, UpdateScheduler};

/// Whether a state change requires an immediate render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTrigger {
    /// Nothing to render now
    None,
    /// Render right away, bypassing the quiet period
    Immediate,
}

impl RenderTrigger {
    /// Returns true for [`RenderTrigger::Immediate`]
    #[must_use]
    pub const fn is_immediate(self) -> bool {
        matches!(self, Self::Immediate)
    }
}

/// The single live preview state of a session.
///
/// Owns the update scheduler, so the pending timer can only be armed or
/// cancelled through the rules implemented here.
#[derive(Debug)]
pub struct PreviewState {
    paused: bool,
    console_visible: bool,
    scheduler: UpdateScheduler,
}

impl PreviewState {
    /// Creates a running preview with the console shown
    #[must_use]
    pub const fn new(quiet_period: Duration) -> Self {
        Self {
            paused: false,
            console_visible: true,
            scheduler: UpdateScheduler::new(quiet_period),
        }
    }

    /// Creates the preview state described by the settings
    #[must_use]
    pub fn from_settings(settings: &PreviewSettings) -> Self {
        Self {
            paused: settings.paused,
            console_visible: settings.console_visible,
            scheduler: UpdateScheduler::new(settings.quiet_period()),
        }
    }

    /// Returns true while automatic renders are suspended
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns true if the debug console is injected into renders
    #[must_use]
    pub const fn is_console_visible(&self) -> bool {
        self.console_visible
    }

    /// The update scheduler
    #[must_use]
    pub const fn scheduler(&self) -> &UpdateScheduler {
        &self.scheduler
    }

    /// Records a content change; arms the update timer unless paused
    pub fn notify_changed(&mut self, now: Instant) -> Option<TimerId> {
        self.scheduler.notify_changed(now, self.paused)
    }

    /// Deadline of the pending update, if any
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// Consumes the pending update if it is due
    pub fn poll_expired(&mut self, now: Instant) -> bool {
        self.scheduler.poll_expired(now)
    }

    /// Drops the pending update without rendering
    pub fn cancel_pending(&mut self) -> Option<TimerId> {
        self.scheduler.cancel()
    }

    /// Flips between paused and running.
    ///
    /// Resuming asks for one immediate render so edits made while paused
    /// show up at once. Pausing drops the pending update.
    pub fn toggle_pause(&mut self) -> RenderTrigger {
        self.paused = !self.paused;
        if self.paused {
            if let Some(timer) = self.scheduler.cancel() {
                tracing::debug!(timer = %timer, "Pending preview update dropped on pause");
            }
            tracing::info!("Preview execution paused");
            RenderTrigger::None
        } else {
            tracing::info!("Preview execution resumed");
            RenderTrigger::Immediate
        }
    }

    /// Flips console visibility; always asks for an immediate render
    pub fn toggle_console(&mut self) -> RenderTrigger {
        self.console_visible = !self.console_visible;
        tracing::debug!(visible = self.console_visible, "Debug console toggled");
        RenderTrigger::Immediate
    }
}

impl Default for PreviewState {
    fn default() -> Self {
        Self::new(super::scheduler::DEFAULT_QUIET_PERIOD)
    }
}

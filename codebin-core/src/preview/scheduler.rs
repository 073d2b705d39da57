//! Debounced preview update scheduling
//!
//! The scheduler never sleeps itself. It tracks a single pending deadline
//! that the host event loop waits on, which keeps the coalescing rules
//! testable with plain `Instant` arithmetic.

use std::fmt;
use std::time::{Duration, Instant};

/// Quiet period after the last edit before the preview refreshes
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Handle of an armed update timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw sequence number of this timer
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// The one outstanding update timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    /// Handle returned when the timer was armed
    pub id: TimerId,
    /// When the preview should refresh
    pub deadline: Instant,
}

/// Coalesces content changes into a single refresh after a quiet period.
///
/// At most one timer is outstanding at any time: every call to
/// [`notify_changed`](Self::notify_changed) cancels the previous one.
#[derive(Debug)]
pub struct UpdateScheduler {
    quiet_period: Duration,
    pending: Option<PendingTimer>,
    next_id: u64,
}

impl UpdateScheduler {
    /// Creates a scheduler with the given quiet period
    #[must_use]
    pub const fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
            next_id: 0,
        }
    }

    /// Returns the quiet period
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Records a content change at `now`.
    ///
    /// Cancels the outstanding timer, then arms a new one unless `paused`.
    /// Returns the handle of the new timer.
    pub fn notify_changed(&mut self, now: Instant, paused: bool) -> Option<TimerId> {
        if let Some(previous) = self.pending.take() {
            tracing::trace!(timer = %previous.id, "Cancelled pending preview update");
        }
        if paused {
            tracing::trace!("Execution paused, preview update not scheduled");
            return None;
        }

        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending = Some(PendingTimer {
            id,
            deadline: now + self.quiet_period,
        });
        Some(id)
    }

    /// Cancels the outstanding timer, if any
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.pending.take().map(|timer| timer.id)
    }

    /// The outstanding timer
    #[must_use]
    pub const fn pending(&self) -> Option<PendingTimer> {
        self.pending
    }

    /// Deadline of the outstanding timer
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|timer| timer.deadline)
    }

    /// Fires the timer with the given handle.
    ///
    /// Returns `true` and clears the pending timer only if `id` is still the
    /// outstanding one; a cancelled handle is ignored.
    pub fn fire(&mut self, id: TimerId) -> bool {
        match self.pending {
            Some(timer) if timer.id == id => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Fires the outstanding timer if its deadline has passed
    pub fn poll_expired(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(timer) if timer.deadline <= now => self.fire(timer.id),
            _ => false,
        }
    }
}

impl Default for UpdateScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

//! Property-based tests for debounced preview updates
//!
//! Tests that any burst of edits closer together than the quiet period
//! produces exactly one render, and that pausing suppresses renders.

use std::time::{Duration, Instant};

use codebin_core::preview::{PreviewState, UpdateScheduler};
use proptest::prelude::*;

const QUIET: Duration = Duration::from_millis(500);

/// Gaps between consecutive edits, all shorter than the quiet period
fn arb_burst() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..500, 1..40)
}

/// Gaps that may or may not exceed the quiet period
fn arb_edit_gaps() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..1500, 1..40)
}

/// Replays edits at the given gaps, firing whatever is due before each edit.
/// Returns the number of refreshes including the final one.
fn replay(scheduler: &mut UpdateScheduler, t0: Instant, gaps: &[u64]) -> usize {
    let mut fired = 0;
    let mut now = t0;
    for gap in gaps {
        now += Duration::from_millis(*gap);
        if scheduler.poll_expired(now) {
            fired += 1;
        }
        scheduler.notify_changed(now, false);
    }
    if let Some(deadline) = scheduler.deadline() {
        if scheduler.poll_expired(deadline) {
            fired += 1;
        }
    }
    fired
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn burst_coalesces_into_one_refresh(gaps in arb_burst()) {
        let mut scheduler = UpdateScheduler::new(QUIET);
        let fired = replay(&mut scheduler, Instant::now(), &gaps);

        prop_assert_eq!(fired, 1);
        prop_assert!(scheduler.pending().is_none());
    }

    #[test]
    fn refresh_count_matches_quiet_gaps(gaps in arb_edit_gaps()) {
        let mut scheduler = UpdateScheduler::new(QUIET);
        let fired = replay(&mut scheduler, Instant::now(), &gaps);

        // A refresh lands between two edits only when the gap reaches the
        // quiet period; the last edit always gets one.
        let expected = gaps.iter().skip(1).filter(|gap| **gap >= 500).count() + 1;
        prop_assert_eq!(fired, expected);
    }

    #[test]
    fn at_most_one_timer_outstanding(gaps in arb_edit_gaps()) {
        let mut scheduler = UpdateScheduler::new(QUIET);
        let mut now = Instant::now();
        let mut previous = None;

        for gap in gaps {
            now += Duration::from_millis(gap);
            let id = scheduler.notify_changed(now, false);
            prop_assert!(id.is_some());
            prop_assert_eq!(scheduler.pending().map(|timer| timer.id), id);
            prop_assert_eq!(scheduler.deadline(), Some(now + QUIET));

            // A cancelled handle never fires
            if let Some(stale) = previous {
                prop_assert!(!scheduler.fire(stale));
            }
            previous = id;
        }
    }

    #[test]
    fn paused_edits_never_arm(gaps in arb_edit_gaps()) {
        let mut state = PreviewState::new(QUIET);
        state.toggle_pause();
        let mut now = Instant::now();

        for gap in gaps {
            now += Duration::from_millis(gap);
            prop_assert!(state.notify_changed(now).is_none());
            prop_assert!(!state.poll_expired(now + QUIET));
        }
        prop_assert!(state.deadline().is_none());
        prop_assert!(state.toggle_pause().is_immediate());
    }

    #[test]
    fn nothing_fires_before_deadline(offset in 0u64..500) {
        let mut scheduler = UpdateScheduler::new(QUIET);
        let t0 = Instant::now();
        scheduler.notify_changed(t0, false);

        prop_assert!(!scheduler.poll_expired(t0 + Duration::from_millis(offset)));
        prop_assert!(scheduler.poll_expired(t0 + QUIET));
    }
}

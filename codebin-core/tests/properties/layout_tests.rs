//! Property-based tests for splitter dragging
//!
//! Tests drag arithmetic, the zero floor, and that drag listeners are released
//! whatever sequence of pointer events arrives.

use codebin_core::config::LayoutSettings;
use codebin_core::layout::{ResizeEngine, WidthSpec};
use codebin_core::testing::{RecordingLayoutHost, SharedListeners};
use proptest::prelude::*;

/// Pointer gestures on the splitter
#[derive(Debug, Clone)]
enum Gesture {
    Down { x: f64, width: f64 },
    Move { x: f64 },
    Up,
    TogglePreview,
    Resize { container: f64 },
}

fn arb_gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        (-500.0f64..3000.0, 0.0f64..2000.0).prop_map(|(x, width)| Gesture::Down { x, width }),
        (-500.0f64..3000.0).prop_map(|x| Gesture::Move { x }),
        Just(Gesture::Up),
        Just(Gesture::TogglePreview),
        (0.0f64..3000.0).prop_map(|container| Gesture::Resize { container }),
    ]
}

fn engine(listeners: SharedListeners) -> ResizeEngine<SharedListeners> {
    ResizeEngine::new(&LayoutSettings::default(), listeners)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn drag_follows_pointer(
        container in 0.0f64..2500.0,
        start_x in 0.0f64..2500.0,
        start_width in 0.0f64..600.0,
        pointer_x in -1000.0f64..4000.0,
    ) {
        let mut host = RecordingLayoutHost::default();
        let mut engine = engine(SharedListeners::default());
        engine.initialize(container, &mut host);
        engine.start_drag(start_x, start_width, &mut host);

        let Some(WidthSpec::Pixels(width)) = engine.drag_to(pointer_x, &mut host) else {
            return Err(TestCaseError::fail("drag produced no pixel width"));
        };

        let expected = (start_width + pointer_x - start_x).max(0.0);
        prop_assert!((width - expected).abs() < 1e-9);
        prop_assert!(width >= 0.0);
        prop_assert_eq!(host.widths().map(|(editor, _)| editor), Some(WidthSpec::Pixels(width)));
    }

    #[test]
    fn drag_past_left_edge_floors_at_zero(
        start_width in 0.0f64..500.0,
        overshoot in 1.0f64..1000.0,
    ) {
        let mut host = RecordingLayoutHost::default();
        let mut engine = engine(SharedListeners::default());
        engine.initialize(1000.0, &mut host);
        engine.start_drag(600.0, start_width, &mut host);

        let width = engine.drag_to(600.0 - start_width - overshoot, &mut host);
        prop_assert_eq!(width, Some(WidthSpec::Pixels(0.0)));
    }

    #[test]
    fn listeners_balanced_after_any_gesture_sequence(
        gestures in prop::collection::vec(arb_gesture(), 0..30),
        drop_mid_drag in any::<bool>(),
    ) {
        let listeners = SharedListeners::default();
        let mut host = RecordingLayoutHost::default();
        let mut engine = engine(listeners.clone());
        engine.initialize(1200.0, &mut host);

        for gesture in gestures {
            match gesture {
                Gesture::Down { x, width } => {
                    engine.start_drag(x, width, &mut host);
                }
                Gesture::Move { x } => {
                    engine.drag_to(x, &mut host);
                }
                Gesture::Up => {
                    engine.end_drag(&mut host);
                }
                Gesture::TogglePreview => {
                    engine.toggle_preview(&mut host);
                }
                Gesture::Resize { container } => engine.viewport_resized(container, &mut host),
            }

            let dragging = engine.state().is_dragging();
            prop_assert_eq!(listeners.active_count(), if dragging { 4 } else { 0 });
            prop_assert_eq!(host.interactive().unwrap_or(true), !dragging);
        }

        if drop_mid_drag {
            drop(engine);
        } else {
            engine.end_drag(&mut host);
        }
        prop_assert_eq!(listeners.active_count(), 0);
    }
}

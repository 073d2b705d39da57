//! Property-based tests for editor and preview widths
//!
//! Tests that the preview width is always the complement of the editor
//! width and that width strings survive parsing.

use codebin_core::layout::{PreviewWidth, WidthSpec};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn percent_widths_sum_to_hundred(percent in 0u8..=100) {
        let PreviewWidth::Percent(preview) = WidthSpec::Percent(percent).preview_width() else {
            return Err(TestCaseError::fail("percent editor width gave a pixel preview"));
        };
        prop_assert_eq!(u16::from(percent) + u16::from(preview), 100);
    }

    #[test]
    fn pixel_widths_fill_remainder(px in 0.0f64..10_000.0, container in 0.0f64..10_000.0) {
        let editor = WidthSpec::pixels(px);
        prop_assert_eq!(editor.preview_width(), PreviewWidth::Remainder(px));
        prop_assert_eq!(editor.resolve(container), px);
        prop_assert_eq!(
            editor.preview_width().to_string(),
            format!("calc(100% - {px}px)")
        );
    }

    #[test]
    fn negative_pixels_clamp_to_zero(px in -10_000.0f64..0.0) {
        prop_assert_eq!(WidthSpec::pixels(px), WidthSpec::Pixels(0.0));
    }

    #[test]
    fn displayed_widths_parse_back(percent in 0u8..=100, px in 0u32..10_000) {
        let percent_spec = WidthSpec::Percent(percent);
        let px_spec = WidthSpec::Pixels(f64::from(px));

        prop_assert_eq!(percent_spec.to_string().parse::<WidthSpec>(), Ok(percent_spec));
        prop_assert_eq!(px_spec.to_string().parse::<WidthSpec>(), Ok(px_spec));
    }

    #[test]
    fn percent_above_hundred_rejected(percent in 101u16..1000) {
        let text = format!("{percent}%");
        prop_assert!(text.parse::<WidthSpec>().is_err());
    }
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{sized, TestEnv};
use crate::layout::LayoutRequest;
use crate::{
    AttributedString, DisplayMetrics, FontFitAdjuster, MeasureMode, ParagraphAttributes,
};

fn exact(width: f32, max_lines: Option<u32>) -> LayoutRequest {
    LayoutRequest {
        width,
        width_mode: MeasureMode::Exactly,
        max_lines,
        ..LayoutRequest::default()
    }
}

#[test]
fn shrinks_until_lines_fit() {
    let env = TestEnv::new();
    let text = env.flatten(&[sized("aaaa bbbb cccc dddd", 16.0)]);
    let adjuster = FontFitAdjuster::new(4.0, 1.0);
    let outcome = adjuster.fit(
        env.manager.backend(),
        &text,
        &exact(80.0, Some(1)),
        0.0,
        MeasureMode::Undefined,
    );

    assert_eq!(outcome.layout.line_count(), 1);
    assert_eq!(outcome.initial_font_size, 16.0);
    assert_eq!(outcome.final_font_size, 8.0);
    assert_eq!(outcome.iterations, 8);
    // The input is never modified.
    assert_eq!(text.largest_font_size(), Some(16.0));
}

#[test]
fn stops_at_the_minimum_size() {
    let env = TestEnv::new();
    let text = env.flatten(&[sized(&"word ".repeat(50), 16.0)]);
    let adjuster = FontFitAdjuster::new(4.0, 1.0);
    let outcome = adjuster.fit(
        env.manager.backend(),
        &text,
        &exact(50.0, Some(1)),
        0.0,
        MeasureMode::Undefined,
    );

    assert_eq!(outcome.final_font_size, 4.0);
    assert_eq!(outcome.iterations, 12, "one iteration per pixel above the minimum");
    assert!(outcome.layout.line_count() > 1, "the text still does not fit");
}

#[test]
fn every_starting_size_reaches_the_minimum() {
    let env = TestEnv::new();
    let adjuster = FontFitAdjuster::new(4.0, 1.0);
    for start in 5_u16..=100 {
        let text = env.flatten(&[sized(&"word ".repeat(60), f32::from(start))]);
        let outcome = adjuster.fit(
            env.manager.backend(),
            &text,
            &exact(50.0, Some(1)),
            0.0,
            MeasureMode::Undefined,
        );
        assert_eq!(outcome.final_font_size, 4.0, "starting at {start}");
        assert_eq!(outcome.iterations, u32::from(start) - 4, "starting at {start}");
    }
}

#[test]
fn every_starting_size_finds_the_largest_fit() {
    let env = TestEnv::new();
    let adjuster = FontFitAdjuster::new(4.0, 1.0);
    for start in 9_u16..=60 {
        let start = f32::from(start);
        let text = env.flatten(&[sized("aaaa bbbb cccc dddd", start)]);
        let outcome = adjuster.fit(
            env.manager.backend(),
            &text,
            &exact(80.0, Some(1)),
            0.0,
            MeasureMode::Undefined,
        );
        assert_eq!(outcome.final_font_size, 8.0, "starting at {start}");
        assert_eq!(outcome.layout.line_count(), 1, "starting at {start}");
    }
}

#[test]
fn shrinks_to_fit_a_height() {
    let env = TestEnv::new();
    let text = env.flatten(&[sized("aaa bbb ccc", 16.0)]);
    let adjuster = FontFitAdjuster::new(4.0, 1.0);
    let outcome = adjuster.fit(
        env.manager.backend(),
        &text,
        &exact(100.0, None),
        15.0,
        MeasureMode::AtMost,
    );

    assert_eq!(outcome.final_font_size, 13.0);
    assert!(outcome.layout.height() <= 15.0, "layout fits the height");
}

#[test]
fn fitting_text_is_left_alone() {
    let env = TestEnv::new();
    let text = env.flatten(&[sized("short", 16.0)]);
    let outcome = FontFitAdjuster::new(4.0, 1.0).fit(
        env.manager.backend(),
        &text,
        &exact(200.0, Some(1)),
        0.0,
        MeasureMode::Undefined,
    );
    assert_eq!(outcome.iterations, 0);
    assert_eq!(outcome.final_font_size, 16.0);
}

#[test]
fn maximum_size_caps_the_start() {
    let env = TestEnv::new();
    let text = env.flatten(&[sized("short", 16.0), sized(" tail", 8.0)]);
    let outcome = FontFitAdjuster::new(4.0, 1.0)
        .with_max_font_size(Some(12.0))
        .fit(
            env.manager.backend(),
            &text,
            &exact(200.0, Some(1)),
            0.0,
            MeasureMode::Undefined,
        );
    assert_eq!(outcome.iterations, 0);
    assert_eq!(outcome.text.font_sizes().collect::<Vec<_>>(), vec![12.0, 6.0]);
}

#[test]
fn paragraph_limits_are_converted_to_pixels() {
    let metrics = DisplayMetrics::new(2.0, 1.0);
    let defaults = FontFitAdjuster::for_paragraph(&ParagraphAttributes::default(), metrics, 4.0);
    assert_eq!(defaults.min_font_size(), 8.0);
    assert_eq!(defaults.step(), 2.0);

    let paragraph = ParagraphAttributes {
        min_font_size: Some(6.0),
        ..ParagraphAttributes::default()
    };
    let adjuster = FontFitAdjuster::for_paragraph(&paragraph, metrics, 4.0);
    assert_eq!(adjuster.min_font_size(), 12.0);
}

#[test]
fn create_layout_fits_when_requested() {
    let env = TestEnv::new();
    let text = AttributedString::new(vec![sized("aaaa bbbb cccc dddd", 16.0)]);
    let paragraph = ParagraphAttributes {
        max_lines: Some(1),
        adjust_font_size_to_fit: Some(true),
        ..ParagraphAttributes::default()
    };
    let handle = env.manager.create_layout(&text, &paragraph, 80.0, 0.0).unwrap();
    assert_eq!(handle.layout.line_count(), 1);
    assert_eq!(handle.text.largest_font_size(), Some(8.0));

    let unfitted = ParagraphAttributes {
        adjust_font_size_to_fit: None,
        ..paragraph
    };
    let handle = env.manager.create_layout(&text, &unfitted, 80.0, 0.0).unwrap();
    assert_eq!(handle.layout.line_count(), 2);
}

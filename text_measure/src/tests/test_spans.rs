// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use text_primitives::{Color, TextTransform};

use super::utils::{sized, TestEnv};
use crate::{
    AttachmentBox, DisplayMetrics, Fragment, LayoutConfig, PriorityOrder, SpanKind, StyledText,
    Tag, TextAttributes,
};

const RED: Color = Color(0xFFFF_0000);
const GREEN: Color = Color(0xFF00_FF00);
const BLUE: Color = Color(0xFF00_00FF);

fn kinds_and_priorities(text: &StyledText) -> Vec<(SpanKind, u32)> {
    text.spans()
        .iter()
        .map(|span| (span.attribute.clone(), span.priority))
        .collect()
}

#[test]
fn one_span_per_active_attribute() {
    let env = TestEnv::new();
    let styled = Fragment::new("ab").with_attributes(TextAttributes {
        color: Some(RED),
        underline: true,
        ..TextAttributes::default()
    });
    let text = env.flatten(&[styled, Fragment::new("cd").with_tag(Tag(5))]);

    assert_eq!(text.as_str(), "abcd");
    assert_eq!(
        kinds_and_priorities(&text),
        vec![
            (SpanKind::Color(RED), 0),
            (SpanKind::Size(14.0), 1),
            (SpanKind::Underline, 2),
            (SpanKind::Tag(Tag::NONE), 3),
            (SpanKind::Size(14.0), 4),
            (SpanKind::Tag(Tag(5)), 5),
        ]
    );
    assert_eq!(text.spans()[0].range, 0..2);
    assert_eq!(text.spans()[4].range, 2..4);
}

#[test]
fn reversed_priority_order() {
    let env = TestEnv::with_config(
        LayoutConfig::default().with_priority_order(PriorityOrder::Reversed),
    );
    let text = env.flatten(&[Fragment::new("ab"), Fragment::new("cd")]);
    let priorities: Vec<u32> = text.spans().iter().map(|span| span.priority).collect();
    assert_eq!(priorities, vec![3, 2, 1, 0]);
}

#[test]
fn empty_fragment_consumes_an_index() {
    let env = TestEnv::new();
    let text = env.flatten(&[Fragment::new(""), Fragment::new("a")]);
    assert_eq!(
        kinds_and_priorities(&text),
        vec![(SpanKind::Size(14.0), 1), (SpanKind::Tag(Tag::NONE), 2)]
    );
}

#[test]
fn attachment_gets_placeholder_and_no_styling() {
    let env = TestEnv::with_config(
        LayoutConfig::default().with_display(DisplayMetrics::new(2.0, 1.0)),
    );
    let text = env.flatten(&[
        Fragment::new("Hi "),
        Fragment::attachment(Tag(7), 20.5, 10.0),
    ]);

    assert_eq!(text.as_str(), "Hi 0");
    let attachments = text.attachments();
    assert_eq!(
        attachments,
        vec![(
            3..4,
            AttachmentBox {
                tag: Tag(7),
                width: 41.0,
                height: 20.0,
            }
        )]
    );
    assert!(
        text.spans()
            .iter()
            .filter(|span| span.range.end > 3)
            .all(|span| matches!(span.attribute, SpanKind::Attachment(_))),
        "attachments receive no styling spans"
    );
}

#[test]
fn text_transforms() {
    let env = TestEnv::new();
    let with_transform = |text: &str, transform| {
        Fragment::new(text).with_attributes(TextAttributes {
            text_transform: transform,
            ..TextAttributes::default()
        })
    };
    let text = env.flatten(&[
        with_transform("hello world ", TextTransform::Capitalize),
        with_transform("up ", TextTransform::Uppercase),
        with_transform("DOWN", TextTransform::Lowercase),
    ]);
    assert_eq!(text.as_str(), "Hello World UP down");
}

#[test]
fn opacity_multiplies_alpha() {
    let env = TestEnv::new();
    let text = env.flatten(&[Fragment::new("a").with_attributes(TextAttributes {
        color: Some(Color(0xFF11_2233)),
        opacity: Some(0.5),
        ..TextAttributes::default()
    })]);
    assert_eq!(text.spans()[0].attribute, SpanKind::Color(Color(0x8011_2233)));
}

#[test]
fn font_sizes_follow_scaling_preferences() {
    let env = TestEnv::with_config(
        LayoutConfig::default().with_display(DisplayMetrics::new(2.0, 1.5)),
    );
    let fixed = Fragment::new("b").with_attributes(TextAttributes {
        font_size: Some(10.0),
        allow_font_scaling: Some(false),
        ..TextAttributes::default()
    });
    let text = env.flatten(&[sized("a", 10.0), fixed]);
    let sizes: Vec<f32> = text.font_sizes().collect();
    assert_eq!(sizes, vec![30.0, 20.0]);
}

#[test]
fn composition_ignores_insertion_order() {
    let spans = [
        (0..4, SpanKind::Color(RED), 1),
        (2..6, SpanKind::Color(BLUE), 2),
        (0..6, SpanKind::Size(20.0), 0),
        (2..6, SpanKind::Color(GREEN), 2),
        (4..6, SpanKind::Underline, 2),
    ];
    let mut forward = StyledText::new("abcdef");
    for (range, kind, priority) in spans.iter().cloned() {
        forward.push_span(range, kind, priority).unwrap();
    }
    let mut backward = StyledText::new("abcdef");
    for (range, kind, priority) in spans.iter().rev().cloned() {
        backward.push_span(range, kind, priority).unwrap();
    }

    let runs = forward.compose_styles(14.0);
    assert_eq!(runs, backward.compose_styles(14.0));

    let colors: Vec<_> = runs.iter().map(|run| (run.range.clone(), run.style.color)).collect();
    // Equal priorities resolve by payload, so green wins over blue everywhere.
    assert_eq!(
        colors,
        vec![(0..2, Some(RED)), (2..4, Some(GREEN)), (4..6, Some(GREEN))]
    );
    assert!(runs.iter().all(|run| run.style.font_size == 20.0), "size applies everywhere");
    assert!(runs[2].style.underline, "underline covers the last run");
}

#[test]
fn scaling_starts_from_the_original_sizes() {
    let mut text = StyledText::new("abcd");
    text.push_span(0..2, SpanKind::Size(16.0), 0).unwrap();
    text.push_span(2..4, SpanKind::Size(10.0), 1).unwrap();

    let half = text.with_scaled_font_sizes(8.0, 16.0, 4.0);
    assert_eq!(half.font_sizes().collect::<Vec<_>>(), vec![8.0, 5.0]);
    let quarter = text.with_scaled_font_sizes(4.0, 16.0, 4.0);
    assert_eq!(quarter.font_sizes().collect::<Vec<_>>(), vec![4.0, 4.0]);
    // The source is untouched.
    assert_eq!(text.largest_font_size(), Some(16.0));
}

#[test]
fn scaling_the_reference_size_is_exact() {
    for reference in 5_u16..400 {
        let reference = f32::from(reference);
        let mut text = StyledText::new("a");
        text.push_span(0..1, SpanKind::Size(reference), 0).unwrap();
        for font_size in 1_u16..400 {
            let font_size = f32::from(font_size);
            if font_size >= reference {
                break;
            }
            let scaled = text.with_scaled_font_sizes(font_size, reference, 0.0);
            assert_eq!(
                scaled.largest_font_size(),
                Some(font_size),
                "{reference} scaled to {font_size}"
            );
        }
    }
}

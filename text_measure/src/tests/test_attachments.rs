// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use text_primitives::{EllipsizeMode, LayoutDirection};

use super::utils::{directed, TestEnv};
use crate::{
    AttachmentPosition, AttributedString, Fragment, MeasureMode, ParagraphAttributes, Tag,
};

fn hello_world() -> Vec<Fragment> {
    vec![
        Fragment::new("Hello "),
        Fragment::attachment(Tag(3), 20.0, 10.0),
        Fragment::new("World"),
    ]
}

#[test]
fn attachment_between_words() {
    let env = TestEnv::new();
    let measurement = env.measure(
        hello_world(),
        &ParagraphAttributes::default(),
        100.0,
        MeasureMode::Exactly,
    );

    assert_eq!(measurement.size.width, 100.0);
    assert_eq!(measurement.size.height, 17.0);
    assert_eq!(
        measurement.attachments,
        vec![AttachmentPosition {
            tag: Tag(3),
            x: 42.0,
            y: 3.0,
        }]
    );

    // Bottom-aligned to the baseline.
    let handle = env
        .manager
        .create_layout(
            &AttributedString::new(hello_world()),
            &ParagraphAttributes::default(),
            100.0,
            0.0,
        )
        .unwrap();
    assert_eq!(handle.text.as_str(), "Hello 0World");
    let baseline = handle.layout.get(0).unwrap().metrics().baseline;
    assert_eq!(measurement.attachments[0].y, baseline - 10.0);
}

#[test]
fn trailing_attachment_uses_line_end() {
    let env = TestEnv::new();
    let measurement = env.measure(
        vec![Fragment::new("Hi "), Fragment::attachment(Tag(1), 20.0, 10.0)],
        &ParagraphAttributes::default(),
        0.0,
        MeasureMode::Undefined,
    );
    assert_eq!(measurement.size.width, 41.0);
    assert_eq!(measurement.attachments.len(), 1);
    assert_eq!(measurement.attachments[0].x, 21.0);
}

#[test]
fn ellipsized_attachment_is_skipped() {
    let env = TestEnv::new();
    let fragments = || {
        vec![
            Fragment::new("aa"),
            Fragment::attachment(Tag(2), 20.0, 10.0),
            Fragment::new("aa bbb"),
        ]
    };
    let tail = ParagraphAttributes {
        max_lines: Some(1),
        ellipsize_mode: EllipsizeMode::Tail,
        ..ParagraphAttributes::default()
    };
    let measurement = env.measure(fragments(), &tail, 40.0, MeasureMode::AtMost);
    assert!(measurement.attachments.is_empty(), "attachment is elided");

    let clip = ParagraphAttributes {
        ellipsize_mode: EllipsizeMode::Clip,
        ..tail
    };
    let measurement = env.measure(fragments(), &clip, 40.0, MeasureMode::AtMost);
    assert_eq!(
        measurement.attachments,
        vec![AttachmentPosition {
            tag: Tag(2),
            x: 14.0,
            y: 3.0,
        }]
    );
}

#[test]
fn attachment_on_hidden_line_is_skipped() {
    let env = TestEnv::new();
    let fragments = || {
        vec![
            Fragment::new("aaa "),
            Fragment::attachment(Tag(4), 20.0, 10.0),
            Fragment::new(" bbb ccc"),
        ]
    };
    let limited = ParagraphAttributes {
        max_lines: Some(1),
        ellipsize_mode: EllipsizeMode::Clip,
        ..ParagraphAttributes::default()
    };
    let measurement = env.measure(fragments(), &limited, 30.0, MeasureMode::AtMost);
    assert!(measurement.attachments.is_empty(), "second line is hidden");

    let measurement = env.measure(
        fragments(),
        &ParagraphAttributes::default(),
        30.0,
        MeasureMode::AtMost,
    );
    assert_eq!(
        measurement.attachments,
        vec![AttachmentPosition {
            tag: Tag(4),
            x: 0.0,
            y: 17.0,
        }]
    );
}

#[test]
fn trailing_attachment_on_hidden_line_moves_to_last_shown_line() {
    let env = TestEnv::new();
    let paragraph = ParagraphAttributes {
        max_lines: Some(1),
        ellipsize_mode: EllipsizeMode::Clip,
        ..ParagraphAttributes::default()
    };
    let measurement = env.measure(
        vec![Fragment::new("aaa bbb "), Fragment::attachment(Tag(6), 20.0, 10.0)],
        &paragraph,
        30.0,
        MeasureMode::AtMost,
    );
    assert_eq!(measurement.size.height, 16.0);
    assert_eq!(
        measurement.attachments,
        vec![AttachmentPosition {
            tag: Tag(6),
            x: 1.0,
            y: 3.0,
        }]
    );
    assert!(
        measurement.attachments[0].y < measurement.size.height,
        "attachment stays inside the measured box"
    );
}

#[test]
fn every_visible_attachment_is_reported() {
    let env = TestEnv::new();
    let fragments: Vec<Fragment> = (0..5)
        .flat_map(|i| {
            [
                Fragment::new("word "),
                Fragment::attachment(Tag(i), 10.0, 10.0),
            ]
        })
        .collect();
    let measurement = env.measure(
        fragments,
        &ParagraphAttributes::default(),
        60.0,
        MeasureMode::AtMost,
    );
    let tags: Vec<Tag> = measurement.attachments.iter().map(|a| a.tag).collect();
    assert_eq!(tags, (0..5).map(Tag).collect::<Vec<_>>());
}

#[test]
fn left_to_right_attachment_in_right_to_left_paragraph() {
    let env = TestEnv::new();
    let measurement = env.measure(
        vec![
            directed("\u{05E9}\u{05DC} ", LayoutDirection::Rtl, None),
            Fragment::attachment(Tag(9), 20.0, 10.0),
            Fragment::new("\u{05D5}\u{05DD}"),
        ],
        &ParagraphAttributes::default(),
        100.0,
        MeasureMode::Exactly,
    );
    assert_eq!(
        measurement.attachments,
        vec![AttachmentPosition {
            tag: Tag(9),
            x: 59.0,
            y: 3.0,
        }]
    );
}

#[test]
fn positions_are_density_independent() {
    let env = TestEnv::with_config(
        crate::LayoutConfig::default().with_display(crate::DisplayMetrics::new(2.0, 1.0)),
    );
    let measurement = env.measure(
        hello_world(),
        &ParagraphAttributes::default(),
        100.0,
        MeasureMode::Exactly,
    );
    // Same geometry as at density 1: every length doubles in pixels.
    assert_eq!(measurement.attachments[0].x, 42.0);
    assert_eq!(measurement.size.width, 100.0);
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use text_primitives::{LayoutDirection, TextAlign};
use unicode_bidi::{bidi_class, BidiClass};

use super::{Direction, Layout};
use crate::model::Fragment;

/// Alignment of lines relative to the paragraph direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Align to the start edge of the paragraph direction.
    #[default]
    Normal,
    /// Align to the end edge of the paragraph direction.
    Opposite,
    /// Center each line.
    Center,
}

/// Physical horizontal placement corresponding to an [`Alignment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gravity {
    /// Content hugs the left edge.
    Left,
    /// Content hugs the right edge.
    Right,
    /// Content is centered.
    CenterHorizontal,
}

/// Direction of the first strong character of `text`, defaulting to left-to-right.
pub fn script_direction(text: &str) -> Direction {
    for c in text.chars() {
        match bidi_class(c) {
            BidiClass::L => return Direction::Ltr,
            BidiClass::R | BidiClass::AL => return Direction::Rtl,
            _ => {}
        }
    }
    Direction::Ltr
}

/// Resolves the alignment of a paragraph from its first fragment.
///
/// Lines are laid out in the script direction of `text`. When the declared paragraph
/// direction disagrees with it, normal and opposite swap so that the result still honours
/// the declared direction. `left` and `right` are relative to the declared direction.
pub fn resolve_alignment(fragments: &[Fragment], text: &str) -> Alignment {
    let Some(first) = fragments.first() else {
        return Alignment::Normal;
    };
    let attributes = &first.attributes;
    let paragraph_rtl = attributes.layout_direction == Some(LayoutDirection::Rtl);
    let script_rtl = script_direction(text).is_rtl();
    let swap = paragraph_rtl != script_rtl;
    let (normal, opposite) = if swap {
        (Alignment::Opposite, Alignment::Normal)
    } else {
        (Alignment::Normal, Alignment::Opposite)
    };
    match attributes.alignment {
        Some(TextAlign::Center) => Alignment::Center,
        Some(TextAlign::Right) => opposite,
        Some(TextAlign::Left) | Some(TextAlign::Natural) | Some(TextAlign::Justified) | None => {
            normal
        }
    }
}

/// Maps a resolved alignment to a physical gravity for text in `script_direction`.
pub fn resolve_gravity(alignment: Alignment, script_direction: Direction) -> Gravity {
    match (alignment, script_direction.is_rtl()) {
        (Alignment::Normal, false) | (Alignment::Opposite, true) => Gravity::Left,
        (Alignment::Normal, true) | (Alignment::Opposite, false) => Gravity::Right,
        (Alignment::Center, _) => Gravity::CenterHorizontal,
    }
}

pub(crate) fn align(layout: &mut Layout) {
    let is_rtl = layout.direction.is_rtl();
    for line in &mut layout.lines {
        let metrics = &mut line.metrics;
        metrics.offset = 0.0;

        // Compute free space.
        let free_space = layout.width - metrics.advance + metrics.trailing_whitespace;
        if free_space > 0.0 {
            match (layout.alignment, is_rtl) {
                (Alignment::Normal, false) | (Alignment::Opposite, true) => {}
                (Alignment::Normal, true) | (Alignment::Opposite, false) => {
                    metrics.offset = free_space;
                }
                (Alignment::Center, _) => metrics.offset = free_space * 0.5,
            }
        }

        if is_rtl {
            // Trailing whitespace of a right-to-left line sits on the left; hang it.
            metrics.offset -= metrics.trailing_whitespace;
        }
    }
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placing inline attachments within a laid out text.

use crate::layout::Layout;
use crate::model::Tag;
use crate::spans::StyledText;
use crate::units::DisplayMetrics;

/// Top-left corner of an attachment, in density-independent points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttachmentPosition {
    /// Node the attachment belongs to.
    pub tag: Tag,
    /// Distance from the left edge of the text.
    pub x: f32,
    /// Distance from the top of the text.
    pub y: f32,
}

/// Positions the attachments of `text` within `layout`, in buffer order.
///
/// `layout_width` is the measured width of the text in pixels. Attachments on lines
/// hidden by the line limit, or inside the elided part of an ellipsized line, are
/// skipped unless they are the last character of the text. A last-character attachment
/// on a hidden line is placed at the end of the last shown line.
pub fn position_attachments(
    layout: &Layout,
    text: &StyledText,
    layout_width: f32,
    metrics: DisplayMetrics,
) -> Vec<AttachmentPosition> {
    let visible = layout.rendered_line_count();
    let paragraph_rtl = layout.direction().is_rtl();
    let mut positions = Vec::new();

    for (range, attachment) in text.attachments() {
        let start = range.start;
        let is_last = range.end == text.len();
        let mut line_index = layout.line_for_offset(start);
        if line_index >= visible {
            if !is_last {
                tracing::trace!(start, line = line_index, "attachment on a hidden line");
                continue;
            }
            line_index = visible.saturating_sub(1);
        }
        let Some(line) = layout.get(line_index) else {
            continue;
        };
        let line_range = line.text_range();
        let elided = line
            .ellipsis()
            .is_some_and(|ellipsis| ellipsis.count > 0 && start >= line_range.start + ellipsis.start);
        if elided && start < line_range.end {
            tracing::trace!(start, line = line_index, "attachment elided by ellipsis");
            continue;
        }

        let is_rtl_char = layout.is_rtl_char_at(start);
        let x = if is_last {
            let line_width = if line.ends_with_newline() {
                line.max()
            } else {
                line.width()
            };
            if paragraph_rtl {
                layout_width - line_width
            } else {
                line.right() - attachment.width
            }
        } else {
            let mut x = if paragraph_rtl == is_rtl_char {
                layout.primary_horizontal(start)
            } else {
                layout.secondary_horizontal(start)
            };
            if paragraph_rtl && !is_rtl_char {
                x = layout_width - (line.right() - x);
            }
            if is_rtl_char {
                x -= attachment.width;
            }
            x
        };
        let y = line.metrics().baseline - attachment.height;

        positions.push(AttachmentPosition {
            tag: attachment.tag,
            x: metrics.px_to_dip(x),
            y: metrics.px_to_dip(y),
        });
    }
    positions
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use text_primitives::{BreakStrategy, EllipsizeMode, HyphenationFrequency};

use super::{script_direction, Alignment, Layout};
use crate::backend::{LineBreakRequest, TextBackend};
use crate::error::SoftInvariantViolation;
use crate::spans::StyledText;
use crate::units::{MeasureMode, Size};

/// Constraints and paragraph options for building a [`Layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutRequest {
    /// Available width in pixels.
    pub width: f32,
    /// How `width` constrains the layout.
    pub width_mode: MeasureMode,
    /// Extend the first and last lines to the font's full extent.
    pub include_font_padding: bool,
    /// Wrapping strategy.
    pub break_strategy: BreakStrategy,
    /// Hyphenation at intra-word breaks.
    pub hyphenation: HyphenationFrequency,
    /// Line alignment.
    pub alignment: Alignment,
    /// Number of lines shown, if limited.
    pub max_lines: Option<u32>,
    /// Where text hidden by `max_lines` is elided.
    pub ellipsize: EllipsizeMode,
}

impl Default for LayoutRequest {
    fn default() -> Self {
        Self {
            width: 0.0,
            width_mode: MeasureMode::Undefined,
            include_font_padding: true,
            break_strategy: BreakStrategy::default(),
            hyphenation: HyphenationFrequency::default(),
            alignment: Alignment::Normal,
            max_lines: None,
            ellipsize: EllipsizeMode::default(),
        }
    }
}

/// Lays out `text` for `request`.
///
/// Three cases are distinguished:
///
/// - Text that needs wrapping support but fits (or has no width limit) is laid out at
///   its natural width rounded up, or at exactly `width` when the width mode is exact.
/// - Boring text that fits (or has no width limit) is laid out on a single line at its
///   natural width, or at exactly `width`.
/// - Everything else is wrapped at `width` rounded up.
pub fn build<B: TextBackend + ?Sized>(
    backend: &B,
    text: &StyledText,
    request: &LayoutRequest,
) -> Layout {
    let width = request.width;
    let unconstrained =
        request.width_mode == MeasureMode::Undefined || !width.is_finite() || width < 0.0;
    let exact = request.width_mode == MeasureMode::Exactly && !unconstrained;
    let boring = backend.is_boring(text);

    let mut line_request = LineBreakRequest {
        width: width.ceil(),
        direction: script_direction(text.as_str()),
        alignment: request.alignment,
        include_font_padding: request.include_font_padding,
        break_strategy: request.break_strategy,
        hyphenation: request.hyphenation,
        max_lines: request.max_lines,
        ellipsize: request.ellipsize,
        boring: None,
    };
    let mut violation = None;

    match boring {
        None => {
            let desired = backend.measure_natural_width(text);
            if unconstrained || desired <= width {
                tracing::trace!(desired, "laying out unwrapped text at its natural width");
                line_request.width = if exact { width } else { desired }.ceil();
            } else {
                tracing::trace!(width, "wrapping text");
            }
        }
        Some(metrics) if unconstrained || metrics.width <= width => {
            tracing::trace!(natural = metrics.width, "laying out boring text");
            let natural = if metrics.width.is_finite() && metrics.width >= 0.0 {
                metrics.width.ceil()
            } else {
                violation = Some(
                    SoftInvariantViolation::InvalidTextWidth {
                        reported: metrics.width,
                    }
                    .report(),
                );
                0.0
            };
            line_request.width = if exact { width.ceil() } else { natural };
            line_request.boring = Some(metrics);
        }
        Some(_) => {
            tracing::trace!(width, "wrapping boring text");
        }
    }

    let mut layout = backend.break_into_lines(text, &line_request);
    if let Some(violation) = violation {
        layout.push_diagnostic(violation);
    }
    layout
}

/// Computes the size of `layout` under the given constraints.
///
/// Only lines shown after the line limit count towards the size. Dimensions are in
/// pixels.
pub fn measured_size(
    layout: &Layout,
    width: f32,
    width_mode: MeasureMode,
    height: f32,
    height_mode: MeasureMode,
) -> Size {
    let visible = layout.rendered_line_count();

    let measured_width = if width_mode == MeasureMode::Exactly {
        width
    } else {
        let widest = layout
            .lines()
            .take(visible)
            .map(|line| {
                if line.ends_with_newline() {
                    line.max()
                } else {
                    line.width()
                }
            })
            .fold(0.0_f32, f32::max);
        if width_mode == MeasureMode::AtMost && widest > width {
            width
        } else {
            widest
        }
    };

    let measured_height = if height_mode == MeasureMode::Exactly {
        height
    } else {
        let bottom = visible
            .checked_sub(1)
            .and_then(|last| layout.get(last))
            .map_or(0.0, |line| line.metrics().max_coord);
        if height_mode == MeasureMode::AtMost && bottom > height {
            height
        } else {
            bottom
        }
    };

    Size::new(measured_width.ceil(), measured_height)
}

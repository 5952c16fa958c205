// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shrinking font sizes until text fits its line and height budget.

use crate::backend::TextBackend;
use crate::layout::{build, Layout, LayoutRequest};
use crate::model::ParagraphAttributes;
use crate::spans::StyledText;
use crate::units::{DisplayMetrics, MeasureMode};

/// The result of [`FontFitAdjuster::fit`].
#[derive(Clone, Debug)]
pub struct FitOutcome {
    /// The text with its final font sizes.
    pub text: StyledText,
    /// The layout of [`FitOutcome::text`].
    pub layout: Layout,
    /// Number of times the font size was reduced.
    pub iterations: u32,
    /// Largest font size before fitting, in pixels.
    pub initial_font_size: f32,
    /// Largest font size after fitting, in pixels.
    pub final_font_size: f32,
}

/// Reduces every font size of a text proportionally until its layout fits.
///
/// Each step lowers the largest size by `step` pixels and rescales every size span of the
/// original text by the same ratio, so repeated steps never compound rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontFitAdjuster {
    min_font_size: f32,
    max_font_size: Option<f32>,
    step: f32,
}

impl FontFitAdjuster {
    /// Creates an adjuster that never goes below `min_font_size` pixels and shrinks by
    /// `step` pixels at a time (at least 1).
    pub fn new(min_font_size: f32, step: f32) -> Self {
        Self {
            min_font_size,
            max_font_size: None,
            step: step.max(1.0),
        }
    }

    /// Creates an adjuster from a paragraph's limits.
    ///
    /// Without a paragraph minimum, `default_min_dp` density-independent points are used.
    /// The step is one density-independent point.
    pub fn for_paragraph(
        paragraph: &ParagraphAttributes,
        metrics: DisplayMetrics,
        default_min_dp: f32,
    ) -> Self {
        let min_font_size = match paragraph.min_font_size {
            Some(min) => metrics.sp_to_px(min).trunc(),
            None => metrics.dip_to_px(default_min_dp).trunc(),
        };
        let mut adjuster = Self::new(min_font_size, metrics.dip_to_px(1.0).trunc());
        adjuster.max_font_size = paragraph.max_font_size.map(|max| metrics.sp_to_px(max));
        adjuster
    }

    /// Caps the starting font size.
    #[must_use]
    pub fn with_max_font_size(mut self, max_font_size: Option<f32>) -> Self {
        self.max_font_size = max_font_size;
        self
    }

    /// The smallest font size, in pixels.
    pub fn min_font_size(&self) -> f32 {
        self.min_font_size
    }

    /// How many pixels each step removes.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Lays out `text`, shrinking it while it has more lines than the request's line
    /// limit, or is taller than `height` when `height_mode` constrains it.
    pub fn fit<B: TextBackend + ?Sized>(
        &self,
        backend: &B,
        text: &StyledText,
        request: &LayoutRequest,
        height: f32,
        height_mode: MeasureMode,
    ) -> FitOutcome {
        let min = self.min_font_size;
        let initial = text
            .largest_font_size()
            .map_or(min, |largest| largest.max(min));
        let mut current = initial;
        let mut scaled = text.clone();
        if let Some(max) = self.max_font_size.filter(|max| *max < initial) {
            current = max.max(min);
            scaled = text.with_scaled_font_sizes(current, initial, min);
        }

        let mut layout = build(backend, &scaled, request);
        let mut iterations = 0;
        while current > min && overflows(&layout, request.max_lines, height, height_mode) {
            current = (current - self.step).max(min);
            let next = text.with_scaled_font_sizes(current, initial, min);
            iterations += 1;
            // Flooring can map consecutive steps to the same sizes.
            if next.font_sizes().eq(scaled.font_sizes()) {
                tracing::trace!(font_size = current, "font sizes unchanged, skipping layout");
                continue;
            }
            scaled = next;
            layout = build(backend, &scaled, request);
            tracing::debug!(
                iteration = iterations,
                font_size = current,
                lines = layout.line_count(),
                height = layout.height(),
                "shrunk text to fit"
            );
        }

        FitOutcome {
            final_font_size: scaled.largest_font_size().unwrap_or(current),
            text: scaled,
            layout,
            iterations,
            initial_font_size: initial,
        }
    }
}

fn overflows(layout: &Layout, max_lines: Option<u32>, height: f32, height_mode: MeasureMode) -> bool {
    let too_many_lines = max_lines
        .filter(|max| *max > 0)
        .is_some_and(|max| layout.line_count() > max as usize);
    too_many_lines || (height_mode != MeasureMode::Undefined && layout.height() > height)
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use super::{BreakReason, ClusterData, Ellipsis, Layout, LineData};

/// Metrics information for a line.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct LineMetrics {
    /// Distance from the baseline to the top of the tallest glyph box.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the deepest glyph box.
    pub descent: f32,
    /// Offset to the baseline.
    pub baseline: f32,
    /// Offset for alignment.
    pub offset: f32,
    /// Full advance of the line, including trailing whitespace.
    pub advance: f32,
    /// Advance of trailing whitespace.
    pub trailing_whitespace: f32,
    /// Top of the line.
    pub min_coord: f32,
    /// Bottom of the line.
    pub max_coord: f32,
    /// Height of capital letters above the baseline.
    pub cap_height: f32,
    /// Height of lowercase letters above the baseline.
    pub x_height: f32,
}

impl LineMetrics {
    /// Returns the height of the line.
    pub fn size(&self) -> f32 {
        self.max_coord - self.min_coord
    }
}

/// A line of a [`Layout`].
#[derive(Copy, Clone, Debug)]
pub struct Line<'a> {
    pub(crate) layout: &'a Layout,
    pub(crate) index: usize,
    pub(crate) data: &'a LineData,
}

impl<'a> Line<'a> {
    /// Returns the index of the line.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the metrics for the line.
    pub fn metrics(&self) -> &'a LineMetrics {
        &self.data.metrics
    }

    /// Returns why the line ended.
    pub fn break_reason(&self) -> BreakReason {
        self.data.break_reason
    }

    /// Returns the range of text for the line.
    pub fn text_range(&self) -> Range<usize> {
        self.data.text_range.clone()
    }

    /// Returns the text of the line.
    pub fn text(&self) -> &'a str {
        &self.layout.text[self.data.text_range.clone()]
    }

    /// Returns the clusters of the line in logical order.
    pub fn clusters(&self) -> &'a [ClusterData] {
        &self.layout.clusters[self.data.cluster_range.clone()]
    }

    /// Width of the visible content, excluding trailing whitespace.
    pub fn width(&self) -> f32 {
        self.data.metrics.advance - self.data.metrics.trailing_whitespace
    }

    /// Width of the line including trailing whitespace.
    pub fn max(&self) -> f32 {
        self.data.metrics.advance
    }

    /// Left edge of the visible content.
    pub fn left(&self) -> f32 {
        let metrics = &self.data.metrics;
        if self.layout.direction.is_rtl() {
            metrics.offset + metrics.trailing_whitespace
        } else {
            metrics.offset
        }
    }

    /// Right edge of the visible content.
    pub fn right(&self) -> f32 {
        self.left() + self.width()
    }

    /// Returns `true` if the line ends with a hard line break.
    pub fn ends_with_newline(&self) -> bool {
        self.data.break_reason == BreakReason::Explicit
    }

    /// Returns the elided region of the line, if any.
    pub fn ellipsis(&self) -> Option<Ellipsis> {
        self.data.ellipsis
    }

    /// Returns `true` if a hyphen was inserted at the end of the line.
    pub fn is_hyphenated(&self) -> bool {
        self.data.hyphenated
    }
}

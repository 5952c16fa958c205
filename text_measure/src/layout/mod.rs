// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Laid out text: lines, clusters and the queries measurement needs.

pub(crate) mod alignment;
mod line;
pub(crate) mod strategy;

use core::ops::Range;
use std::sync::Arc;

pub use alignment::{resolve_alignment, resolve_gravity, script_direction, Alignment, Gravity};
pub use line::{Line, LineMetrics};
pub use strategy::{build, measured_size, LayoutRequest};

use crate::error::SoftInvariantViolation;

/// Base direction of a paragraph or a single character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl Direction {
    /// Returns `true` for right-to-left.
    pub fn is_rtl(self) -> bool {
        self == Self::Rtl
    }
}

/// Why a line ended where it did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BreakReason {
    /// The text ended.
    #[default]
    None,
    /// The line was wrapped at a break opportunity.
    Regular,
    /// The line ended with a hard line break.
    Explicit,
    /// The line was wrapped inside a word because nothing else fit.
    Emergency,
}

/// A region of a line replaced by an ellipsis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ellipsis {
    /// Start of the elided text, in bytes from the start of the line.
    pub start: usize,
    /// Length of the elided text in bytes.
    pub count: usize,
}

/// A single character (or attachment) positioned on a line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusterData {
    /// Byte range of the cluster in the buffer.
    pub text_range: Range<usize>,
    /// Visual offset of the cluster's left edge from the start of the line, before
    /// alignment is applied.
    pub x: f32,
    /// Horizontal advance.
    pub advance: f32,
    /// Whether the cluster resolved to a right-to-left embedding level.
    pub is_rtl: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct LineData {
    pub(crate) text_range: Range<usize>,
    pub(crate) cluster_range: Range<usize>,
    pub(crate) metrics: LineMetrics,
    pub(crate) break_reason: BreakReason,
    pub(crate) ellipsis: Option<Ellipsis>,
    pub(crate) hyphenated: bool,
}

/// Text broken into lines and positioned within a width.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub(crate) text: Arc<str>,
    pub(crate) width: f32,
    pub(crate) direction: Direction,
    pub(crate) alignment: Alignment,
    pub(crate) max_lines: Option<u32>,
    pub(crate) lines: Vec<LineData>,
    pub(crate) clusters: Vec<ClusterData>,
    pub(crate) diagnostics: Vec<SoftInvariantViolation>,
}

impl Layout {
    /// The laid out text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The width lines were broken and aligned against.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// The full height of every line, including those hidden by a line limit.
    pub fn height(&self) -> f32 {
        self.lines.last().map_or(0.0, |line| line.metrics.max_coord)
    }

    /// The paragraph direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The alignment lines were positioned with.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// The line limit the layout was built with.
    pub fn max_lines(&self) -> Option<u32> {
        self.max_lines
    }

    /// Number of lines, including those hidden by a line limit.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of lines shown once the line limit is applied.
    ///
    /// A limit of zero shows every line.
    pub fn rendered_line_count(&self) -> usize {
        match self.max_lines.filter(|max| *max > 0) {
            Some(max) => self.lines.len().min(max as usize),
            None => self.lines.len(),
        }
    }

    /// Returns the line at `index`.
    pub fn get(&self, index: usize) -> Option<Line<'_>> {
        Some(Line {
            layout: self,
            index,
            data: self.lines.get(index)?,
        })
    }

    /// Iterates over every line.
    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> + '_ + Clone {
        self.lines
            .iter()
            .enumerate()
            .map(move |(index, data)| Line {
                layout: self,
                index,
                data,
            })
    }

    /// Conditions noticed while building this layout.
    pub fn diagnostics(&self) -> &[SoftInvariantViolation] {
        &self.diagnostics
    }

    pub(crate) fn push_diagnostic(&mut self, violation: SoftInvariantViolation) {
        self.diagnostics.push(violation);
    }

    /// Index of the line containing byte `offset`. Offsets past the end map to the last line.
    pub fn line_for_offset(&self, offset: usize) -> usize {
        self.lines
            .partition_point(|line| line.text_range.start <= offset)
            .saturating_sub(1)
    }

    fn cluster_at(&self, offset: usize) -> Option<(usize, &ClusterData)> {
        let index = self
            .clusters
            .partition_point(|cluster| cluster.text_range.end <= offset);
        self.clusters
            .get(index)
            .filter(|cluster| cluster.text_range.contains(&offset))
            .map(|cluster| (index, cluster))
    }

    /// Returns `true` if the character at byte `offset` is laid out right-to-left.
    pub fn is_rtl_char_at(&self, offset: usize) -> bool {
        match self.cluster_at(offset) {
            Some((_, cluster)) => cluster.is_rtl,
            None => self.direction.is_rtl(),
        }
    }

    /// Caret position of `offset` for an insertion in the paragraph direction.
    pub fn primary_horizontal(&self, offset: usize) -> f32 {
        self.horizontal(offset, true)
    }

    /// Caret position of `offset` for an insertion in the character's own direction.
    pub fn secondary_horizontal(&self, offset: usize) -> f32 {
        self.horizontal(offset, false)
    }

    fn horizontal(&self, offset: usize, primary: bool) -> f32 {
        let Some(line) = self.get(self.line_for_offset(offset)) else {
            return 0.0;
        };
        let paragraph_rtl = self.direction.is_rtl();
        let line_end_edge = if paragraph_rtl {
            line.left()
        } else {
            line.right()
        };
        let Some((index, cluster)) = self
            .cluster_at(offset)
            .filter(|(index, _)| line.data.cluster_range.contains(index))
        else {
            return line_end_edge;
        };
        let origin = line.data.metrics.offset;
        if !primary || cluster.is_rtl == paragraph_rtl {
            // Leading edge in the character's own direction.
            return origin + cluster.x + if cluster.is_rtl { cluster.advance } else { 0.0 };
        }
        // Direction boundary: the caret sticks to the preceding character.
        if index > line.data.cluster_range.start {
            let previous = &self.clusters[index - 1];
            origin + previous.x + if previous.is_rtl { 0.0 } else { previous.advance }
        } else if paragraph_rtl {
            line.right()
        } else {
            line.left()
        }
    }
}

/// Assembles a [`Layout`] line by line.
///
/// Backends push lines in order; [`LayoutBuilder::finish`] applies alignment.
#[derive(Debug)]
pub struct LayoutBuilder {
    layout: Layout,
}

impl LayoutBuilder {
    /// Starts a layout of `text` broken against `width`.
    pub fn new(
        text: Arc<str>,
        width: f32,
        direction: Direction,
        alignment: Alignment,
        max_lines: Option<u32>,
    ) -> Self {
        Self {
            layout: Layout {
                text,
                width,
                direction,
                alignment,
                max_lines: max_lines.filter(|max| *max > 0),
                lines: Vec::new(),
                clusters: Vec::new(),
                diagnostics: Vec::new(),
            },
        }
    }

    /// Appends a line.
    ///
    /// `clusters` must be in logical order and cover `text_range`. The `offset` of `metrics`
    /// is computed by alignment and ignored here.
    pub fn push_line(
        &mut self,
        text_range: Range<usize>,
        metrics: LineMetrics,
        break_reason: BreakReason,
        clusters: impl IntoIterator<Item = ClusterData>,
        ellipsis: Option<Ellipsis>,
        hyphenated: bool,
    ) {
        let start = self.layout.clusters.len();
        self.layout.clusters.extend(clusters);
        let end = self.layout.clusters.len();
        self.layout.lines.push(LineData {
            text_range,
            cluster_range: start..end,
            metrics,
            break_reason,
            ellipsis,
            hyphenated,
        });
    }

    /// Positions every line and returns the layout.
    pub fn finish(mut self) -> Layout {
        alignment::align(&mut self.layout);
        self.layout
    }
}

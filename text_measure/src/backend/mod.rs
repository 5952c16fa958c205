// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shaping capability layout is built on.

mod simple;

use core::fmt;

use text_primitives::{BreakStrategy, EllipsizeMode, HyphenationFrequency};

pub use simple::{SimpleBackend, SimpleMetrics};

use crate::layout::{Alignment, Direction, Layout};
use crate::spans::StyledText;

/// Metrics of text that fits on a single line without bidirectional reordering.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoringMetrics {
    /// Natural width of the whole text.
    pub width: f32,
    /// Largest ascent.
    pub ascent: f32,
    /// Largest descent.
    pub descent: f32,
}

/// Everything a backend needs to break text into lines.
#[derive(Clone, Debug, PartialEq)]
pub struct LineBreakRequest {
    /// Width lines are broken and aligned against, in pixels.
    pub width: f32,
    /// Paragraph direction.
    pub direction: Direction,
    /// Line alignment.
    pub alignment: Alignment,
    /// Extend the first and last lines to the font's full extent.
    pub include_font_padding: bool,
    /// Wrapping strategy.
    pub break_strategy: BreakStrategy,
    /// Hyphenation at intra-word breaks.
    pub hyphenation: HyphenationFrequency,
    /// Line limit used for ellipsizing.
    pub max_lines: Option<u32>,
    /// Where truncated text is elided.
    pub ellipsize: EllipsizeMode,
    /// Set when the text was classified as boring; lay it out on one line.
    pub boring: Option<BoringMetrics>,
}

/// Measures and breaks styled text.
///
/// Implementations must be deterministic: the same text and request always produce the
/// same layout.
pub trait TextBackend: fmt::Debug + Send + Sync {
    /// Returns single-line metrics if `text` needs neither wrapping at hard breaks nor
    /// bidirectional reordering.
    fn is_boring(&self, text: &StyledText) -> Option<BoringMetrics>;

    /// Returns the width of the widest paragraph of `text` without soft wrapping.
    fn measure_natural_width(&self, text: &StyledText) -> f32;

    /// Breaks `text` into lines.
    fn break_into_lines(&self, text: &StyledText, request: &LineBreakRequest) -> Layout;
}

impl<T: TextBackend + ?Sized> TextBackend for &T {
    fn is_boring(&self, text: &StyledText) -> Option<BoringMetrics> {
        (**self).is_boring(text)
    }

    fn measure_natural_width(&self, text: &StyledText) -> f32 {
        (**self).measure_natural_width(text)
    }

    fn break_into_lines(&self, text: &StyledText, request: &LineBreakRequest) -> Layout {
        (**self).break_into_lines(text, request)
    }
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deterministic backend with synthetic font metrics.
//!
//! Every character advances by a fixed fraction of its font size, so layouts can be
//! reasoned about exactly. Break opportunities follow UAX #14 and visual order follows
//! UAX #9; only glyph shapes are synthetic.

use core::ops::Range;

use icu_segmenter::options::LineBreakOptions;
use icu_segmenter::LineSegmenter;
use smallvec::SmallVec;
use text_primitives::{BreakStrategy, EllipsizeMode, HyphenationFrequency};
use unicode_bidi::{bidi_class, BidiClass, BidiInfo, Level};

use super::{BoringMetrics, LineBreakRequest, TextBackend};
use crate::layout::{
    BreakReason, ClusterData, Direction, Ellipsis, Layout, LayoutBuilder, LineMetrics,
};
use crate::spans::StyledText;

/// Font metrics of [`SimpleBackend`], as fractions of the font size.
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleMetrics {
    /// Advance of ordinary characters.
    pub advance: f32,
    /// Advance of East Asian wide characters and emoji.
    pub wide_advance: f32,
    /// A tab advances this many ordinary characters.
    pub tab_width: f32,
    /// Ascent above the baseline.
    pub ascent: f32,
    /// Descent below the baseline.
    pub descent: f32,
    /// Top of the font's bounding box, used for font padding.
    pub top: f32,
    /// Bottom of the font's bounding box, used for font padding.
    pub bottom: f32,
    /// Height of capital letters.
    pub cap_height: f32,
    /// Height of lowercase letters.
    pub x_height: f32,
    /// Character drawn in place of elided text.
    pub ellipsis: char,
    /// Character appended to hyphenated lines.
    pub hyphen: char,
}

impl Default for SimpleMetrics {
    fn default() -> Self {
        Self {
            advance: 0.5,
            wide_advance: 1.0,
            tab_width: 4.0,
            ascent: 0.8,
            descent: 0.2,
            top: 0.95,
            bottom: 0.25,
            cap_height: 0.7,
            x_height: 0.5,
            ellipsis: '\u{2026}',
            hyphen: '-',
        }
    }
}

/// The reference [`TextBackend`].
#[derive(Clone, Debug)]
pub struct SimpleBackend {
    metrics: SimpleMetrics,
    default_font_size: f32,
}

impl Default for SimpleBackend {
    fn default() -> Self {
        Self::new(SimpleMetrics::default())
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Extents {
    ascent: f32,
    descent: f32,
    top: f32,
    bottom: f32,
    cap_height: f32,
    x_height: f32,
}

impl Extents {
    fn max(self, other: Self) -> Self {
        Self {
            ascent: self.ascent.max(other.ascent),
            descent: self.descent.max(other.descent),
            top: self.top.max(other.top),
            bottom: self.bottom.max(other.bottom),
            cap_height: self.cap_height.max(other.cap_height),
            x_height: self.x_height.max(other.x_height),
        }
    }
}

#[derive(Clone, Debug)]
struct Glyph {
    range: Range<usize>,
    advance: f32,
    extents: Extents,
    font_size: f32,
    line_height: Option<f32>,
    whitespace: bool,
    hard_break: bool,
    letter: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct LineSpan {
    glyphs: Range<usize>,
    reason: BreakReason,
    hyphenated: bool,
}

impl SimpleBackend {
    /// Creates a backend with a 14 pixel default font size.
    pub fn new(metrics: SimpleMetrics) -> Self {
        Self {
            metrics,
            default_font_size: 14.0,
        }
    }

    /// Sets the font size, in pixels, of text not covered by a size span.
    #[must_use]
    pub fn with_default_font_size(mut self, size: f32) -> Self {
        self.default_font_size = size;
        self
    }

    /// Returns the metrics of this backend.
    pub fn metrics(&self) -> &SimpleMetrics {
        &self.metrics
    }

    /// Returns the default font size in pixels.
    pub fn default_font_size(&self) -> f32 {
        self.default_font_size
    }

    /// Advance of `c` at `font_size`, without letter spacing.
    pub fn char_advance(&self, c: char, font_size: f32) -> f32 {
        if is_hard_break(c) || is_zero_width(c) {
            0.0
        } else if c == '\t' {
            self.metrics.tab_width * self.metrics.advance * font_size
        } else if is_wide(c) {
            self.metrics.wide_advance * font_size
        } else {
            self.metrics.advance * font_size
        }
    }

    fn extents(&self, font_size: f32) -> Extents {
        let m = &self.metrics;
        Extents {
            ascent: (m.ascent * font_size).round(),
            descent: (m.descent * font_size).round(),
            top: (m.top * font_size).round(),
            bottom: (m.bottom * font_size).round(),
            cap_height: m.cap_height * font_size,
            x_height: m.x_height * font_size,
        }
    }

    fn shape(&self, text: &StyledText) -> Vec<Glyph> {
        let source = text.as_str();
        let mut glyphs = Vec::with_capacity(source.len());
        for run in text.compose_styles(self.default_font_size) {
            let style = &run.style;
            for (offset, c) in source[run.range.clone()].char_indices() {
                let start = run.range.start + offset;
                let range = start..start + c.len_utf8();
                let glyph = match &style.attachment {
                    Some(attachment) => Glyph {
                        range,
                        advance: attachment.width,
                        extents: Extents {
                            ascent: attachment.height,
                            top: attachment.height,
                            ..Extents::default()
                        },
                        font_size: style.font_size,
                        line_height: style.line_height,
                        whitespace: false,
                        hard_break: false,
                        letter: false,
                    },
                    None => {
                        let mut advance = self.char_advance(c, style.font_size);
                        if advance > 0.0 {
                            advance += style.letter_spacing;
                        }
                        Glyph {
                            range,
                            advance,
                            extents: self.extents(style.font_size),
                            font_size: style.font_size,
                            line_height: style.line_height,
                            whitespace: c.is_whitespace(),
                            hard_break: is_hard_break(c),
                            letter: c.is_alphabetic(),
                        }
                    }
                };
                glyphs.push(glyph);
            }
        }
        glyphs
    }

    fn hyphen_advance(&self, font_size: f32) -> f32 {
        self.char_advance(self.metrics.hyphen, font_size)
    }

    fn break_lines(
        &self,
        glyphs: &[Glyph],
        opportunities: &[bool],
        request: &LineBreakRequest,
    ) -> Vec<LineSpan> {
        let hyphenate = request.hyphenation != HyphenationFrequency::None;
        if request.boring.is_some() {
            return vec![LineSpan {
                glyphs: 0..glyphs.len(),
                reason: BreakReason::None,
                hyphenated: false,
            }];
        }
        let greedy = self.break_greedy(glyphs, opportunities, request.width, hyphenate);
        if request.break_strategy != BreakStrategy::Balanced || greedy.len() < 2 {
            return greedy;
        }

        // Find the narrowest width that keeps the greedy line count.
        let target = greedy.len();
        let mut low = 0.0_f32;
        let mut high = request.width;
        for _ in 0..16 {
            let mid = (low + high) * 0.5;
            if self.break_greedy(glyphs, opportunities, mid, hyphenate).len() <= target {
                high = mid;
            } else {
                low = mid;
            }
        }
        let balanced = self.break_greedy(glyphs, opportunities, high.ceil(), hyphenate);
        if balanced.len() == target {
            balanced
        } else {
            greedy
        }
    }

    fn break_greedy(
        &self,
        glyphs: &[Glyph],
        opportunities: &[bool],
        max_width: f32,
        hyphenate: bool,
    ) -> Vec<LineSpan> {
        let advance = |range: Range<usize>| -> f32 { glyphs[range].iter().map(|g| g.advance).sum() };
        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut x = 0.0;
        let mut last_opportunity: Option<usize> = None;
        let mut i = 0;
        while i < glyphs.len() {
            let glyph = &glyphs[i];
            if glyph.hard_break {
                lines.push(LineSpan {
                    glyphs: line_start..i + 1,
                    reason: BreakReason::Explicit,
                    hyphenated: false,
                });
                line_start = i + 1;
                x = 0.0;
                last_opportunity = None;
                i += 1;
                continue;
            }
            // Whitespace hangs past the edge, so only visible glyphs can overflow.
            if !glyph.whitespace && i > line_start && x + glyph.advance > max_width {
                let (end, reason, hyphenated) = match last_opportunity {
                    Some(end) => (end, BreakReason::Regular, false),
                    None => {
                        let mut end = i;
                        let hyphenated = hyphenate && glyphs[i - 1].letter && glyph.letter;
                        if hyphenated {
                            let hyphen = self.hyphen_advance(glyphs[i - 1].font_size);
                            while end > line_start + 1
                                && advance(line_start..end) + hyphen > max_width
                            {
                                end -= 1;
                            }
                        }
                        (end, BreakReason::Emergency, hyphenated)
                    }
                };
                lines.push(LineSpan {
                    glyphs: line_start..end,
                    reason,
                    hyphenated,
                });
                line_start = end;
                x = advance(end..i);
                last_opportunity = None;
                continue;
            }
            x += glyph.advance;
            if opportunities[i] {
                last_opportunity = Some(i + 1);
            }
            i += 1;
        }
        lines.push(LineSpan {
            glyphs: line_start..glyphs.len(),
            reason: BreakReason::None,
            hyphenated: false,
        });
        lines
    }

    fn ellipsize(
        &self,
        glyphs: &[Glyph],
        line: &LineSpan,
        line_start: usize,
        mode: EllipsizeMode,
        single_line: bool,
        width: f32,
    ) -> Option<Ellipsis> {
        let line_glyphs = &glyphs[line.glyphs.clone()];
        let font_size = line_glyphs
            .last()
            .map_or(self.default_font_size, |g| g.font_size);
        let available = width - self.char_advance(self.metrics.ellipsis, font_size);
        let line_end = line_glyphs.last().map_or(line_start, |g| g.range.end);
        let content_end = line_glyphs
            .iter()
            .rposition(|g| !g.whitespace)
            .map_or(line_start, |index| line_glyphs[index].range.end);
        let mode = match mode {
            EllipsizeMode::Head | EllipsizeMode::Middle if !single_line => EllipsizeMode::Tail,
            mode => mode,
        };

        let (start, end) = match mode {
            EllipsizeMode::Clip => return None,
            EllipsizeMode::Tail => {
                let mut x = 0.0;
                let mut cut = content_end;
                for glyph in line_glyphs {
                    x += glyph.advance;
                    if x > available {
                        cut = glyph.range.start;
                        break;
                    }
                }
                (cut.min(content_end), line_end)
            }
            EllipsizeMode::Head => {
                let mut x = 0.0;
                let mut keep_from = line_start;
                for glyph in line_glyphs.iter().rev() {
                    x += glyph.advance;
                    if x > available {
                        keep_from = glyph.range.end;
                        break;
                    }
                }
                (line_start, keep_from)
            }
            EllipsizeMode::Middle => {
                let half = available * 0.5;
                let mut x = 0.0;
                let mut left_end = line_start;
                for glyph in line_glyphs {
                    x += glyph.advance;
                    if x > half {
                        break;
                    }
                    left_end = glyph.range.end;
                }
                let mut x = 0.0;
                let mut right_start = line_end;
                for glyph in line_glyphs.iter().rev() {
                    x += glyph.advance;
                    if x > half || glyph.range.start < left_end {
                        break;
                    }
                    right_start = glyph.range.start;
                }
                (left_end, right_start.max(left_end))
            }
        };
        Some(Ellipsis {
            start: start - line_start,
            count: end - start,
        })
    }

    fn line_metrics(
        &self,
        line_glyphs: &[Glyph],
        fallback: Option<&Glyph>,
        first: bool,
        last: bool,
        include_font_padding: bool,
    ) -> LineMetrics {
        let mut extents = match line_glyphs.first().or(fallback) {
            Some(glyph) => glyph.extents,
            None => self.extents(self.default_font_size),
        };
        let mut line_height = if line_glyphs.is_empty() {
            fallback.and_then(|g| g.line_height)
        } else {
            None
        };
        for glyph in line_glyphs {
            extents = extents.max(glyph.extents);
            line_height = match (line_height, glyph.line_height) {
                (Some(a), Some(b)) => Some(a.max(b)),
                (a, b) => a.or(b),
            };
        }
        if let Some(height) = line_height {
            let natural = extents.ascent + extents.descent;
            if natural > height {
                extents.descent = extents.descent.min(height);
                extents.ascent = height - extents.descent;
            } else {
                let extra = height - natural;
                extents.ascent += (extra * 0.5).ceil();
                extents.descent += (extra * 0.5).floor();
            }
            extents.top = extents.ascent;
            extents.bottom = extents.descent;
        }

        let advance: f32 = line_glyphs.iter().map(|g| g.advance).sum();
        let trailing_whitespace: f32 = line_glyphs
            .iter()
            .rev()
            .take_while(|g| g.whitespace)
            .map(|g| g.advance)
            .sum();
        let above = if first && include_font_padding {
            extents.top.max(extents.ascent)
        } else {
            extents.ascent
        };
        let below = if last && include_font_padding {
            extents.bottom.max(extents.descent)
        } else {
            extents.descent
        };
        LineMetrics {
            ascent: above,
            descent: below,
            baseline: above,
            offset: 0.0,
            advance,
            trailing_whitespace,
            min_coord: 0.0,
            max_coord: above + below,
            cap_height: extents.cap_height,
            x_height: extents.x_height,
        }
    }
}

impl TextBackend for SimpleBackend {
    fn is_boring(&self, text: &StyledText) -> Option<BoringMetrics> {
        if text.as_str().chars().any(|c| {
            is_hard_break(c)
                || c == '\t'
                || matches!(
                    bidi_class(c),
                    BidiClass::R
                        | BidiClass::AL
                        | BidiClass::AN
                        | BidiClass::RLE
                        | BidiClass::RLO
                        | BidiClass::RLI
                        | BidiClass::LRE
                        | BidiClass::LRO
                        | BidiClass::LRI
                        | BidiClass::FSI
                        | BidiClass::PDF
                        | BidiClass::PDI
                )
        }) {
            return None;
        }
        let glyphs = self.shape(text);
        let extents = glyphs
            .iter()
            .fold(self.extents(self.default_font_size), |acc, g| {
                acc.max(g.extents)
            });
        Some(BoringMetrics {
            width: glyphs.iter().map(|g| g.advance).sum(),
            ascent: extents.ascent,
            descent: extents.descent,
        })
    }

    fn measure_natural_width(&self, text: &StyledText) -> f32 {
        let mut widest = 0.0_f32;
        let mut current = 0.0;
        for glyph in self.shape(text) {
            if glyph.hard_break {
                widest = widest.max(current);
                current = 0.0;
            } else {
                current += glyph.advance;
            }
        }
        widest.max(current)
    }

    fn break_into_lines(&self, text: &StyledText, request: &LineBreakRequest) -> Layout {
        let source = text.as_str();
        let glyphs = self.shape(text);

        let mut opportunities = vec![false; glyphs.len()];
        let segmenter = LineSegmenter::new_auto(LineBreakOptions::default());
        for position in segmenter.segment_str(source) {
            if position == 0 || position >= source.len() {
                continue;
            }
            let after = glyphs.partition_point(|g| g.range.end < position);
            if let Some(slot) = opportunities.get_mut(after) {
                *slot = glyphs[after].range.end == position;
            }
        }

        let spans = self.break_lines(&glyphs, &opportunities, request);
        let level = match request.direction {
            Direction::Ltr => Level::ltr(),
            Direction::Rtl => Level::rtl(),
        };
        let bidi = BidiInfo::new(source, Some(level));
        let truncate_at = request
            .max_lines
            .filter(|max| *max > 0)
            .map(|max| max as usize)
            .filter(|max| spans.len() > *max && request.ellipsize != EllipsizeMode::Clip);

        let mut builder = LayoutBuilder::new(
            text.text().clone(),
            request.width,
            request.direction,
            request.alignment,
            request.max_lines,
        );
        let mut y = 0.0;
        let line_count = spans.len();
        for (index, span) in spans.iter().enumerate() {
            let line_glyphs = &glyphs[span.glyphs.clone()];
            let line_start = line_glyphs
                .first()
                .map(|g| g.range.start)
                .or_else(|| span.glyphs.start.checked_sub(1).map(|i| glyphs[i].range.end))
                .unwrap_or(0);
            let line_end = line_glyphs.last().map_or(line_start, |g| g.range.end);
            let fallback = span.glyphs.start.checked_sub(1).map(|i| &glyphs[i]);

            let mut metrics = self.line_metrics(
                line_glyphs,
                fallback,
                index == 0,
                index + 1 == line_count,
                request.include_font_padding,
            );
            if span.hyphenated {
                if let Some(last) = line_glyphs.last() {
                    metrics.advance += self.hyphen_advance(last.font_size);
                }
            }
            metrics.min_coord = y;
            metrics.baseline += y;
            metrics.max_coord += y;
            y = metrics.max_coord;

            let ellipsis = match truncate_at {
                Some(max) if index + 1 == max => self.ellipsize(
                    &glyphs,
                    span,
                    line_start,
                    request.ellipsize,
                    max == 1,
                    request.width,
                ),
                _ => None,
            };

            let mut clusters: Vec<ClusterData> = line_glyphs
                .iter()
                .map(|g| ClusterData {
                    text_range: g.range.clone(),
                    x: 0.0,
                    advance: g.advance,
                    is_rtl: bidi.levels[g.range.start].is_rtl(),
                })
                .collect();
            if line_start < line_end {
                let mut runs: SmallVec<[Range<usize>; 4]> = SmallVec::new();
                for paragraph in &bidi.paragraphs {
                    let start = paragraph.range.start.max(line_start);
                    let end = paragraph.range.end.min(line_end);
                    if start < end {
                        runs.extend(bidi.visual_runs(paragraph, start..end).1);
                    }
                }
                let mut x = 0.0;
                for run in runs {
                    let first = clusters.partition_point(|c| c.text_range.start < run.start);
                    let last = clusters.partition_point(|c| c.text_range.start < run.end);
                    let rtl = bidi.levels[run.start].is_rtl();
                    for step in 0..last - first {
                        let index = if rtl { last - 1 - step } else { first + step };
                        let cluster = &mut clusters[index];
                        cluster.x = x;
                        x += cluster.advance;
                    }
                }
            }

            builder.push_line(
                line_start..line_end,
                metrics,
                span.reason,
                clusters,
                ellipsis,
                span.hyphenated,
            );
        }
        tracing::trace!(
            lines = line_count,
            width = request.width,
            boring = request.boring.is_some(),
            "broke text into lines"
        );
        builder.finish()
    }
}

fn is_hard_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{1C}'..='\u{1E}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn is_zero_width(c: char) -> bool {
    matches!(bidi_class(c), BidiClass::NSM | BidiClass::BN)
}

fn is_wide(c: char) -> bool {
    matches!(
        c,
        '\u{1100}'..='\u{115F}'
            | '\u{2E80}'..='\u{A4CF}'
            | '\u{AC00}'..='\u{D7A3}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{FE30}'..='\u{FE4F}'
            | '\u{FF00}'..='\u{FF60}'
            | '\u{FFE0}'..='\u{FFE6}'
            | '\u{1F300}'..='\u{1F64F}'
            | '\u{1F900}'..='\u{1F9FF}'
            | '\u{20000}'..='\u{3FFFD}'
    )
}

#[cfg(test)]
mod tests {
    use super::{SimpleBackend, SimpleMetrics};

    #[test]
    fn advances_scale_with_font_size() {
        let backend = SimpleBackend::new(SimpleMetrics::default());
        assert_eq!(backend.char_advance('a', 20.0), 10.0, "half an em");
        assert_eq!(backend.char_advance('\u{4E2D}', 20.0), 20.0, "wide is one em");
        assert_eq!(backend.char_advance('\t', 20.0), 40.0, "tab is four characters");
        assert_eq!(backend.char_advance('\n', 20.0), 0.0, "hard breaks have no width");
        assert_eq!(backend.char_advance('\u{0301}', 20.0), 0.0, "combining marks have no width");
    }
}

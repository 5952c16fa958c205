// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute-based segmentation for [`AttributedText`].
//!
//! Given an [`AttributedText`] with overlapping spans, this module produces non-overlapping,
//! contiguous segments together with the spans active over each segment, ordered by
//! ascending priority (application order).

use alloc::vec::Vec;
use core::ops::Range;

use crate::{AttributedText, Span};

/// A contiguous, non-empty byte range and the spans covering all of it.
#[derive(Clone, Debug)]
pub struct Segment<'a, Attr> {
    /// Byte range of the segment.
    pub range: Range<usize>,
    /// Active spans in application order: ascending priority, ties in application order.
    pub spans: Vec<&'a Span<Attr>>,
}

/// Iterator over contiguous attribute segments produced from an [`AttributedText`].
///
/// # Examples
///
/// ```
/// use attributed_text::AttributedText;
///
/// #[derive(Debug, PartialEq)]
/// enum Color {
///     Red,
///     Blue,
/// }
///
/// let mut text = AttributedText::new("hello");
/// text.apply_attribute(0..2, Color::Red, 1).unwrap();
/// text.apply_attribute(1..5, Color::Blue, 0).unwrap();
///
/// let segments: Vec<_> = text.segments().collect();
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[1].range, 1..2);
/// let colors: Vec<_> = segments[1].spans.iter().map(|s| &s.attribute).collect();
/// // Blue has the lower priority, so it is applied first.
/// assert_eq!(colors, vec![&Color::Blue, &Color::Red]);
/// ```
///
/// Zero-length spans never become active, but their boundaries still split segments.
#[derive(Debug)]
pub struct AttributeSegments<'a, Attr> {
    attributed: &'a AttributedText<Attr>,
    boundaries: Vec<usize>,
    /// Span indices ordered by range start.
    by_start: Vec<usize>,
    next_start: usize,
    active: Vec<usize>,
    index: usize,
}

impl<'a, Attr> AttributeSegments<'a, Attr> {
    fn new(attributed: &'a AttributedText<Attr>) -> Self {
        let spans = attributed.spans();
        let mut boundaries = Vec::with_capacity(2 + spans.len() * 2);
        boundaries.push(0);
        boundaries.push(attributed.len());
        for span in spans {
            boundaries.push(span.range.start);
            boundaries.push(span.range.end);
        }
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut by_start: Vec<usize> = (0..spans.len()).filter(|&i| !spans[i].is_empty()).collect();
        by_start.sort_by_key(|&i| spans[i].range.start);

        Self {
            attributed,
            boundaries,
            by_start,
            next_start: 0,
            active: Vec::new(),
            index: 0,
        }
    }

    fn update_active(&mut self, position: usize) {
        let spans = self.attributed.spans();
        self.active.retain(|&i| spans[i].range.end > position);
        while let Some(&i) = self.by_start.get(self.next_start) {
            if spans[i].range.start > position {
                break;
            }
            self.next_start += 1;
            let key = (spans[i].priority, i);
            let at = self
                .active
                .partition_point(|&j| (spans[j].priority, j) < key);
            self.active.insert(at, i);
        }
    }
}

impl<'a, Attr> Iterator for AttributeSegments<'a, Attr> {
    type Item = Segment<'a, Attr>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index + 1 >= self.boundaries.len() {
            self.active.clear();
            return None;
        }
        let start = self.boundaries[self.index];
        let end = self.boundaries[self.index + 1];
        self.index += 1;
        self.update_active(start);
        let spans = self.attributed.spans();
        Some(Segment {
            range: start..end,
            spans: self.active.iter().map(|&i| &spans[i]).collect(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.boundaries.len().saturating_sub(self.index + 1);
        (remaining, Some(remaining))
    }
}

impl<Attr> ExactSizeIterator for AttributeSegments<'_, Attr> {}

impl<Attr> AttributedText<Attr> {
    /// Split the text into contiguous segments with the spans active over each.
    pub fn segments(&self) -> AttributeSegments<'_, Attr> {
        AttributeSegments::new(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::AttributedText;
    use alloc::vec::Vec;

    #[test]
    fn empty_text_has_no_segments() {
        let text: AttributedText<u8> = AttributedText::new("");
        assert_eq!(text.segments().count(), 0);
    }

    #[test]
    fn unstyled_text_is_one_segment() {
        let text: AttributedText<u8> = AttributedText::new("abc");
        let segments: Vec<_> = text.segments().collect();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].range, 0..3);
        assert!(segments[0].spans.is_empty());
    }

    #[test]
    fn zero_length_spans_split_but_stay_inactive() {
        let mut text = AttributedText::new("abcd");
        text.apply_attribute(2..2, 'z', 9).unwrap();
        text.apply_attribute(0..4, 'a', 0).unwrap();
        let segments: Vec<_> = text.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].range, 0..2);
        assert_eq!(segments[1].range, 2..4);
        for segment in &segments {
            let attrs: Vec<_> = segment.spans.iter().map(|s| s.attribute).collect();
            assert_eq!(attrs, ['a']);
        }
    }

    #[test]
    fn spans_sorted_by_priority_then_application() {
        let mut text = AttributedText::new("abcdef");
        text.apply_attribute(0..6, 'c', 5).unwrap();
        text.apply_attribute(0..3, 'a', 1).unwrap();
        text.apply_attribute(2..6, 'b', 1).unwrap();
        let segments: Vec<_> = text.segments().collect();
        let ranges: Vec<_> = segments.iter().map(|s| s.range.clone()).collect();
        assert_eq!(ranges, [0..2, 2..3, 3..6]);
        let middle: Vec<_> = segments[1].spans.iter().map(|s| s.attribute).collect();
        assert_eq!(middle, ['a', 'b', 'c']);
        let last: Vec<_> = segments[2].spans.iter().map(|s| s.attribute).collect();
        assert_eq!(last, ['b', 'c']);
    }
}

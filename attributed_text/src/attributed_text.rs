// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::Range;

use crate::{Endpoint, Error};

/// An attribute applied over a byte range of an [`AttributedText`], with the priority it
/// was applied at.
///
/// When spans of the same kind overlap, consumers resolve them by applying spans in
/// increasing `priority`, so the highest priority wins.
#[derive(Clone, Debug, PartialEq)]
pub struct Span<Attr> {
    /// Half-open byte range into the text. Both ends lie on `char` boundaries.
    pub range: Range<usize>,
    /// The attribute payload.
    pub attribute: Attr,
    /// Application priority.
    pub priority: u32,
}

impl<Attr> Span<Attr> {
    /// Returns `true` if the span covers no text.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// A flattened block of text with prioritized attribute spans applied to ranges within it.
///
/// The text is shared (`Arc<str>`), so deriving a new span list for the same text (see
/// [`AttributedText::map_attributes`]) never copies the buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributedText<Attr> {
    text: Arc<str>,
    spans: Vec<Span<Attr>>,
}

impl<Attr> AttributedText<Attr> {
    /// Create an `AttributedText` with no attributes applied.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Borrow the underlying text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The shared text buffer.
    pub fn text(&self) -> &Arc<str> {
        &self.text
    }

    /// Returns the length of the underlying text, in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the underlying text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Apply an `attribute` to a `range` within the text at the given `priority`.
    pub fn apply_attribute(
        &mut self,
        range: Range<usize>,
        attribute: Attr,
        priority: u32,
    ) -> Result<(), Error> {
        self.validate(&range)?;
        self.spans.push(Span {
            range,
            attribute,
            priority,
        });
        Ok(())
    }

    fn validate(&self, range: &Range<usize>) -> Result<(), Error> {
        let len = self.text.len();
        let (start, end) = (range.start, range.end);
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        if end > len {
            return Err(Error::InvalidBounds { start, end, len });
        }
        for (which, index) in [(Endpoint::Start, start), (Endpoint::End, end)] {
            if !self.text.is_char_boundary(index) {
                return Err(Error::NotOnCharBoundary {
                    start,
                    end,
                    which,
                    index,
                });
            }
        }
        Ok(())
    }

    /// All spans, in the order they were applied.
    pub fn spans(&self) -> &[Span<Attr>] {
        &self.spans
    }

    /// Iterate over the spans covering byte `index`.
    ///
    /// This doesn't resolve conflicting attributes, it reports everything.
    pub fn spans_at(&self, index: usize) -> impl Iterator<Item = &Span<Attr>> {
        self.spans
            .iter()
            .filter(move |span| span.range.contains(&index))
    }

    /// Iterate over the spans intersecting `range`.
    pub fn spans_for_range(&self, range: Range<usize>) -> impl Iterator<Item = &Span<Attr>> {
        self.spans
            .iter()
            .filter(move |span| span.range.start < range.end && span.range.end > range.start)
    }

    /// Returns the number of spans applied to the text.
    pub fn spans_len(&self) -> usize {
        self.spans.len()
    }

    /// Remove all applied spans.
    pub fn clear_spans(&mut self) {
        self.spans.clear();
    }

    /// Produce a new `AttributedText` over the same shared text, with every attribute
    /// replaced by `f(span)`. Ranges and priorities are preserved.
    pub fn map_attributes<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Span<Attr>) -> Attr,
    {
        Self {
            text: Arc::clone(&self.text),
            spans: self
                .spans
                .iter()
                .map(|span| Span {
                    range: span.range.clone(),
                    attribute: f(span),
                    priority: span.priority,
                })
                .collect(),
        }
    }
}

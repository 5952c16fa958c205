// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening fragments into a styled buffer, and resolving the styles of that buffer.

use core::cmp::Ordering;
use core::ops::Range;
use std::sync::Arc;

use attributed_text::AttributedText;
use text_primitives::{Color, FontStyle, FontWeight, TextTransform};

use crate::model::{Fragment, Tag, TextShadow};
use crate::units::DisplayMetrics;
use crate::Error;

/// Text inserted for an attachment fragment that carries no text of its own.
pub const ATTACHMENT_PLACEHOLDER: &str = "0";

/// A styled span over the flattened buffer.
pub type Span = attributed_text::Span<SpanKind>;

/// How span priorities relate to the order spans were created in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PriorityOrder {
    /// Later fragments win: priority equals the construction index.
    #[default]
    Construction,
    /// Earlier fragments win: priority is the construction index reversed.
    Reversed,
}

/// An inline object occupying one character of the buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttachmentBox {
    /// Node the attachment belongs to.
    pub tag: Tag,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

/// The closed set of styles a span can carry. Lengths are in pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum SpanKind {
    /// Foreground colour.
    Color(Color),
    /// Background colour.
    Background(Color),
    /// Extra advance added after every character.
    LetterSpacing(f32),
    /// Font size.
    Size(f32),
    /// Font face selection; `None` members leave the current value alone.
    Style {
        /// Slant.
        style: Option<FontStyle>,
        /// Weight.
        weight: Option<FontWeight>,
        /// Family name.
        family: Option<Arc<str>>,
        /// OpenType feature settings.
        features: Option<Arc<str>>,
    },
    /// Underline decoration.
    Underline,
    /// Strike-through decoration.
    Strikethrough,
    /// Drop shadow, with offsets and radius in pixels.
    Shadow(TextShadow),
    /// Fixed line height.
    LineHeight(f32),
    /// Node that produced the text.
    Tag(Tag),
    /// Node that receives presses on the text.
    Clickable(Tag),
    /// Inline object replacing the covered character.
    Attachment(AttachmentBox),
}

impl SpanKind {
    /// Applies this span to `style`. This is the only place span semantics live.
    pub fn apply(&self, style: &mut ResolvedStyle) {
        match self {
            Self::Color(color) => style.color = Some(*color),
            Self::Background(color) => style.background = Some(*color),
            Self::LetterSpacing(spacing) => style.letter_spacing = *spacing,
            Self::Size(size) => style.font_size = *size,
            Self::Style {
                style: font_style,
                weight,
                family,
                features,
            } => {
                if let Some(font_style) = font_style {
                    style.font_style = *font_style;
                }
                if let Some(weight) = weight {
                    style.font_weight = *weight;
                }
                if family.is_some() {
                    style.font_family.clone_from(family);
                }
                if features.is_some() {
                    style.font_features.clone_from(features);
                }
            }
            Self::Underline => style.underline = true,
            Self::Strikethrough => style.strikethrough = true,
            Self::Shadow(shadow) => style.shadow = Some(*shadow),
            Self::LineHeight(height) => style.line_height = Some(*height),
            Self::Tag(tag) => style.tag = Some(*tag),
            Self::Clickable(tag) => style.clickable = Some(*tag),
            Self::Attachment(attachment) => style.attachment = Some(*attachment),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Color(_) => 0,
            Self::Background(_) => 1,
            Self::LetterSpacing(_) => 2,
            Self::Size(_) => 3,
            Self::Style { .. } => 4,
            Self::Underline => 5,
            Self::Strikethrough => 6,
            Self::Shadow(_) => 7,
            Self::LineHeight(_) => 8,
            Self::Tag(_) => 9,
            Self::Clickable(_) => 10,
            Self::Attachment(_) => 11,
        }
    }

    /// A total order over span payloads, used to break priority ties.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Color(a), Self::Color(b)) | (Self::Background(a), Self::Background(b)) => {
                a.cmp(b)
            }
            (Self::LetterSpacing(a), Self::LetterSpacing(b))
            | (Self::Size(a), Self::Size(b))
            | (Self::LineHeight(a), Self::LineHeight(b)) => a.total_cmp(b),
            (
                Self::Style {
                    style: style_a,
                    weight: weight_a,
                    family: family_a,
                    features: features_a,
                },
                Self::Style {
                    style: style_b,
                    weight: weight_b,
                    family: family_b,
                    features: features_b,
                },
            ) => style_a
                .map(|s| s as u8)
                .cmp(&style_b.map(|s| s as u8))
                .then_with(|| match (weight_a, weight_b) {
                    (Some(a), Some(b)) => a.value().total_cmp(&b.value()),
                    (a, b) => a.is_some().cmp(&b.is_some()),
                })
                .then_with(|| family_a.cmp(family_b))
                .then_with(|| features_a.cmp(features_b)),
            (Self::Shadow(a), Self::Shadow(b)) => a
                .offset_dx
                .total_cmp(&b.offset_dx)
                .then_with(|| a.offset_dy.total_cmp(&b.offset_dy))
                .then_with(|| a.radius.total_cmp(&b.radius))
                .then_with(|| a.color.cmp(&b.color)),
            (Self::Tag(a), Self::Tag(b)) | (Self::Clickable(a), Self::Clickable(b)) => a.cmp(b),
            (Self::Attachment(a), Self::Attachment(b)) => a
                .tag
                .cmp(&b.tag)
                .then_with(|| a.width.total_cmp(&b.width))
                .then_with(|| a.height.total_cmp(&b.height)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// The style in effect over a run of text after composing every active span.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStyle {
    /// Font size in pixels.
    pub font_size: f32,
    /// Letter spacing in pixels.
    pub letter_spacing: f32,
    /// Fixed line height in pixels.
    pub line_height: Option<f32>,
    /// Foreground colour.
    pub color: Option<Color>,
    /// Background colour.
    pub background: Option<Color>,
    /// Slant.
    pub font_style: FontStyle,
    /// Weight.
    pub font_weight: FontWeight,
    /// Family name.
    pub font_family: Option<Arc<str>>,
    /// OpenType feature settings.
    pub font_features: Option<Arc<str>>,
    /// Underline decoration.
    pub underline: bool,
    /// Strike-through decoration.
    pub strikethrough: bool,
    /// Drop shadow.
    pub shadow: Option<TextShadow>,
    /// Producing node.
    pub tag: Option<Tag>,
    /// Node receiving presses.
    pub clickable: Option<Tag>,
    /// Attachment replacing this run.
    pub attachment: Option<AttachmentBox>,
}

impl ResolvedStyle {
    /// The style of text covered by no span.
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            letter_spacing: 0.0,
            line_height: None,
            color: None,
            background: None,
            font_style: FontStyle::Normal,
            font_weight: FontWeight::NORMAL,
            font_family: None,
            font_features: None,
            underline: false,
            strikethrough: false,
            shadow: None,
            tag: None,
            clickable: None,
            attachment: None,
        }
    }
}

/// A maximal byte range with a single resolved style.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRun {
    /// Byte range in the buffer.
    pub range: Range<usize>,
    /// Style in effect over the range.
    pub style: ResolvedStyle,
}

/// A flattened text buffer with its styling spans.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledText {
    inner: AttributedText<SpanKind>,
}

impl StyledText {
    /// Creates an unstyled buffer.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self {
            inner: AttributedText::new(text),
        }
    }

    /// Adds a span, validating its range against the buffer.
    pub fn push_span(
        &mut self,
        range: Range<usize>,
        kind: SpanKind,
        priority: u32,
    ) -> Result<(), Error> {
        self.inner.apply_attribute(range, kind, priority)?;
        Ok(())
    }

    /// The flattened text.
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    /// The flattened text as a shared string.
    pub fn text(&self) -> &Arc<str> {
        self.inner.text()
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// All spans in construction order.
    pub fn spans(&self) -> &[Span] {
        self.inner.spans()
    }

    /// Attachment spans in buffer order.
    pub fn attachments(&self) -> Vec<(Range<usize>, AttachmentBox)> {
        let mut attachments: Vec<_> = self
            .spans()
            .iter()
            .filter_map(|span| match &span.attribute {
                SpanKind::Attachment(attachment) => Some((span.range.clone(), *attachment)),
                _ => None,
            })
            .collect();
        attachments.sort_by_key(|(range, _)| range.start);
        attachments
    }

    /// The largest font size set by any span.
    pub fn largest_font_size(&self) -> Option<f32> {
        self.font_sizes().reduce(f32::max)
    }

    pub(crate) fn font_sizes(&self) -> impl Iterator<Item = f32> + '_ {
        self.spans().iter().filter_map(|span| match span.attribute {
            SpanKind::Size(size) => Some(size),
            _ => None,
        })
    }

    /// Returns a new buffer sharing this text, with every font size scaled by
    /// `font_size / reference`.
    ///
    /// Scaled sizes are floored to whole pixels and never drop below `min_size`. A span
    /// of size `reference` becomes exactly `font_size` (floored).
    #[must_use]
    pub fn with_scaled_font_sizes(&self, font_size: f32, reference: f32, min_size: f32) -> Self {
        Self {
            inner: self.inner.map_attributes(|span| match span.attribute {
                SpanKind::Size(size) => {
                    SpanKind::Size((size * font_size / reference).floor().max(min_size))
                }
                ref other => other.clone(),
            }),
        }
    }

    /// Resolves the style of every part of the buffer.
    ///
    /// Spans active over a segment are applied in increasing priority. Spans of equal
    /// priority are applied in [`SpanKind::total_cmp`] order, so the result does not
    /// depend on the order spans were added in.
    pub fn compose_styles(&self, default_font_size: f32) -> Vec<StyleRun> {
        let mut runs: Vec<StyleRun> = Vec::new();
        for segment in self.inner.segments() {
            let mut active = segment.spans;
            active.sort_by(|a, b| {
                a.priority
                    .cmp(&b.priority)
                    .then_with(|| a.attribute.total_cmp(&b.attribute))
            });
            let mut style = ResolvedStyle::new(default_font_size);
            for span in active {
                span.attribute.apply(&mut style);
            }
            match runs.last_mut() {
                Some(last) if last.style == style && last.style.attachment.is_none() => {
                    last.range.end = segment.range.end;
                }
                _ => runs.push(StyleRun {
                    range: segment.range,
                    style,
                }),
            }
        }
        runs
    }
}

/// Flattens fragments into a [`StyledText`].
#[derive(Clone, Copy, Debug)]
pub struct SpanBuilder {
    metrics: DisplayMetrics,
    default_font_size: f32,
    order: PriorityOrder,
}

struct PendingSpan {
    range: Range<usize>,
    kind: SpanKind,
    index: u32,
}

impl SpanBuilder {
    /// Creates a builder.
    ///
    /// `default_font_size` is in scalable points and applies to fragments without a size.
    pub fn new(metrics: DisplayMetrics, default_font_size: f32, order: PriorityOrder) -> Self {
        Self {
            metrics,
            default_font_size,
            order,
        }
    }

    /// Concatenates the fragments' text and records one span per active attribute.
    pub fn flatten(&self, fragments: &[Fragment]) -> Result<StyledText, Error> {
        let mut buffer = String::new();
        let mut pending: Vec<PendingSpan> = Vec::new();
        let mut next_index = 0_u32;

        for fragment in fragments {
            let start = buffer.len();
            append_transformed(
                &mut buffer,
                &fragment.text,
                fragment.attributes.text_transform,
            );
            if fragment.is_attachment && buffer.len() == start {
                buffer.push_str(ATTACHMENT_PLACEHOLDER);
            }
            let end = buffer.len();

            if fragment.is_attachment {
                let last_len = buffer[start..]
                    .chars()
                    .next_back()
                    .map_or(0, char::len_utf8);
                let attachment = AttachmentBox {
                    tag: fragment.tag.unwrap_or(Tag::NONE),
                    width: self.metrics.sp_to_px(fragment.attachment_width).trunc(),
                    height: self.metrics.sp_to_px(fragment.attachment_height).trunc(),
                };
                pending.push(PendingSpan {
                    range: end - last_len..end,
                    kind: SpanKind::Attachment(attachment),
                    index: next_index,
                });
                next_index += 1;
                continue;
            }
            if start == end {
                next_index += 1;
                continue;
            }
            for kind in self.text_spans(fragment) {
                pending.push(PendingSpan {
                    range: start..end,
                    kind,
                    index: next_index,
                });
                next_index += 1;
            }
        }

        let total = next_index;
        let mut text = StyledText::new(buffer);
        for span in pending {
            let priority = match self.order {
                PriorityOrder::Construction => span.index,
                PriorityOrder::Reversed => total - 1 - span.index,
            };
            text.push_span(span.range, span.kind, priority)?;
        }
        Ok(text)
    }

    fn text_spans(&self, fragment: &Fragment) -> Vec<SpanKind> {
        let attributes = &fragment.attributes;
        let scaling = attributes.allow_font_scaling.unwrap_or(true);
        let multiplier = attributes.font_size_multiplier;
        let to_px = |value: f32| self.metrics.font_to_px(value, scaling, multiplier);
        let tag = fragment.tag.unwrap_or(Tag::NONE);

        let mut kinds = Vec::new();
        if attributes.is_link() {
            kinds.push(SpanKind::Clickable(tag));
        }
        if let Some(color) = attributes.color {
            kinds.push(SpanKind::Color(match attributes.opacity {
                Some(opacity) => with_opacity(color, opacity),
                None => color,
            }));
        }
        if let Some(background) = attributes.background_color {
            kinds.push(SpanKind::Background(background));
        }
        if let Some(spacing) = attributes.letter_spacing.filter(|s| s.is_finite()) {
            kinds.push(SpanKind::LetterSpacing(to_px(spacing)));
        }
        let font_size = attributes.font_size.unwrap_or(self.default_font_size);
        kinds.push(SpanKind::Size(to_px(font_size).ceil()));
        if attributes.font_style.is_some()
            || attributes.font_weight.is_some()
            || attributes.font_family.is_some()
            || attributes.font_feature_settings.is_some()
        {
            kinds.push(SpanKind::Style {
                style: attributes.font_style,
                weight: attributes.font_weight,
                family: attributes.font_family.as_deref().map(Arc::from),
                features: attributes.font_feature_settings.as_deref().map(Arc::from),
            });
        }
        if attributes.underline {
            kinds.push(SpanKind::Underline);
        }
        if attributes.strikethrough {
            kinds.push(SpanKind::Strikethrough);
        }
        let shadow = attributes.text_shadow;
        if shadow.is_visible() {
            kinds.push(SpanKind::Shadow(TextShadow {
                offset_dx: self.metrics.dip_to_px(shadow.offset_dx),
                offset_dy: self.metrics.dip_to_px(shadow.offset_dy),
                radius: self.metrics.dip_to_px(shadow.radius),
                color: shadow.color,
            }));
        }
        if let Some(line_height) = attributes.line_height.map(to_px).filter(|h| h.is_finite()) {
            kinds.push(SpanKind::LineHeight(line_height));
        }
        kinds.push(SpanKind::Tag(tag));
        kinds
    }
}

fn append_transformed(buffer: &mut String, text: &str, transform: TextTransform) {
    match transform {
        TextTransform::None => buffer.push_str(text),
        TextTransform::Uppercase => buffer.push_str(&text.to_uppercase()),
        TextTransform::Lowercase => buffer.push_str(&text.to_lowercase()),
        TextTransform::Capitalize => {
            let mut at_word_start = true;
            for c in text.chars() {
                if at_word_start && c.is_alphabetic() {
                    buffer.extend(c.to_uppercase());
                } else {
                    buffer.push(c);
                }
                at_word_start = !c.is_alphanumeric();
            }
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "The scaled alpha is clamped to the u8 range first."
)]
fn with_opacity(color: Color, opacity: f32) -> Color {
    let alpha = (f32::from(color.alpha()) * opacity.clamp(0.0, 1.0)).round() as u32;
    Color((color.0 & 0x00FF_FFFF) | (alpha << 24))
}

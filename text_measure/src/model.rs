// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributed strings, their fragments and paragraph attributes.

use core::fmt;
use core::hash::{Hash, Hasher};

use text_primitives::{
    AccessibilityRole, BreakStrategy, Color, EllipsizeMode, FontStyle, FontWeight,
    HyphenationFrequency, LayoutDirection, TextAlign, TextTransform,
};

use crate::Error;
use crate::wire::{keys, MapBuffer, MapValue};

/// Identifier of the UI node that produced a fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(pub i32);

impl Tag {
    /// The tag used for fragments that carry no node identifier.
    pub const NONE: Self = Self(-1);
}

/// Identifier of a prepared buffer installed in the layout cache by its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheId(pub i32);

impl fmt::Display for CacheId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Shadow drawn behind a fragment's glyphs.
///
/// Offsets and radius are density-independent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextShadow {
    /// Horizontal offset.
    pub offset_dx: f32,
    /// Vertical offset.
    pub offset_dy: f32,
    /// Blur radius.
    pub radius: f32,
    /// Shadow colour.
    pub color: Color,
}

impl TextShadow {
    /// Colour used when a shadow is requested without one.
    pub const DEFAULT_COLOR: Color = Color(0x5500_0000);

    /// Returns `true` if this shadow would be drawn at all.
    pub fn is_visible(&self) -> bool {
        (self.offset_dx != 0.0 || self.offset_dy != 0.0 || self.radius != 0.0)
            && self.color.alpha() != 0
    }
}

impl Default for TextShadow {
    fn default() -> Self {
        Self {
            offset_dx: 0.0,
            offset_dy: 0.0,
            radius: 0.0,
            color: Self::DEFAULT_COLOR,
        }
    }
}

/// Styling of a single fragment.
///
/// `None` means the attribute was not specified, which is distinct from an explicit zero.
/// Sizes are in density-independent (or scalable, see `allow_font_scaling`) units.
#[derive(Clone, Debug, Default, PartialEq)]
#[allow(missing_docs, reason = "Fields are named after the attribute they carry.")]
pub struct TextAttributes {
    pub color: Option<Color>,
    pub background_color: Option<Color>,
    /// Multiplies the alpha of `color`.
    pub opacity: Option<f32>,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    /// Upper bound on the user font scale applied to this fragment.
    pub font_size_multiplier: Option<f32>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    /// CSS-style feature settings derived from the font variant list, e.g. `'smcp', 'tnum'`.
    pub font_feature_settings: Option<String>,
    /// Whether sizes follow the user font scale; defaults to `true`.
    pub allow_font_scaling: Option<bool>,
    pub letter_spacing: Option<f32>,
    pub line_height: Option<f32>,
    /// Only read from the first fragment of an attributed string.
    pub alignment: Option<TextAlign>,
    pub underline: bool,
    pub strikethrough: bool,
    pub text_shadow: TextShadow,
    /// Only read from the first fragment of an attributed string.
    pub layout_direction: Option<LayoutDirection>,
    pub role: Option<AccessibilityRole>,
    pub accessibility_role: Option<AccessibilityRole>,
    pub text_transform: TextTransform,
}

/// A run of text sharing one set of attributes, or an inline attachment.
#[derive(Clone, Debug, Default, PartialEq)]
#[allow(missing_docs, reason = "Fields are named after the attribute they carry.")]
pub struct Fragment {
    pub text: String,
    pub attributes: TextAttributes,
    pub is_attachment: bool,
    /// Attachment width in scalable points.
    pub attachment_width: f32,
    /// Attachment height in scalable points.
    pub attachment_height: f32,
    pub tag: Option<Tag>,
}

/// An ordered list of fragments, optionally standing in for a buffer held in the cache.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributedString {
    /// Fragments in reading order.
    pub fragments: Vec<Fragment>,
    /// When set, the prepared buffer is looked up by id and `fragments` may be empty.
    pub cache_key: Option<CacheId>,
    /// Producer-supplied content hash; informational only.
    pub hash: Option<i32>,
}

/// Constraints and options applied to a whole paragraph.
#[derive(Clone, Debug, Default, PartialEq)]
#[allow(missing_docs, reason = "Fields are named after the attribute they carry.")]
pub struct ParagraphAttributes {
    /// Maximum number of rendered lines. Zero and negative wire values decode as `None`.
    pub max_lines: Option<u32>,
    pub ellipsize_mode: EllipsizeMode,
    pub break_strategy: BreakStrategy,
    pub adjust_font_size_to_fit: Option<bool>,
    pub include_font_padding: Option<bool>,
    pub hyphenation_frequency: HyphenationFrequency,
    pub min_font_size: Option<f32>,
    pub max_font_size: Option<f32>,
}

impl Fragment {
    /// Creates a plain text fragment with default attributes.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Creates an attachment fragment of the given size.
    pub fn attachment(tag: Tag, width: f32, height: f32) -> Self {
        Self {
            is_attachment: true,
            attachment_width: width,
            attachment_height: height,
            tag: Some(tag),
            ..Self::default()
        }
    }

    /// Replaces the attributes of this fragment.
    #[must_use]
    pub fn with_attributes(mut self, attributes: TextAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sets the node identifier of this fragment.
    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Decodes a fragment buffer.
    pub fn from_map_buffer(buffer: &MapBuffer) -> Result<Self, Error> {
        let attributes = match buffer.get_map(keys::fragment::TEXT_ATTRIBUTES)? {
            Some(map) => TextAttributes::from_map_buffer(map)?,
            None => TextAttributes::default(),
        };
        Ok(Self {
            text: buffer
                .get_str(keys::fragment::STRING)?
                .unwrap_or_default()
                .to_owned(),
            attributes,
            is_attachment: buffer
                .get_bool(keys::fragment::IS_ATTACHMENT)?
                .unwrap_or(false),
            attachment_width: get_f32(buffer, keys::fragment::WIDTH)?.unwrap_or(0.0),
            attachment_height: get_f32(buffer, keys::fragment::HEIGHT)?.unwrap_or(0.0),
            tag: buffer.get_int(keys::fragment::REACT_TAG)?.map(Tag),
        })
    }
}

impl AttributedString {
    /// Creates an attributed string from fragments.
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self {
            fragments,
            ..Self::default()
        }
    }

    /// Creates a reference to a buffer previously installed under `id`.
    pub fn cached(id: CacheId) -> Self {
        Self {
            cache_key: Some(id),
            ..Self::default()
        }
    }

    /// Decodes an attributed string buffer.
    ///
    /// Fragments are a nested map keyed `0..n`; any other key layout is rejected.
    pub fn from_map_buffer(buffer: &MapBuffer) -> Result<Self, Error> {
        let mut fragments = Vec::new();
        if let Some(list) = buffer.get_map(keys::attributed_string::FRAGMENTS)? {
            fragments.reserve(list.len());
            for (index, (key, value)) in list.iter().enumerate() {
                if usize::from(key) != index {
                    return Err(Error::malformed(
                        "fragment list",
                        format!("expected key {index}, found {key}"),
                    ));
                }
                let MapValue::Map(fragment) = value else {
                    return Err(Error::malformed(
                        "fragment list",
                        format!("entry {index} is not a map"),
                    ));
                };
                fragments.push(Fragment::from_map_buffer(fragment)?);
            }
        }
        Ok(Self {
            fragments,
            cache_key: buffer
                .get_int(keys::attributed_string::CACHE_ID)?
                .map(CacheId),
            hash: buffer.get_int(keys::attributed_string::HASH)?,
        })
    }

    /// Returns `true` if there is no text to lay out.
    pub fn is_empty(&self) -> bool {
        self.fragments.iter().all(|f| f.text.is_empty() && !f.is_attachment)
    }
}

impl ParagraphAttributes {
    /// Decodes a paragraph attributes buffer.
    pub fn from_map_buffer(buffer: &MapBuffer) -> Result<Self, Error> {
        use keys::paragraph as key;

        let max_lines = buffer
            .get_int(key::MAX_NUMBER_OF_LINES)?
            .and_then(|lines| u32::try_from(lines).ok())
            .filter(|lines| *lines > 0);
        Ok(Self {
            max_lines,
            ellipsize_mode: keyword(
                buffer,
                key::ELLIPSIZE_MODE,
                "ellipsize mode",
                EllipsizeMode::parse,
            )?
            .unwrap_or_default(),
            break_strategy: keyword(
                buffer,
                key::TEXT_BREAK_STRATEGY,
                "break strategy",
                BreakStrategy::parse,
            )?
            .unwrap_or_default(),
            adjust_font_size_to_fit: buffer.get_bool(key::ADJUST_FONT_SIZE_TO_FIT)?,
            include_font_padding: buffer.get_bool(key::INCLUDE_FONT_PADDING)?,
            hyphenation_frequency: keyword(
                buffer,
                key::HYPHENATION_FREQUENCY,
                "hyphenation frequency",
                HyphenationFrequency::parse,
            )?
            .unwrap_or_default(),
            min_font_size: get_f32(buffer, key::MINIMUM_FONT_SIZE)?.filter(|size| *size > 0.0),
            max_font_size: get_f32(buffer, key::MAXIMUM_FONT_SIZE)?.filter(|size| *size > 0.0),
        })
    }
}

impl TextAttributes {
    /// Decodes a text attributes buffer.
    ///
    /// Unknown keys are ignored; known keys holding the wrong type or an unrecognized
    /// keyword fail the decode.
    pub fn from_map_buffer(buffer: &MapBuffer) -> Result<Self, Error> {
        use keys::text_attributes as key;

        let (underline, strikethrough) = match buffer.get_str(key::TEXT_DECORATION_LINE)? {
            Some(line) => parse_decoration_line(line)?,
            None => (false, false),
        };
        let font_feature_settings = match buffer.get_map(key::FONT_VARIANT)? {
            Some(variants) => feature_settings(variants)?,
            None => None,
        };
        let mut text_shadow = TextShadow::default();
        if let Some(dx) = get_f32(buffer, key::TEXT_SHADOW_OFFSET_DX)? {
            text_shadow.offset_dx = dx;
        }
        if let Some(dy) = get_f32(buffer, key::TEXT_SHADOW_OFFSET_DY)? {
            text_shadow.offset_dy = dy;
        }
        if let Some(radius) = get_f32(buffer, key::TEXT_SHADOW_RADIUS)? {
            text_shadow.radius = radius;
        }
        if let Some(color) = buffer.get_int(key::TEXT_SHADOW_COLOR)? {
            text_shadow.color = Color::from_argb_i32(color);
        }

        Ok(Self {
            color: buffer
                .get_int(key::FOREGROUND_COLOR)?
                .map(Color::from_argb_i32),
            background_color: buffer
                .get_int(key::BACKGROUND_COLOR)?
                .map(Color::from_argb_i32),
            opacity: get_f32(buffer, key::OPACITY)?,
            font_family: buffer.get_str(key::FONT_FAMILY)?.map(str::to_owned),
            font_size: get_f32(buffer, key::FONT_SIZE)?,
            font_size_multiplier: get_f32(buffer, key::FONT_SIZE_MULTIPLIER)?,
            font_weight: keyword(buffer, key::FONT_WEIGHT, "font weight", FontWeight::parse)?,
            font_style: keyword(buffer, key::FONT_STYLE, "font style", FontStyle::parse)?,
            font_feature_settings,
            allow_font_scaling: buffer.get_bool(key::ALLOW_FONT_SCALING)?,
            letter_spacing: get_f32(buffer, key::LETTER_SPACING)?,
            line_height: get_f32(buffer, key::LINE_HEIGHT)?,
            alignment: keyword(buffer, key::ALIGNMENT, "text alignment", TextAlign::parse)?,
            underline,
            strikethrough,
            text_shadow,
            layout_direction: keyword(
                buffer,
                key::LAYOUT_DIRECTION,
                "layout direction",
                LayoutDirection::parse,
            )?,
            role: keyword(buffer, key::ROLE, "role", AccessibilityRole::parse)?,
            accessibility_role: keyword(
                buffer,
                key::ACCESSIBILITY_ROLE,
                "accessibility role",
                AccessibilityRole::parse,
            )?,
            text_transform: keyword(
                buffer,
                key::TEXT_TRANSFORM,
                "text transform",
                TextTransform::parse,
            )?
            .unwrap_or_default(),
        })
    }

    /// Returns `true` if the fragment should react to presses as a link.
    pub fn is_link(&self) -> bool {
        self.role.or(self.accessibility_role) == Some(AccessibilityRole::Link)
    }
}

fn keyword<T>(
    buffer: &MapBuffer,
    key: u16,
    what: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, Error> {
    match buffer.get_str(key)? {
        Some(value) => parse(value)
            .map(Some)
            .ok_or_else(|| Error::bad_keyword(what, value)),
        None => Ok(None),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Wire doubles only carry layout dimensions, which are computed in f32."
)]
fn get_f32(buffer: &MapBuffer, key: u16) -> Result<Option<f32>, Error> {
    Ok(buffer
        .get_double(key)?
        .map(|value| value as f32)
        .filter(|value| !value.is_nan()))
}

fn parse_decoration_line(value: &str) -> Result<(bool, bool), Error> {
    let mut underline = false;
    let mut strikethrough = false;
    for word in value.split_whitespace() {
        match word {
            "none" => {}
            "underline" => underline = true,
            "line-through" | "strikethrough" => strikethrough = true,
            _ => return Err(Error::bad_keyword("text decoration line", value)),
        }
    }
    Ok((underline, strikethrough))
}

fn feature_settings(variants: &MapBuffer) -> Result<Option<String>, Error> {
    let mut features = Vec::with_capacity(variants.len());
    for (_, value) in variants.iter() {
        let MapValue::String(variant) = value else {
            return Err(Error::malformed("font variant", "entries must be strings"));
        };
        let tag = match variant.as_str() {
            "small-caps" => "'smcp'",
            "oldstyle-nums" => "'onum'",
            "lining-nums" => "'lnum'",
            "tabular-nums" => "'tnum'",
            "proportional-nums" => "'pnum'",
            other => return Err(Error::bad_keyword("font variant", other)),
        };
        features.push(tag);
    }
    Ok((!features.is_empty()).then(|| features.join(", ")))
}

fn hash_f32<H: Hasher>(value: f32, state: &mut H) {
    value.to_bits().hash(state);
}

fn hash_opt_f32<H: Hasher>(value: Option<f32>, state: &mut H) {
    value.map(f32::to_bits).hash(state);
}

impl Hash for TextShadow {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f32(self.offset_dx, state);
        hash_f32(self.offset_dy, state);
        hash_f32(self.radius, state);
        self.color.hash(state);
    }
}

impl Hash for TextAttributes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.color.hash(state);
        self.background_color.hash(state);
        hash_opt_f32(self.opacity, state);
        self.font_family.hash(state);
        hash_opt_f32(self.font_size, state);
        hash_opt_f32(self.font_size_multiplier, state);
        hash_opt_f32(self.font_weight.map(FontWeight::value), state);
        self.font_style.hash(state);
        self.font_feature_settings.hash(state);
        self.allow_font_scaling.hash(state);
        hash_opt_f32(self.letter_spacing, state);
        hash_opt_f32(self.line_height, state);
        self.alignment.hash(state);
        self.underline.hash(state);
        self.strikethrough.hash(state);
        self.text_shadow.hash(state);
        self.layout_direction.hash(state);
        self.role.hash(state);
        self.accessibility_role.hash(state);
        self.text_transform.hash(state);
    }
}

impl Hash for Fragment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.attributes.hash(state);
        self.is_attachment.hash(state);
        hash_f32(self.attachment_width, state);
        hash_f32(self.attachment_height, state);
        self.tag.hash(state);
    }
}

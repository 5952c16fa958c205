// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Declared writing direction of a fragment or paragraph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum LayoutDirection {
    /// Inherit the direction from the surrounding context (treated as left-to-right).
    #[default]
    Undefined,
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl LayoutDirection {
    /// Parses a layout direction keyword.
    ///
    /// ```
    /// use text_primitives::LayoutDirection;
    ///
    /// assert_eq!(LayoutDirection::parse("rtl"), Some(LayoutDirection::Rtl));
    /// assert_eq!(LayoutDirection::parse("auto"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "undefined" => Some(Self::Undefined),
            "ltr" => Some(Self::Ltr),
            "rtl" => Some(Self::Rtl),
            _ => None,
        }
    }

    /// Returns `true` only for an explicit right-to-left direction.
    pub fn is_rtl(self) -> bool {
        self == Self::Rtl
    }
}

/// Horizontal text alignment requested by a fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum TextAlign {
    /// Align to the start of the paragraph.
    #[default]
    Natural,
    /// Align to the physical left edge.
    Left,
    /// Center each line.
    Center,
    /// Align to the physical right edge.
    Right,
    /// Justify lines. Layout treats this as [`TextAlign::Natural`].
    Justified,
}

impl TextAlign {
    /// Parses a text alignment keyword (`auto` is accepted as an alias for `natural`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "natural" | "auto" => Some(Self::Natural),
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            "justified" => Some(Self::Justified),
            _ => None,
        }
    }
}

/// Case transformation applied to fragment text before it is flattened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum TextTransform {
    /// Leave the text as authored.
    #[default]
    None,
    /// Upper-case every character.
    Uppercase,
    /// Lower-case every character.
    Lowercase,
    /// Upper-case the first letter of each word.
    Capitalize,
}

impl TextTransform {
    /// Parses a text transform keyword (`unset` is accepted as an alias for `none`).
    ///
    /// ```
    /// use text_primitives::TextTransform;
    ///
    /// assert_eq!(TextTransform::parse("capitalize"), Some(TextTransform::Capitalize));
    /// assert_eq!(TextTransform::parse("unset"), Some(TextTransform::None));
    /// assert_eq!(TextTransform::parse("smallcaps"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "none" | "unset" => Some(Self::None),
            "uppercase" => Some(Self::Uppercase),
            "lowercase" => Some(Self::Lowercase),
            "capitalize" => Some(Self::Capitalize),
            _ => None,
        }
    }
}

/// Line breaking strategy for wrapped paragraphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum BreakStrategy {
    /// Break greedily at the last opportunity that fits.
    Simple,
    /// Favour fewer emergency breaks at the cost of more work.
    #[default]
    HighQuality,
    /// Keep the line count of the greedy result but even out line widths.
    Balanced,
}

impl BreakStrategy {
    /// Parses a break strategy keyword.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "simple" => Some(Self::Simple),
            "highQuality" => Some(Self::HighQuality),
            "balanced" => Some(Self::Balanced),
            _ => None,
        }
    }
}

/// How eagerly words may be hyphenated at line ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum HyphenationFrequency {
    /// Never insert hyphens.
    #[default]
    None,
    /// Hyphenate words that would otherwise overflow the line.
    Normal,
    /// Hyphenate whenever a word is split.
    Full,
}

impl HyphenationFrequency {
    /// Parses a hyphenation frequency keyword.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "none" => Some(Self::None),
            "normal" => Some(Self::Normal),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

/// Where an ellipsis is placed when a paragraph is truncated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum EllipsizeMode {
    /// Cut the text without an ellipsis.
    Clip,
    /// Elide the start of the last visible line.
    Head,
    /// Elide the end of the last visible line.
    #[default]
    Tail,
    /// Elide the middle of the last visible line.
    Middle,
}

impl EllipsizeMode {
    /// Parses an ellipsize mode keyword.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "clip" => Some(Self::Clip),
            "head" => Some(Self::Head),
            "tail" => Some(Self::Tail),
            "middle" => Some(Self::Middle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_keywords() {
        assert_eq!(BreakStrategy::parse("highQuality"), Some(BreakStrategy::HighQuality));
        assert_eq!(BreakStrategy::parse("high-quality"), None);
        assert_eq!(HyphenationFrequency::parse("full"), Some(HyphenationFrequency::Full));
        assert_eq!(EllipsizeMode::parse("middle"), Some(EllipsizeMode::Middle));
        assert_eq!(EllipsizeMode::parse("fade"), None);
    }

    #[test]
    fn alignment_aliases() {
        assert_eq!(TextAlign::parse("auto"), Some(TextAlign::Natural));
        assert_eq!(TextAlign::parse("start"), None);
        assert!(LayoutDirection::Rtl.is_rtl());
        assert!(!LayoutDirection::Undefined.is_rtl());
    }
}

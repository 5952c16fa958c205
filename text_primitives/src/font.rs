// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Visual weight class of a font, on a scale from 1.0 to 1000.0.
///
/// Fragments carry weights as keyword strings (`"bold"`, `"700"`); this keeps the numeric
/// value so that intermediate weights survive decoding unchanged.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct FontWeight(f32);

impl FontWeight {
    /// Weight value of 100.
    pub const THIN: Self = Self(100.0);

    /// Weight value of 300.
    pub const LIGHT: Self = Self(300.0);

    /// Weight value of 400. This is the default value.
    pub const NORMAL: Self = Self(400.0);

    /// Weight value of 500.
    pub const MEDIUM: Self = Self(500.0);

    /// Weight value of 700.
    pub const BOLD: Self = Self(700.0);

    /// Weight value of 900.
    pub const BLACK: Self = Self(900.0);

    /// Creates a new weight value.
    pub fn new(weight: f32) -> Self {
        Self(weight)
    }

    /// Returns the underlying weight value.
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns `true` for weights that a platform would render with a bold face.
    pub fn is_bold(self) -> bool {
        self.0 >= 600.0
    }

    /// Parses a font weight keyword.
    ///
    /// Accepts `normal`, `bold`, or a number between 1 and 1000 (after trimming ASCII
    /// whitespace). Anything else is rejected rather than coerced.
    ///
    /// ```
    /// use text_primitives::FontWeight;
    ///
    /// assert_eq!(FontWeight::parse("normal"), Some(FontWeight::NORMAL));
    /// assert_eq!(FontWeight::parse("bold"), Some(FontWeight::BOLD));
    /// assert_eq!(FontWeight::parse("850"), Some(FontWeight::new(850.0)));
    /// assert_eq!(FontWeight::parse("0"), None);
    /// assert_eq!(FontWeight::parse("heavy-ish"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Some(match s {
            "normal" => Self::NORMAL,
            "bold" => Self::BOLD,
            _ => {
                let value = s.parse::<f32>().ok()?;
                if !(1.0..=1000.0).contains(&value) {
                    return None;
                }
                Self(value)
            }
        })
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NORMAL {
            f.write_str("normal")
        } else if *self == Self::BOLD {
            f.write_str("bold")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Slant of a font face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Upright glyphs.
    #[default]
    Normal,
    /// Italic (or oblique) glyphs.
    Italic,
}

impl FontStyle {
    /// Parses a font style keyword. `oblique` is folded into [`FontStyle::Italic`].
    ///
    /// ```
    /// use text_primitives::FontStyle;
    ///
    /// assert_eq!(FontStyle::parse("italic"), Some(FontStyle::Italic));
    /// assert_eq!(FontStyle::parse("oblique"), Some(FontStyle::Italic));
    /// assert_eq!(FontStyle::parse("slanted"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "normal" => Some(Self::Normal),
            "italic" | "oblique" => Some(Self::Italic),
            _ => None,
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{FontStyle, FontWeight};

    #[test]
    fn weight_keywords_and_numbers() {
        assert_eq!(FontWeight::parse(" bold "), Some(FontWeight::BOLD));
        assert_eq!(FontWeight::parse("100"), Some(FontWeight::THIN));
        assert_eq!(FontWeight::parse("1000.5"), None);
        assert_eq!(FontWeight::parse(""), None);
        assert!(FontWeight::parse("600").unwrap().is_bold());
        assert!(!FontWeight::NORMAL.is_bold());
    }

    #[test]
    fn style_rejects_unknown() {
        assert_eq!(FontStyle::parse("normal"), Some(FontStyle::Normal));
        assert_eq!(FontStyle::parse("Italic"), None);
    }
}

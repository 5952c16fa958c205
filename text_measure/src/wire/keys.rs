// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reserved keys of the buffers exchanged with upstream producers.
//!
//! These values are part of the wire contract and must never be renumbered.

#![allow(missing_docs, reason = "Keys are named after the attribute they carry.")]

/// Keys of an attributed string buffer.
pub mod attributed_string {
    pub const HASH: u16 = 0;
    pub const STRING: u16 = 1;
    pub const FRAGMENTS: u16 = 2;
    pub const CACHE_ID: u16 = 3;
}

/// Keys of a single fragment buffer.
pub mod fragment {
    pub const STRING: u16 = 0;
    pub const REACT_TAG: u16 = 1;
    pub const IS_ATTACHMENT: u16 = 2;
    pub const WIDTH: u16 = 3;
    pub const HEIGHT: u16 = 4;
    pub const TEXT_ATTRIBUTES: u16 = 5;
}

/// Keys of a paragraph attributes buffer.
pub mod paragraph {
    pub const MAX_NUMBER_OF_LINES: u16 = 0;
    pub const ELLIPSIZE_MODE: u16 = 1;
    pub const TEXT_BREAK_STRATEGY: u16 = 2;
    pub const ADJUST_FONT_SIZE_TO_FIT: u16 = 3;
    pub const INCLUDE_FONT_PADDING: u16 = 4;
    pub const HYPHENATION_FREQUENCY: u16 = 5;
    pub const MINIMUM_FONT_SIZE: u16 = 6;
    pub const MAXIMUM_FONT_SIZE: u16 = 7;
}

/// Keys of a text attributes buffer.
pub mod text_attributes {
    pub const FOREGROUND_COLOR: u16 = 0;
    pub const BACKGROUND_COLOR: u16 = 1;
    pub const OPACITY: u16 = 2;
    pub const FONT_FAMILY: u16 = 3;
    pub const FONT_SIZE: u16 = 4;
    pub const FONT_SIZE_MULTIPLIER: u16 = 5;
    pub const FONT_WEIGHT: u16 = 6;
    pub const FONT_STYLE: u16 = 7;
    pub const FONT_VARIANT: u16 = 8;
    pub const ALLOW_FONT_SCALING: u16 = 9;
    pub const LETTER_SPACING: u16 = 10;
    pub const LINE_HEIGHT: u16 = 11;
    pub const ALIGNMENT: u16 = 12;
    pub const BEST_WRITING_DIRECTION: u16 = 13;
    pub const TEXT_DECORATION_COLOR: u16 = 14;
    pub const TEXT_DECORATION_LINE: u16 = 15;
    pub const TEXT_DECORATION_STYLE: u16 = 16;
    pub const TEXT_SHADOW_RADIUS: u16 = 18;
    pub const TEXT_SHADOW_COLOR: u16 = 19;
    pub const TEXT_SHADOW_OFFSET_DX: u16 = 20;
    pub const TEXT_SHADOW_OFFSET_DY: u16 = 21;
    pub const LAYOUT_DIRECTION: u16 = 22;
    pub const ACCESSIBILITY_ROLE: u16 = 23;
    pub const LINE_BREAK_STRATEGY: u16 = 24;
    pub const ROLE: u16 = 26;
    pub const TEXT_TRANSFORM: u16 = 27;
}

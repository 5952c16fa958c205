// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fundamental text property types.
//!
//! This crate is the vocabulary layer shared by the attributed-string decoder and the
//! layout engine: small, typed representations of the keyword-valued attributes that
//! fragments and paragraphs carry (weights, styles, directions, break strategies, …).
//!
//! Every keyword type has a `parse` function returning `None` for unknown input, so callers
//! can reject malformed attributes instead of silently coercing them.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use text_primitives::{BreakStrategy, FontWeight, TextAlign};
//!
//! assert_eq!(FontWeight::parse("700"), Some(FontWeight::BOLD));
//! assert_eq!(BreakStrategy::parse("balanced"), Some(BreakStrategy::Balanced));
//! assert_eq!(TextAlign::parse("justify"), None);
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

mod color;
mod font;
mod role;
mod text;

pub use color::Color;
pub use font::{FontStyle, FontWeight};
pub use role::AccessibilityRole;
pub use text::{
    BreakStrategy, EllipsizeMode, HyphenationFrequency, LayoutDirection, TextAlign, TextTransform,
};

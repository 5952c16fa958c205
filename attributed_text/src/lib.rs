// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributed Text is a flattened text buffer with prioritized attribute spans.
//!
//! Spans are validated against the text (in bounds, on `char` boundaries) when applied,
//! and can be walked as non-overlapping segments whose active spans come in application
//! order, which is what style composition needs.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
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

extern crate alloc;

mod attribute_segments;
mod attributed_text;
mod error;

pub use crate::attribute_segments::{AttributeSegments, Segment};
pub use crate::attributed_text::{AttributedText, Span};
pub use crate::error::{Endpoint, Error};

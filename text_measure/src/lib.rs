// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text Measure lays out and measures rich text.
//!
//! An [`AttributedString`] is a list of styled [`Fragment`]s, some of which may be inline
//! attachments. [`TextLayoutManager`] flattens it into a [`StyledText`] buffer with
//! prioritized style spans, breaks it into lines through a [`TextBackend`], optionally
//! shrinks its font sizes until it fits a line or height budget, and reports the size of
//! the text and the positions of its attachments.
//!
//! Everything crossing the public API is in density-independent points; layout runs in
//! device pixels using the configured [`DisplayMetrics`].
//!
//! ## Example
//!
//! ```
//! use text_measure::{
//!     AttributedString, Fragment, MeasureMode, ParagraphAttributes, TextLayoutManager,
//! };
//!
//! let manager = TextLayoutManager::default();
//! let text = AttributedString::new(vec![Fragment::new("Hello world")]);
//! let measurement = manager
//!     .measure(
//!         &text,
//!         &ParagraphAttributes::default(),
//!         200.0,
//!         MeasureMode::AtMost,
//!         0.0,
//!         MeasureMode::Undefined,
//!     )
//!     .unwrap();
//! assert!(measurement.size.width <= 200.0);
//! assert!(measurement.size.height > 0.0);
//! ```
//!
//! The wire format is a [`MapBuffer`](wire::MapBuffer); see
//! [`TextLayoutManager::measure_map_buffer`].
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

mod attachments;
mod cache;
mod config;
mod error;
mod fit;
mod lru_cache;
mod manager;
mod model;
mod spans;
mod units;

pub mod backend;
pub mod layout;
pub mod wire;

#[cfg(test)]
mod tests;

pub use attachments::{position_attachments, AttachmentPosition};
pub use backend::{SimpleBackend, SimpleMetrics, TextBackend};
pub use cache::{CacheKey, ContentKey, LayoutCache};
pub use config::LayoutConfig;
pub use error::{Error, SoftInvariantViolation};
pub use fit::{FitOutcome, FontFitAdjuster};
pub use layout::Layout;
pub use manager::{LayoutHandle, LineInfo, Measurement, TextLayoutManager};
pub use model::{
    AttributedString, CacheId, Fragment, ParagraphAttributes, Tag, TextAttributes, TextShadow,
};
pub use spans::{
    AttachmentBox, PriorityOrder, ResolvedStyle, Span, SpanBuilder, SpanKind, StyleRun,
    StyledText, ATTACHMENT_PLACEHOLDER,
};
pub use units::{DisplayMetrics, MeasureMode, Size};

pub use text_primitives;

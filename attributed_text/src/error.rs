// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Errors raised when a span range does not fit the text it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The provided range had `start > end`.
    #[error("invalid range {start}..{end}: start > end")]
    InvalidRange {
        /// Caller-provided start byte index.
        start: usize,
        /// Caller-provided end byte index.
        end: usize,
    },

    /// The range extends past the end of the text.
    #[error("range {start}..{end} out of bounds for len {len}")]
    InvalidBounds {
        /// Caller-provided start byte index.
        start: usize,
        /// Caller-provided end byte index.
        end: usize,
        /// Length of the text in bytes.
        len: usize,
    },

    /// One endpoint splits a UTF-8 encoded character.
    #[error("range {start}..{end}: {which} index {index} not on UTF-8 boundary")]
    NotOnCharBoundary {
        /// Caller-provided start byte index.
        start: usize,
        /// Caller-provided end byte index.
        end: usize,
        /// Which endpoint failed validation.
        which: Endpoint,
        /// The offending byte index.
        index: usize,
    },
}

/// Identifies which endpoint of a range failed boundary validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// The `start` endpoint of the range.
    Start,

    /// The `end` endpoint of the range.
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

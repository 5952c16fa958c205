// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::model::CacheId;

/// Errors that fail a measurement call.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The wire buffer or one of its attributes could not be decoded.
    #[error("malformed {what}: {detail}")]
    MalformedInput {
        /// The buffer or attribute being decoded.
        what: &'static str,
        /// What was wrong with it.
        detail: String,
    },

    /// The attributed string referenced a cache id with no installed buffer.
    ///
    /// This is a cache miss the caller resolves by re-supplying fragments; retrying the same
    /// request cannot succeed.
    #[error("no cached buffer installed for cache id {0}")]
    StaleCacheReference(CacheId),

    /// A span range did not fit the flattened buffer.
    #[error(transparent)]
    Span(#[from] attributed_text::Error),
}

impl Error {
    pub(crate) fn malformed(what: &'static str, detail: impl Into<String>) -> Self {
        Self::MalformedInput {
            what,
            detail: detail.into(),
        }
    }

    pub(crate) fn bad_keyword(what: &'static str, value: &str) -> Self {
        Self::malformed(what, format!("unrecognized value {value:?}"))
    }
}

/// A condition that should not happen but does not fail the call.
///
/// Violations are logged and recorded on the [`Layout`](crate::Layout) that observed them.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum SoftInvariantViolation {
    /// The backend reported a negative or non-finite text width; it was clamped to 0.
    InvalidTextWidth {
        /// The width the backend reported, in pixels.
        reported: f32,
    },
}

impl fmt::Display for SoftInvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTextWidth { reported } => write!(f, "text width is invalid: {reported}"),
        }
    }
}

impl SoftInvariantViolation {
    pub(crate) fn report(self) -> Self {
        tracing::warn!(violation = %self, "soft invariant violation during text layout");
        self
    }
}

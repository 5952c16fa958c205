// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod env;
mod samples;

pub(crate) use env::{at_most, TestEnv};
pub(crate) use samples::{attributed_buffer, directed, paragraph_buffer, sized};

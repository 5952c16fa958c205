// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_attachments;
mod test_cache;
mod test_fit;
mod test_spans;
mod utils;

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use text_primitives::{LayoutDirection, TextAlign};

use crate::wire::keys;
use crate::wire::{MapBuffer, MapBufferBuilder};
use crate::{Fragment, TextAttributes};

pub(crate) fn sized(text: &str, font_size: f32) -> Fragment {
    Fragment::new(text).with_attributes(TextAttributes {
        font_size: Some(font_size),
        ..TextAttributes::default()
    })
}

pub(crate) fn directed(
    text: &str,
    direction: LayoutDirection,
    alignment: Option<TextAlign>,
) -> Fragment {
    Fragment::new(text).with_attributes(TextAttributes {
        layout_direction: Some(direction),
        alignment,
        ..TextAttributes::default()
    })
}

/// Encodes fragments of plain text with an optional font size.
pub(crate) fn attributed_buffer(fragments: &[(&str, Option<f64>)]) -> MapBuffer {
    let mut list = MapBufferBuilder::new();
    for (index, (text, font_size)) in fragments.iter().enumerate() {
        let mut attributes = MapBufferBuilder::new();
        if let Some(size) = font_size {
            attributes.put_double(keys::text_attributes::FONT_SIZE, *size);
        }
        let fragment = MapBufferBuilder::new()
            .put_string(keys::fragment::STRING, *text)
            .put_int(keys::fragment::REACT_TAG, 10 + i32::try_from(index).unwrap())
            .put_map(keys::fragment::TEXT_ATTRIBUTES, attributes.build())
            .build();
        list.put_map(u16::try_from(index).unwrap(), fragment);
    }
    MapBufferBuilder::new()
        .put_int(keys::attributed_string::HASH, 1234)
        .put_map(keys::attributed_string::FRAGMENTS, list.build())
        .build()
}

pub(crate) fn paragraph_buffer(max_lines: i32, ellipsize: &str) -> MapBuffer {
    MapBufferBuilder::new()
        .put_int(keys::paragraph::MAX_NUMBER_OF_LINES, max_lines)
        .put_string(keys::paragraph::ELLIPSIZE_MODE, ellipsize)
        .put_bool(keys::paragraph::INCLUDE_FONT_PADDING, true)
        .build()
}

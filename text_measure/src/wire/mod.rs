// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binary key/value buffers used to ship attributed strings and paragraph attributes.
//!
//! A buffer is a header, a table of fixed-size buckets sorted by key, and a trailing
//! region of variable-sized data:
//!
//! ```text
//! header:  alignment: u16 = 0x00FE | count: u16 | dynamic data size: u32
//! bucket:  key: u16 | type: u16 | value: [u8; 8]
//! dynamic: (length: i32 | bytes)*
//! ```
//!
//! All integers are little-endian. Booleans, ints, doubles and longs live inline in the
//! bucket. Strings and nested maps store an `i32` offset into the dynamic region, where the
//! payload is prefixed by its byte length.

pub mod keys;

use std::collections::BTreeMap;

use crate::Error;

const ALIGNMENT: u16 = 0x00FE;
const HEADER_SIZE: usize = 8;
const BUCKET_SIZE: usize = 12;
const MAX_DEPTH: usize = 32;

const TYPE_BOOL: u16 = 0;
const TYPE_INT: u16 = 1;
const TYPE_DOUBLE: u16 = 2;
const TYPE_STRING: u16 = 3;
const TYPE_MAP: u16 = 4;
const TYPE_LONG: u16 = 5;

/// A single value stored in a [`MapBuffer`].
#[derive(Clone, Debug, PartialEq)]
pub enum MapValue {
    /// Type code 0.
    Bool(bool),
    /// Type code 1.
    Int(i32),
    /// Type code 2.
    Double(f64),
    /// Type code 3.
    String(String),
    /// Type code 4.
    Map(MapBuffer),
    /// Type code 5.
    Long(i64),
}

impl MapValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Map(_) => "map",
            Self::Long(_) => "long",
        }
    }

    fn type_code(&self) -> u16 {
        match self {
            Self::Bool(_) => TYPE_BOOL,
            Self::Int(_) => TYPE_INT,
            Self::Double(_) => TYPE_DOUBLE,
            Self::String(_) => TYPE_STRING,
            Self::Map(_) => TYPE_MAP,
            Self::Long(_) => TYPE_LONG,
        }
    }
}

/// A decoded key/value buffer.
///
/// Entries are kept sorted by key, matching their order on the wire.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapBuffer {
    entries: Vec<(u16, MapValue)>,
}

macro_rules! typed_getter {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$doc])*
        ///
        /// Returns `Ok(None)` when the key is absent and an error when it holds another type.
        pub fn $name(&self, key: u16) -> Result<Option<$ty>, Error> {
            match self.get(key) {
                None => Ok(None),
                Some(MapValue::$variant(value)) => Ok(Some(*value)),
                Some(other) => Err(type_mismatch(key, stringify!($variant), other)),
            }
        }
    };
}

impl MapBuffer {
    /// Decodes a buffer from its wire representation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        decode(bytes, 0)
    }

    /// Encodes the buffer into its wire representation.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buckets = Vec::with_capacity(self.entries.len() * BUCKET_SIZE);
        let mut dynamic = Vec::new();
        for (key, value) in &self.entries {
            buckets.extend_from_slice(&key.to_le_bytes());
            buckets.extend_from_slice(&value.type_code().to_le_bytes());
            let mut slot = [0_u8; 8];
            match value {
                MapValue::Bool(value) => slot[0] = u8::from(*value),
                MapValue::Int(value) => slot[..4].copy_from_slice(&value.to_le_bytes()),
                MapValue::Double(value) => slot.copy_from_slice(&value.to_le_bytes()),
                MapValue::Long(value) => slot.copy_from_slice(&value.to_le_bytes()),
                MapValue::String(value) => {
                    slot[..4].copy_from_slice(&offset_of(&dynamic));
                    push_payload(&mut dynamic, value.as_bytes());
                }
                MapValue::Map(value) => {
                    slot[..4].copy_from_slice(&offset_of(&dynamic));
                    push_payload(&mut dynamic, &value.to_bytes());
                }
            }
            buckets.extend_from_slice(&slot);
        }

        let count = u16::try_from(self.entries.len()).unwrap_or(u16::MAX);
        let dynamic_size = u32::try_from(dynamic.len()).unwrap_or(u32::MAX);
        let mut out = Vec::with_capacity(HEADER_SIZE + buckets.len() + dynamic.len());
        out.extend_from_slice(&ALIGNMENT.to_le_bytes());
        out.extend_from_slice(&count.to_le_bytes());
        out.extend_from_slice(&dynamic_size.to_le_bytes());
        out.extend_from_slice(&buckets);
        out.extend_from_slice(&dynamic);
        out
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the buffer has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if an entry exists for `key`.
    pub fn contains(&self, key: u16) -> bool {
        self.get(key).is_some()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: u16) -> Option<&MapValue> {
        self.entries
            .binary_search_by_key(&key, |(k, _)| *k)
            .ok()
            .map(|index| &self.entries[index].1)
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &MapValue)> + '_ {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    typed_getter!(
        /// Returns the boolean stored under `key`.
        get_bool, Bool, bool
    );
    typed_getter!(
        /// Returns the int stored under `key`.
        get_int, Int, i32
    );
    typed_getter!(
        /// Returns the double stored under `key`.
        get_double, Double, f64
    );
    typed_getter!(
        /// Returns the long stored under `key`.
        get_long, Long, i64
    );

    /// Returns the string stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent and an error when it holds another type.
    pub fn get_str(&self, key: u16) -> Result<Option<&str>, Error> {
        match self.get(key) {
            None => Ok(None),
            Some(MapValue::String(value)) => Ok(Some(value)),
            Some(other) => Err(type_mismatch(key, "String", other)),
        }
    }

    /// Returns the nested map stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent and an error when it holds another type.
    pub fn get_map(&self, key: u16) -> Result<Option<&Self>, Error> {
        match self.get(key) {
            None => Ok(None),
            Some(MapValue::Map(value)) => Ok(Some(value)),
            Some(other) => Err(type_mismatch(key, "Map", other)),
        }
    }
}

fn type_mismatch(key: u16, expected: &str, found: &MapValue) -> Error {
    Error::malformed(
        "map buffer",
        format!(
            "key {key} holds a {} where a {expected} was expected",
            found.type_name()
        ),
    )
}

fn offset_of(dynamic: &[u8]) -> [u8; 4] {
    i32::try_from(dynamic.len())
        .unwrap_or(i32::MAX)
        .to_le_bytes()
}

fn push_payload(dynamic: &mut Vec<u8>, payload: &[u8]) {
    let len = i32::try_from(payload.len()).unwrap_or(i32::MAX);
    dynamic.extend_from_slice(&len.to_le_bytes());
    dynamic.extend_from_slice(payload);
}

/// Builds a [`MapBuffer`] one entry at a time.
///
/// Setting the same key twice keeps the last value.
#[derive(Clone, Debug, Default)]
pub struct MapBufferBuilder {
    entries: BTreeMap<u16, MapValue>,
}

impl MapBufferBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an arbitrary value.
    pub fn put(&mut self, key: u16, value: MapValue) -> &mut Self {
        self.entries.insert(key, value);
        self
    }

    /// Stores a boolean.
    pub fn put_bool(&mut self, key: u16, value: bool) -> &mut Self {
        self.put(key, MapValue::Bool(value))
    }

    /// Stores a 32-bit integer.
    pub fn put_int(&mut self, key: u16, value: i32) -> &mut Self {
        self.put(key, MapValue::Int(value))
    }

    /// Stores a double.
    pub fn put_double(&mut self, key: u16, value: f64) -> &mut Self {
        self.put(key, MapValue::Double(value))
    }

    /// Stores a 64-bit integer.
    pub fn put_long(&mut self, key: u16, value: i64) -> &mut Self {
        self.put(key, MapValue::Long(value))
    }

    /// Stores a string.
    pub fn put_string(&mut self, key: u16, value: impl Into<String>) -> &mut Self {
        self.put(key, MapValue::String(value.into()))
    }

    /// Stores a nested map.
    pub fn put_map(&mut self, key: u16, value: MapBuffer) -> &mut Self {
        self.put(key, MapValue::Map(value))
    }

    /// Finishes the buffer.
    pub fn build(&mut self) -> MapBuffer {
        MapBuffer {
            entries: core::mem::take(&mut self.entries).into_iter().collect(),
        }
    }
}

fn decode(bytes: &[u8], depth: usize) -> Result<MapBuffer, Error> {
    if depth > MAX_DEPTH {
        return Err(malformed(format!("maps nested deeper than {MAX_DEPTH}")));
    }
    if bytes.len() < HEADER_SIZE {
        return Err(malformed(format!(
            "{} bytes is too short for a header",
            bytes.len()
        )));
    }
    let alignment = read_u16(bytes, 0)?;
    if alignment != ALIGNMENT {
        return Err(malformed(format!("bad alignment marker {alignment:#06x}")));
    }
    let count = usize::from(read_u16(bytes, 2)?);
    let dynamic_size = read_u32(bytes, 4)? as usize;
    let dynamic_start = HEADER_SIZE + count * BUCKET_SIZE;
    let expected_len = dynamic_start + dynamic_size;
    if bytes.len() != expected_len {
        return Err(malformed(format!(
            "expected {expected_len} bytes for {count} entries, found {}",
            bytes.len()
        )));
    }
    let dynamic = &bytes[dynamic_start..];

    let mut entries = Vec::with_capacity(count);
    for index in 0..count {
        let base = HEADER_SIZE + index * BUCKET_SIZE;
        let key = read_u16(bytes, base)?;
        if let Some((previous, _)) = entries.last() {
            if *previous >= key {
                return Err(malformed(format!(
                    "key {key} follows key {previous}; keys must be strictly ascending"
                )));
            }
        }
        let value_type = read_u16(bytes, base + 2)?;
        let slot = base + 4;
        let value = match value_type {
            TYPE_BOOL => MapValue::Bool(read_array::<1>(bytes, slot)?[0] != 0),
            TYPE_INT => MapValue::Int(i32::from_le_bytes(read_array(bytes, slot)?)),
            TYPE_DOUBLE => MapValue::Double(f64::from_le_bytes(read_array(bytes, slot)?)),
            TYPE_LONG => MapValue::Long(i64::from_le_bytes(read_array(bytes, slot)?)),
            TYPE_STRING => {
                let payload = read_payload(dynamic, bytes, slot)?;
                let value = core::str::from_utf8(payload)
                    .map_err(|_| malformed(format!("string for key {key} is not UTF-8")))?;
                MapValue::String(value.to_owned())
            }
            TYPE_MAP => {
                let payload = read_payload(dynamic, bytes, slot)?;
                MapValue::Map(decode(payload, depth + 1)?)
            }
            _ => {
                return Err(malformed(format!(
                    "unsupported value type {value_type} for key {key}"
                )));
            }
        };
        entries.push((key, value));
    }
    Ok(MapBuffer { entries })
}

fn malformed(detail: String) -> Error {
    Error::malformed("map buffer", detail)
}

fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> Result<[u8; N], Error> {
    bytes
        .get(offset..offset + N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| malformed(format!("read of {N} bytes at {offset} is out of bounds")))
}

fn read_u16(bytes: &[u8], offset: usize) -> Result<u16, Error> {
    Ok(u16::from_le_bytes(read_array(bytes, offset)?))
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, Error> {
    Ok(u32::from_le_bytes(read_array(bytes, offset)?))
}

fn read_payload<'a>(dynamic: &'a [u8], bytes: &[u8], slot: usize) -> Result<&'a [u8], Error> {
    let offset = i32::from_le_bytes(read_array(bytes, slot)?);
    let offset = usize::try_from(offset)
        .map_err(|_| malformed(format!("negative dynamic offset {offset}")))?;
    let len = i32::from_le_bytes(read_array(dynamic, offset)?);
    let len =
        usize::try_from(len).map_err(|_| malformed(format!("negative payload length {len}")))?;
    let start = offset + 4;
    dynamic.get(start..start + len).ok_or_else(|| {
        malformed(format!(
            "payload of {len} bytes at {start} overruns the dynamic region"
        ))
    })
}

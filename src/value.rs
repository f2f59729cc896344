//! Tagged column values.
//!
//! The engine returns dynamically typed columns; on the wire every
//! non-null value travels as its textual form plus a 4-byte type tag,
//! so the remote client sees the kind without a binary encoding switch.
//! The tags follow SQLite's fundamental type enumeration.

use std::borrow::Cow;

/// Type tag for integer values.
pub const TYPE_TAG_INTEGER: u32 = 1;
/// Type tag for float values.
pub const TYPE_TAG_FLOAT: u32 = 2;
/// Type tag for text values.
pub const TYPE_TAG_TEXT: u32 = 3;
/// Type tag for blob values.
pub const TYPE_TAG_BLOB: u32 = 4;
/// Type tag for null; also the fixed declared type of every column.
pub const TYPE_TAG_NULL: u32 = 5;

/// A single column value produced by the embedded engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// The wire type tag for this value's kind.
    #[inline]
    pub fn type_tag(&self) -> u32 {
        match self {
            Value::Null => TYPE_TAG_NULL,
            Value::Integer(_) => TYPE_TAG_INTEGER,
            Value::Float(_) => TYPE_TAG_FLOAT,
            Value::Text(_) => TYPE_TAG_TEXT,
            Value::Blob(_) => TYPE_TAG_BLOB,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Display form carried inside the value's block, or `None` for null.
    ///
    /// Numbers render as decimal text; text and blobs pass their bytes
    /// through unchanged.
    pub fn wire_bytes(&self) -> Option<Cow<'_, [u8]>> {
        match self {
            Value::Null => None,
            Value::Integer(v) => Some(Cow::Owned(v.to_string().into_bytes())),
            Value::Float(v) => Some(Cow::Owned(v.to_string().into_bytes())),
            Value::Text(s) => Some(Cow::Borrowed(s.as_bytes())),
            Value::Blob(b) => Some(Cow::Borrowed(b)),
        }
    }
}

impl From<rusqlite::types::ValueRef<'_>> for Value {
    fn from(v: rusqlite::types::ValueRef<'_>) -> Self {
        use rusqlite::types::ValueRef;
        match v {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(f) => Value::Float(f),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        }
    }
}

//! lookup — результат поиска поля в записи.
//!
//! Decoders never return a bare Option: callers and tests need to tell a
//! missing field apart from a record that cannot be decoded at all.

use serde::Serialize;
use std::fmt;

/// Outcome of a single field lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLookup {
    Found(String),
    /// Record is well-formed but does not define the field.
    NotFound,
    /// Record (or the part of it up to the field) cannot be decoded.
    Unsupported(Unsupported),
}

impl FieldLookup {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, FieldLookup::Found(_))
    }

    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, FieldLookup::Unsupported(_))
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            FieldLookup::Found(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Collapse to "a value or nothing".
    pub fn into_value(self) -> Option<String> {
        match self {
            FieldLookup::Found(v) => Some(v),
            _ => None,
        }
    }
}

/// Why a record could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unsupported {
    /// No decoder for this structure type.
    RecordType(u8),
    /// Version byte selects a layout outside the known set.
    TableFormat(u8),
    /// Invalid type tag at `offset` in a key/type/value table.
    FieldType { offset: usize, tag: u8 },
    /// Structure needed at least `needed` bytes but only `length` are declared.
    Truncated { length: usize, needed: usize },
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unsupported::RecordType(t) => write!(f, "unsupported record type 0x{:02x}", t),
            Unsupported::TableFormat(v) => write!(f, "unsupported table version 0x{:02x}", v),
            Unsupported::FieldType { offset, tag } => {
                write!(f, "unsupported field type 0x{:x} at offset {}", tag, offset)
            }
            Unsupported::Truncated { length, needed } => write!(
                f,
                "record truncated: length {} B, need {} B",
                length, needed
            ),
        }
    }
}

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use super::header::Record;

/// Ширина поля для примитива извлечения.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldWidth {
    /// One byte: a string-set index if it names an existing string, otherwise a number.
    Inferred,
    Byte,
    Word,
    DWord,
}

impl FieldWidth {
    /// Map a raw width (0 = inferred, 1/2/4 = scalar bytes). Other values return None.
    pub fn from_raw(n: usize) -> Option<Self> {
        match n {
            0 => Some(FieldWidth::Inferred),
            1 => Some(FieldWidth::Byte),
            2 => Some(FieldWidth::Word),
            4 => Some(FieldWidth::DWord),
            _ => None,
        }
    }

    /// Bytes occupied in the formatted area.
    #[inline]
    pub fn size(self) -> usize {
        match self {
            FieldWidth::Inferred | FieldWidth::Byte => 1,
            FieldWidth::Word => 2,
            FieldWidth::DWord => 4,
        }
    }
}

/// Decode the field at `offset` of the formatted area as text.
///
/// Scalars are little-endian and rendered in decimal. Returns None if the
/// field does not fit inside the record's declared length.
pub fn parse_field(record: &Record<'_>, offset: usize, width: FieldWidth) -> Option<String> {
    let end = offset.checked_add(width.size())?;
    let raw = record.formatted().get(offset..end)?;
    let text = match width {
        FieldWidth::Inferred => match record.string(raw[0]) {
            Some(s) => String::from_utf8_lossy(s).into_owned(),
            None => raw[0].to_string(),
        },
        FieldWidth::Byte => raw[0].to_string(),
        FieldWidth::Word => LittleEndian::read_u16(raw).to_string(),
        FieldWidth::DWord => LittleEndian::read_u32(raw).to_string(),
    };
    Some(text)
}

//! intel/platform — key-based Intel OEM tables (version top bits 001 / 010).
//!
//! Layout: [generic header][Platform u8][Version u8][payload ...]
//! - key/value (0x20): payload is (key u8, value u8) pairs;
//! - key/type/value (0x40): payload is [key u8][tag u8][value: 1/2/4 B scalar or 1 B string index].
//!
//! Keys and string values are string-set indices. Every walk is bounded by the
//! record's declared length through `Cursor`.

use log::{debug, warn};

use crate::consts::{
    FIELD_TYPE_BYTE, FIELD_TYPE_DWORD, FIELD_TYPE_STRING, FIELD_TYPE_WORD, OFF_PLATFORM,
    OFF_VERSION, PLATFORM_HDR_SIZE,
};
use crate::lookup::{FieldLookup, Unsupported};
use crate::record::{parse_field, Cursor, FieldWidth, Record};

use super::{DecodedField, TableFormat};

/// Value kind in a key/type/value entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Byte,
    Word,
    DWord,
    String,
}

impl FieldType {
    /// Parse a type tag; 0 and anything past String are invalid.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            FIELD_TYPE_BYTE => Some(FieldType::Byte),
            FIELD_TYPE_WORD => Some(FieldType::Word),
            FIELD_TYPE_DWORD => Some(FieldType::DWord),
            FIELD_TYPE_STRING => Some(FieldType::String),
            _ => None,
        }
    }

    /// Width of the value in the formatted area: 1 << (tag - 1) for scalars,
    /// a single string-set index byte for strings.
    pub fn width(self) -> FieldWidth {
        match self {
            FieldType::Byte => FieldWidth::Byte,
            FieldType::Word => FieldWidth::Word,
            FieldType::DWord => FieldWidth::DWord,
            FieldType::String => FieldWidth::Inferred,
        }
    }
}

/// One decoded key/type/value entry (value not yet rendered).
#[derive(Debug, Clone)]
struct KtvEntry {
    key: String,
    field_type: FieldType,
    value_off: usize,
}

/// Field lookup in a key-based table.
///
/// "Platform" and "Version" come from the header extension and resolve the
/// same way for both layouts; everything else depends on the layout.
pub fn decode_platform_table(record: &Record<'_>, field: &str) -> FieldLookup {
    let Some(version) = record.byte_at(OFF_VERSION) else {
        return truncated(record, PLATFORM_HDR_SIZE);
    };
    let scan: fn(&Record<'_>, &str) -> FieldLookup = match TableFormat::classify(version) {
        TableFormat::KeyValue => kv_lookup,
        TableFormat::KeyTypeValue => ktv_lookup,
        _ => return FieldLookup::Unsupported(Unsupported::TableFormat(version)),
    };

    match field {
        "Platform" => return header_field(record, OFF_PLATFORM, FieldWidth::Inferred),
        "Version" => return header_field(record, OFF_VERSION, FieldWidth::Byte),
        _ => {}
    }

    if record.length() <= PLATFORM_HDR_SIZE {
        warn!(
            "no fields defined for table 0x{:02x}, DMI length: {}",
            record.record_type(),
            record.length()
        );
        return FieldLookup::NotFound;
    }

    scan(record, field)
}

/// Header extension plus every entry of a key-based table, in payload order.
/// Stops at the first malformed entry and reports it.
pub fn platform_fields(record: &Record<'_>) -> (Vec<DecodedField>, Option<Unsupported>) {
    let mut out = Vec::new();
    let Some(version) = record.byte_at(OFF_VERSION) else {
        return (
            out,
            Some(Unsupported::Truncated {
                length: record.length(),
                needed: PLATFORM_HDR_SIZE,
            }),
        );
    };
    let format = TableFormat::classify(version);
    if !matches!(format, TableFormat::KeyValue | TableFormat::KeyTypeValue) {
        return (out, Some(Unsupported::TableFormat(version)));
    }

    for (name, off, width) in [
        ("Platform", OFF_PLATFORM, FieldWidth::Inferred),
        ("Version", OFF_VERSION, FieldWidth::Byte),
    ] {
        if let Some(value) = parse_field(record, off, width) {
            out.push(DecodedField::new(name, value));
        }
    }
    if record.length() <= PLATFORM_HDR_SIZE {
        return (out, None);
    }

    if format == TableFormat::KeyValue {
        let entries = (record.length() - PLATFORM_HDR_SIZE) / 2;
        for i in 0..entries {
            let off = PLATFORM_HDR_SIZE + i * 2;
            if let (Some(key), Some(value)) = (
                parse_field(record, off, FieldWidth::Inferred),
                parse_field(record, off + 1, FieldWidth::Inferred),
            ) {
                out.push(DecodedField { name: key, value });
            }
        }
        return (out, None);
    }

    let mut cur = Cursor::at(record.formatted(), PLATFORM_HDR_SIZE);
    while !cur.is_empty() {
        let entry = match read_ktv_entry(record, &mut cur) {
            Ok(e) => e,
            Err(issue) => return (out, Some(issue)),
        };
        if let Some(value) = parse_field(record, entry.value_off, entry.field_type.width()) {
            out.push(DecodedField {
                name: entry.key,
                value,
            });
        }
    }
    (out, None)
}

// ---------------- key/value ----------------

fn kv_lookup(record: &Record<'_>, field: &str) -> FieldLookup {
    let entries = (record.length() - PLATFORM_HDR_SIZE) / 2;

    // Обходим пары с конца: при повторе ключа побеждает последняя пара.
    for i in (0..entries).rev() {
        let off = PLATFORM_HDR_SIZE + (i << 1);
        match parse_field(record, off, FieldWidth::Inferred) {
            Some(key) if key == field => {
                return match parse_field(record, off + 1, FieldWidth::Inferred) {
                    Some(v) => FieldLookup::Found(v),
                    None => truncated(record, off + 2),
                };
            }
            _ => continue,
        }
    }

    debug!("key/value table: field {} not present", field);
    FieldLookup::NotFound
}

// ---------------- key/type/value ----------------

fn ktv_lookup(record: &Record<'_>, field: &str) -> FieldLookup {
    let mut cur = Cursor::at(record.formatted(), PLATFORM_HDR_SIZE);

    while !cur.is_empty() {
        let entry = match read_ktv_entry(record, &mut cur) {
            Ok(e) => e,
            Err(issue) => return FieldLookup::Unsupported(issue),
        };
        if entry.key != field {
            continue;
        }
        let width = entry.field_type.width();
        return match parse_field(record, entry.value_off, width) {
            Some(v) => FieldLookup::Found(v),
            None => truncated(record, entry.value_off + width.size()),
        };
    }

    debug!("key/type/value table: field {} not present", field);
    FieldLookup::NotFound
}

/// Read one [key][tag][value] entry and leave the cursor at the next one.
///
/// The tag is validated before the key is acted on, so a malformed entry
/// stops the scan even when its key is the one being looked up.
fn read_ktv_entry(record: &Record<'_>, cur: &mut Cursor<'_>) -> Result<KtvEntry, Unsupported> {
    let key_off = cur.position();
    let key_idx = cur.read_u8().ok_or(Unsupported::Truncated {
        length: record.length(),
        needed: key_off + 1,
    })?;
    let key = match record.string(key_idx) {
        Some(s) => String::from_utf8_lossy(s).into_owned(),
        None => key_idx.to_string(),
    };

    let tag_off = cur.position();
    let tag = cur.read_u8().ok_or(Unsupported::Truncated {
        length: record.length(),
        needed: tag_off + 1,
    })?;
    let field_type = FieldType::from_tag(tag).ok_or(Unsupported::FieldType {
        offset: tag_off,
        tag,
    })?;

    let value_off = cur.position();
    let size = field_type.width().size();
    cur.skip(size).ok_or(Unsupported::Truncated {
        length: record.length(),
        needed: value_off + size,
    })?;

    Ok(KtvEntry {
        key,
        field_type,
        value_off,
    })
}

// ---------------- helpers ----------------

fn header_field(record: &Record<'_>, off: usize, width: FieldWidth) -> FieldLookup {
    match parse_field(record, off, width) {
        Some(v) => FieldLookup::Found(v),
        None => truncated(record, off + width.size()),
    }
}

#[inline]
fn truncated(record: &Record<'_>, needed: usize) -> FieldLookup {
    FieldLookup::Unsupported(Unsupported::Truncated {
        length: record.length(),
        needed,
    })
}

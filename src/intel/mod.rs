//! intel — декодер OEM-записей Intel (SMBIOS type 0x94).
//!
//! The version byte (offset 5) selects one of three layouts:
//! - legacy.rs   — fixed layout, 22 single-byte fields (top bits 000)
//! - platform.rs — key/value (001) and key/type/value (010) tables
//!
//! Other top-bit patterns are rejected as unsupported.

pub mod legacy;
pub mod platform;

use log::{debug, warn};
use serde::Serialize;

use crate::consts::{
    FORMAT_FIELD_MASK, FORMAT_FIXED_TABLE, FORMAT_KTV_TABLE, FORMAT_KV_TABLE, INTEL_SMBIOS_TYPE,
    OFF_VERSION, PLATFORM_HDR_SIZE,
};
use crate::lookup::{FieldLookup, Unsupported};
use crate::metrics::record_lookup;
use crate::record::Record;

pub use legacy::INTEL_LEGACY_LAYOUT;
pub use platform::{decode_platform_table, FieldType};

/// Table layout selected by the version byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableFormat {
    Fixed,
    KeyValue,
    KeyTypeValue,
    /// Raw version byte with an unknown layout selector.
    Unsupported(u8),
}

impl TableFormat {
    pub fn classify(version: u8) -> Self {
        match version & FORMAT_FIELD_MASK {
            FORMAT_FIXED_TABLE => TableFormat::Fixed,
            FORMAT_KV_TABLE => TableFormat::KeyValue,
            FORMAT_KTV_TABLE => TableFormat::KeyTypeValue,
            _ => TableFormat::Unsupported(version),
        }
    }

    /// Classify a record; None if it is too short to carry a version byte.
    pub fn of(record: &Record<'_>) -> Option<Self> {
        record.byte_at(OFF_VERSION).map(Self::classify)
    }
}

/// Name/value pair produced by a dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedField {
    pub name: String,
    pub value: String,
}

impl DecodedField {
    pub fn new(name: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// Every field a record defines, plus the reason the walk stopped early (if it did).
#[derive(Debug, Clone, Serialize)]
pub struct FieldDump {
    pub record_type: u8,
    pub handle: u16,
    pub format: Option<TableFormat>,
    pub fields: Vec<DecodedField>,
    pub issue: Option<Unsupported>,
}

/// Decode one field of an Intel OEM record.
pub fn intel_dmi_parser(record: &Record<'_>, field: &str) -> FieldLookup {
    let res = match record.record_type() {
        INTEL_SMBIOS_TYPE => decode_intel_oem(record, field),
        other => FieldLookup::Unsupported(Unsupported::RecordType(other)),
    };

    match &res {
        FieldLookup::Found(_) => {}
        FieldLookup::NotFound => debug!(
            "unknown field {} for table 0x{:02x} (handle 0x{:04x})",
            field,
            record.record_type(),
            record.handle()
        ),
        FieldLookup::Unsupported(why) => warn!(
            "table 0x{:02x} (handle 0x{:04x}), field {}: {}",
            record.record_type(),
            record.handle(),
            field,
            why
        ),
    }
    record_lookup(&res);
    res
}

fn decode_intel_oem(record: &Record<'_>, field: &str) -> FieldLookup {
    match TableFormat::of(record) {
        None => FieldLookup::Unsupported(Unsupported::Truncated {
            length: record.length(),
            needed: PLATFORM_HDR_SIZE,
        }),
        Some(TableFormat::Fixed) => legacy::legacy_lookup(record, field),
        Some(_) => decode_platform_table(record, field),
    }
}

/// Dump all fields of an Intel OEM record.
pub fn intel_dmi_fields(record: &Record<'_>) -> FieldDump {
    let mut dump = FieldDump {
        record_type: record.record_type(),
        handle: record.handle(),
        format: TableFormat::of(record),
        fields: Vec::new(),
        issue: None,
    };

    if record.record_type() != INTEL_SMBIOS_TYPE {
        dump.issue = Some(Unsupported::RecordType(record.record_type()));
        return dump;
    }

    match dump.format {
        Some(TableFormat::Fixed) => dump.fields = legacy::legacy_fields(record),
        _ => {
            let (fields, issue) = platform::platform_fields(record);
            dump.fields = fields;
            dump.issue = issue;
        }
    }
    if let Some(why) = &dump.issue {
        warn!("dump of handle 0x{:04x} stopped: {}", record.handle(), why);
    }
    dump
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uses_top_three_bits() {
        assert_eq!(TableFormat::classify(0x00), TableFormat::Fixed);
        assert_eq!(TableFormat::classify(0x1F), TableFormat::Fixed);
        assert_eq!(TableFormat::classify(0x21), TableFormat::KeyValue);
        assert_eq!(TableFormat::classify(0x5A), TableFormat::KeyTypeValue);
        assert_eq!(TableFormat::classify(0x61), TableFormat::Unsupported(0x61));
        assert_eq!(TableFormat::classify(0xE0), TableFormat::Unsupported(0xE0));
    }

    #[test]
    fn other_record_types_are_rejected() {
        let buf = [0x95, 6, 0, 0, 1, 0x20];
        let rec = Record::from_bytes(&buf).unwrap();
        assert_eq!(
            intel_dmi_parser(&rec, "Platform"),
            FieldLookup::Unsupported(Unsupported::RecordType(0x95))
        );
    }

    #[test]
    fn short_record_cannot_be_classified() {
        let buf = [0x94, 5, 0, 0, 1];
        let rec = Record::from_bytes(&buf).unwrap();
        assert_eq!(TableFormat::of(&rec), None);
        assert!(intel_dmi_parser(&rec, "GopVersion").is_unsupported());
    }
}

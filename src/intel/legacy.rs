//! intel/legacy — fixed-layout (version top bits 000) Intel OEM record.
//!
//! Every field is a single byte right after the generic header; most of them
//! are string-set indices of firmware component versions.

use log::debug;

use crate::layout::{FieldDesc, FieldLayout};
use crate::lookup::{FieldLookup, Unsupported};
use crate::record::{parse_field, FieldWidth, Record};

use super::DecodedField;

const W: FieldWidth = FieldWidth::Inferred;

static LEGACY_FIELDS: [FieldDesc; 22] = [
    FieldDesc::new("GopVersion", 4, W),
    FieldDesc::new("UCodeVersion", 5, W),
    FieldDesc::new("MRCVersion", 6, W),
    FieldDesc::new("SECVersion", 7, W),
    FieldDesc::new("ULPMCVersion", 8, W),
    FieldDesc::new("PMCVersion", 9, W),
    FieldDesc::new("PUnitVersion", 10, W),
    FieldDesc::new("SoCVersion", 11, W),
    FieldDesc::new("BoardVersion", 12, W),
    FieldDesc::new("FabVersion", 13, W),
    FieldDesc::new("CPUFlavor", 14, W),
    FieldDesc::new("BiosVersion", 15, W),
    FieldDesc::new("PmicVersion", 16, W),
    FieldDesc::new("TouchVersion", 17, W),
    FieldDesc::new("SecureBoot", 18, W),
    FieldDesc::new("BootMode", 19, W),
    FieldDesc::new("SpeedStepMode", 20, W),
    FieldDesc::new("CPUTurboMode", 21, W),
    FieldDesc::new("MaxCState", 22, W),
    FieldDesc::new("GfxTurbo", 23, W),
    FieldDesc::new("S0ix", 24, W),
    FieldDesc::new("RC6", 25, W),
];

/// Раскладка legacy-записи Intel (type 0x94, version & 0xE0 == 0).
pub static INTEL_LEGACY_LAYOUT: FieldLayout = FieldLayout::new(&LEGACY_FIELDS);

/// Look a field up in the legacy layout.
///
/// A known field that lies past the declared length is reported as
/// truncated: older firmware ships shorter tables.
pub fn legacy_lookup(record: &Record<'_>, field: &str) -> FieldLookup {
    let Some(desc) = INTEL_LEGACY_LAYOUT.lookup(field) else {
        debug!("legacy table: unknown field {}", field);
        return FieldLookup::NotFound;
    };
    match parse_field(record, desc.offset, desc.width) {
        Some(v) => FieldLookup::Found(v),
        None => FieldLookup::Unsupported(Unsupported::Truncated {
            length: record.length(),
            needed: desc.end(),
        }),
    }
}

/// All legacy fields that fit inside the record.
pub fn legacy_fields(record: &Record<'_>) -> Vec<DecodedField> {
    INTEL_LEGACY_LAYOUT
        .iter()
        .filter_map(|d| {
            parse_field(record, d.offset, d.width).map(|value| DecodedField {
                name: d.name.to_string(),
                value,
            })
        })
        .collect()
}

use anyhow::Result;

use oemdmi::intel::INTEL_LEGACY_LAYOUT;
use oemdmi::{intel_dmi_fields, intel_dmi_parser, parse_field, FieldLookup, Record, TableFormat, Unsupported};

#[test]
fn legacy_fields_match_direct_offset_decoding() -> Result<()> {
    let buf = legacy_record(26);
    let rec = Record::from_bytes(&buf)?;
    assert_eq!(TableFormat::of(&rec), Some(TableFormat::Fixed));
    assert_eq!(INTEL_LEGACY_LAYOUT.len(), 22);

    for desc in INTEL_LEGACY_LAYOUT.iter() {
        let direct = parse_field(&rec, desc.offset, desc.width).expect("field inside record");
        assert_eq!(
            intel_dmi_parser(&rec, desc.name),
            FieldLookup::Found(direct),
            "field {}",
            desc.name
        );
    }

    // Значения — строки из string set
    assert_eq!(intel_dmi_parser(&rec, "GopVersion").value(), Some("fw-1"));
    assert_eq!(intel_dmi_parser(&rec, "UCodeVersion").value(), Some("fw-2"));
    assert_eq!(intel_dmi_parser(&rec, "RC6").value(), Some("fw-22"));
    Ok(())
}

#[test]
fn legacy_unknown_field_is_not_found() -> Result<()> {
    let buf = legacy_record(26);
    let rec = Record::from_bytes(&buf)?;
    assert_eq!(intel_dmi_parser(&rec, "Platform"), FieldLookup::NotFound);
    assert_eq!(intel_dmi_parser(&rec, "gopversion"), FieldLookup::NotFound);
    assert_eq!(intel_dmi_parser(&rec, ""), FieldLookup::NotFound);
    Ok(())
}

#[test]
fn legacy_short_record_reports_truncation_for_missing_tail() -> Result<()> {
    let buf = legacy_record(10);
    let rec = Record::from_bytes(&buf)?;

    // PMCVersion (offset 9) is the last byte of the record
    assert_eq!(intel_dmi_parser(&rec, "PMCVersion").value(), Some("fw-6"));
    assert_eq!(
        intel_dmi_parser(&rec, "PUnitVersion"),
        FieldLookup::Unsupported(Unsupported::Truncated { length: 10, needed: 11 })
    );
    assert_eq!(
        intel_dmi_parser(&rec, "RC6"),
        FieldLookup::Unsupported(Unsupported::Truncated { length: 10, needed: 26 })
    );

    // Dump lists only what fits.
    let dump = intel_dmi_fields(&rec);
    assert_eq!(dump.fields.len(), 6);
    assert_eq!(dump.fields[0].name, "GopVersion");
    assert!(dump.issue.is_none());
    Ok(())
}

#[test]
fn legacy_byte_without_string_renders_as_number() -> Result<()> {
    let mut buf = legacy_record(26);
    // SecureBoot (offset 18) := 0, MaxCState (offset 22) := 200 (no such string)
    buf[18] = 0;
    buf[22] = 200;
    let rec = Record::from_bytes(&buf)?;
    assert_eq!(intel_dmi_parser(&rec, "SecureBoot").value(), Some("0"));
    assert_eq!(intel_dmi_parser(&rec, "MaxCState").value(), Some("200"));
    Ok(())
}

// ---------- helpers ----------

/// Legacy record of `length` bytes: field i (offset 4+i) references string i+1 ("fw-<i+1>").
fn legacy_record(length: usize) -> Vec<u8> {
    let mut buf = vec![0x94, length as u8, 0x10, 0x00];
    for i in 0..(length - 4) {
        buf.push((i + 1) as u8);
    }
    for i in 1..=22 {
        buf.extend_from_slice(format!("fw-{}", i).as_bytes());
        buf.push(0);
    }
    buf.push(0);
    buf
}

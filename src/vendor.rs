//! vendor — top-level dispatch: vendor name -> OEM record type and decoder.

use anyhow::{anyhow, Result};
use std::fmt;

use crate::consts::INTEL_SMBIOS_TYPE;
use crate::intel::{intel_dmi_fields, intel_dmi_parser, FieldDump};
use crate::lookup::FieldLookup;
use crate::record::Record;

/// Vendors with an OEM record decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    Intel,
}

impl Vendor {
    pub const ALL: [Vendor; 1] = [Vendor::Intel];

    /// Parse a vendor name (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "intel" => Ok(Vendor::Intel),
            other => Err(anyhow!("unknown vendor '{}' (known: intel)", other)),
        }
    }

    /// SMBIOS structure type carrying this vendor's OEM record.
    pub fn record_type(self) -> u8 {
        match self {
            Vendor::Intel => INTEL_SMBIOS_TYPE,
        }
    }

    pub fn decode(self, record: &Record<'_>, field: &str) -> FieldLookup {
        match self {
            Vendor::Intel => intel_dmi_parser(record, field),
        }
    }

    pub fn dump(self, record: &Record<'_>) -> FieldDump {
        match self {
            Vendor::Intel => intel_dmi_fields(record),
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vendor::Intel => write!(f, "intel"),
        }
    }
}

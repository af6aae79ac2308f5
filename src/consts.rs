//! Общие константы форматов (SMBIOS structure header, Intel OEM record, field tags).

// -------- SMBIOS structure header --------
// [type u8][length u8][handle u16]
pub const HDR_SIZE: usize = 4;

pub const OFF_TYPE: usize = 0;
pub const OFF_LENGTH: usize = 1;
pub const OFF_HANDLE: usize = 2;

/// Structure type that terminates a structure table.
pub const END_OF_TABLE_TYPE: u8 = 127;

// -------- Intel OEM record (type 0x94) --------
pub const INTEL_SMBIOS_TYPE: u8 = 0x94;

// Header extension shared by the key-based layouts:
// [generic header][Platform u8][Version u8]
pub const OFF_PLATFORM: usize = 4;
pub const OFF_VERSION: usize = 5;
pub const PLATFORM_HDR_SIZE: usize = 6;

// Version byte: top 3 bits select the table layout, the rest is a minor revision.
pub const FORMAT_FIELD_MASK: u8 = 0xE0;
pub const FORMAT_FIXED_TABLE: u8 = 0x00;
pub const FORMAT_KV_TABLE: u8 = 0x20;
pub const FORMAT_KTV_TABLE: u8 = 0x40;

// -------- Field type tags (key/type/value layout) --------
pub const FIELD_TYPE_BYTE: u8 = 0x1;
pub const FIELD_TYPE_WORD: u8 = 0x2;
pub const FIELD_TYPE_DWORD: u8 = 0x3;
pub const FIELD_TYPE_STRING: u8 = 0x4;

// -------- Defaults --------
pub const DEFAULT_TABLE_PATH: &str = "/sys/firmware/dmi/tables/DMI";

use anyhow::{anyhow, Result};
use byteorder::{ByteOrder, LittleEndian};

use crate::consts::{HDR_SIZE, OFF_HANDLE, OFF_LENGTH, OFF_TYPE};

/// One SMBIOS structure: the formatted area (exactly `length` bytes, header
/// included) plus the string set that follows it.
///
/// Borrows the caller's buffer; nothing is copied until a field is decoded.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    record_type: u8,
    handle: u16,
    formatted: &'a [u8],
    strings: Vec<&'a [u8]>,
}

impl<'a> Record<'a> {
    /// Parse one structure from the start of `buf`.
    ///
    /// Returns the record and the number of bytes it occupies (formatted area,
    /// string set and its double-NUL terminator). A string set without the
    /// final terminator is accepted and runs to the end of `buf`.
    pub fn parse(buf: &'a [u8]) -> Result<(Self, usize)> {
        if buf.len() < HDR_SIZE {
            return Err(anyhow!(
                "record too short for header: {} B (need {})",
                buf.len(),
                HDR_SIZE
            ));
        }
        let record_type = buf[OFF_TYPE];
        let length = buf[OFF_LENGTH] as usize;
        if length < HDR_SIZE {
            return Err(anyhow!(
                "record type 0x{:02x}: declared length {} is below header size {}",
                record_type,
                length,
                HDR_SIZE
            ));
        }
        if length > buf.len() {
            return Err(anyhow!(
                "record type 0x{:02x}: declared length {} exceeds available {} B",
                record_type,
                length,
                buf.len()
            ));
        }
        let handle = LittleEndian::read_u16(&buf[OFF_HANDLE..OFF_HANDLE + 2]);

        // Unformatted area ends at the first double NUL.
        let tail = &buf[length..];
        let (region, consumed) = match tail.windows(2).position(|w| w == [0, 0]) {
            Some(i) => (&tail[..i], length + i + 2),
            None => {
                let trimmed = match tail.last() {
                    Some(0) => &tail[..tail.len() - 1],
                    _ => tail,
                };
                (trimmed, buf.len())
            }
        };

        let strings = if region.is_empty() {
            Vec::new()
        } else {
            region.split(|&b| b == 0).collect()
        };

        Ok((
            Self {
                record_type,
                handle,
                formatted: &buf[..length],
                strings,
            },
            consumed,
        ))
    }

    /// Parse a record from a buffer and ignore how many bytes it occupied.
    pub fn from_bytes(buf: &'a [u8]) -> Result<Self> {
        Self::parse(buf).map(|(rec, _)| rec)
    }

    #[inline]
    pub fn record_type(&self) -> u8 {
        self.record_type
    }

    #[inline]
    pub fn handle(&self) -> u16 {
        self.handle
    }

    /// Declared length of the formatted area (header included).
    #[inline]
    pub fn length(&self) -> usize {
        self.formatted.len()
    }

    /// Formatted area, exactly `length()` bytes.
    #[inline]
    pub fn formatted(&self) -> &'a [u8] {
        self.formatted
    }

    /// Byte at `off` inside the formatted area.
    #[inline]
    pub fn byte_at(&self, off: usize) -> Option<u8> {
        self.formatted.get(off).copied()
    }

    /// String by its 1-based SMBIOS index; 0 means "no string".
    pub fn string(&self, index: u8) -> Option<&'a [u8]> {
        if index == 0 {
            return None;
        }
        self.strings.get(index as usize - 1).copied()
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }
}

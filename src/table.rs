//! table — обход сырой SMBIOS structure table (например /sys/firmware/dmi/tables/DMI).
//!
//! Structures are laid out back to back: formatted area, string set, double
//! NUL. The walk stops at the end-of-table structure (type 127), at the end of
//! data, or after the first malformed structure.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::Path;

use crate::consts::END_OF_TABLE_TYPE;
use crate::metrics::{record_table_malformed, record_table_record};
use crate::record::Record;

/// Raw structure table borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct DmiTable<'a> {
    data: &'a [u8],
}

impl<'a> DmiTable<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn iter(&self) -> DmiTableIter<'a> {
        DmiTableIter {
            data: self.data,
            off: 0,
            done: false,
        }
    }

    /// Records of one structure type; a malformed structure ends the walk with an error.
    pub fn records_of_type(&self, record_type: u8) -> Result<Vec<Record<'a>>> {
        let mut out = Vec::new();
        for rec in self.iter() {
            let rec = rec?;
            if rec.record_type() == record_type {
                out.push(rec);
            }
        }
        Ok(out)
    }
}

/// Iterator over the structures of a table.
#[derive(Debug, Clone)]
pub struct DmiTableIter<'a> {
    data: &'a [u8],
    off: usize,
    done: bool,
}

impl<'a> Iterator for DmiTableIter<'a> {
    type Item = Result<Record<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.off >= self.data.len() {
            return None;
        }
        let (data, off) = (self.data, self.off);
        match Record::parse(&data[off..]) {
            Ok((rec, used)) => {
                record_table_record();
                self.off = off + used;
                if rec.record_type() == END_OF_TABLE_TYPE {
                    debug!("table: end-of-table structure at offset {}", off);
                    self.done = true;
                }
                Some(Ok(rec))
            }
            Err(e) => {
                record_table_malformed();
                warn!("table: malformed structure at offset {}: {}", off, e);
                self.done = true;
                Some(Err(e.context(format!("structure at table offset {}", off))))
            }
        }
    }
}

/// Read a structure table dump from disk.
pub fn read_table_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read DMI table {}", path.display()))
}

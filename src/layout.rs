//! layout — статические таблицы раскладки полей для fixed-layout записей.
//!
//! A layout is an ordered list of (name, offset, width). Lookups are linear:
//! tables are a couple dozen entries.

use crate::record::FieldWidth;

/// One field of a fixed-layout record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDesc {
    pub name: &'static str,
    pub offset: usize,
    pub width: FieldWidth,
}

impl FieldDesc {
    pub const fn new(name: &'static str, offset: usize, width: FieldWidth) -> Self {
        Self { name, offset, width }
    }

    /// First byte past the field.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.width.size()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldLayout {
    fields: &'static [FieldDesc],
}

impl FieldLayout {
    pub const fn new(fields: &'static [FieldDesc]) -> Self {
        Self { fields }
    }

    pub fn lookup(&self, name: &str) -> Option<&'static FieldDesc> {
        self.fields.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static FieldDesc> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

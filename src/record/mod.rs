//! record — одна SMBIOS-структура и безопасный доступ к её байтам:
//! - header.rs — разбор заголовка, formatted area и string set (Record)
//! - cursor.rs — курсор с проверкой границ поверх formatted area
//! - field.rs  — примитив извлечения поля (offset + width -> текст)

pub mod header;
pub mod cursor;
pub mod field;

pub use header::Record;
pub use cursor::Cursor;
pub use field::{parse_field, FieldWidth};

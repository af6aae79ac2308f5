// Базовые модули
pub mod consts;
pub mod config;
pub mod metrics;

// Модель записи и примитив извлечения полей
pub mod record; // src/record/{mod,header,cursor,field}.rs
pub mod layout;
pub mod lookup;

// Декодеры и обход таблицы
pub mod intel; // src/intel/{mod,legacy,platform}.rs
pub mod table;
pub mod vendor;

pub mod util; // src/util/mod.rs
pub mod cli;

// Удобные реэкспорты
pub use config::DecoderConfig;
pub use intel::{intel_dmi_fields, intel_dmi_parser, DecodedField, FieldDump, TableFormat};
pub use lookup::{FieldLookup, Unsupported};
pub use record::{parse_field, Cursor, FieldWidth, Record};
pub use table::DmiTable;
pub use vendor::Vendor;

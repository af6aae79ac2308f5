//! Centralized configuration for the oemdmi tool.
//!
//! - DecoderConfig::from_env() reads OEMDMI_* variables on top of the defaults;
//! - fluent with_* setters override single fields (CLI flags win over env).
//!
//! Env:
//! - OEMDMI_TABLE_PATH — structure table dump (default /sys/firmware/dmi/tables/DMI)
//! - OEMDMI_VENDOR     — vendor decoder to use (default intel)
//! - OEMDMI_STRICT     — 1|true|on|yes: unsupported records make the CLI fail

use log::warn;
use std::fmt;
use std::path::PathBuf;

use crate::consts::DEFAULT_TABLE_PATH;
use crate::vendor::Vendor;

#[derive(Clone, Debug)]
pub struct DecoderConfig {
    /// Path to the raw SMBIOS structure table.
    pub table_path: PathBuf,

    /// Vendor whose OEM records are decoded.
    pub vendor: Vendor,

    /// Treat unsupported/malformed records as a command failure instead of "no value".
    pub strict: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
            vendor: Vendor::Intel,
            strict: false,
        }
    }
}

impl DecoderConfig {
    /// Defaults overridden by OEMDMI_* environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("OEMDMI_TABLE_PATH") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.table_path = PathBuf::from(s);
            }
        }

        if let Ok(v) = std::env::var("OEMDMI_VENDOR") {
            match Vendor::from_name(&v) {
                Ok(vendor) => cfg.vendor = vendor,
                // Неизвестный вендор не роняем — остаёмся на дефолте.
                Err(e) => warn!("OEMDMI_VENDOR ignored: {}", e),
            }
        }

        if let Ok(v) = std::env::var("OEMDMI_STRICT") {
            cfg.strict = parse_flag(&v);
        }

        cfg
    }

    pub fn with_table_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.table_path = path.into();
        self
    }

    pub fn with_vendor(mut self, vendor: Vendor) -> Self {
        self.vendor = vendor;
        self
    }

    pub fn with_strict(mut self, on: bool) -> Self {
        self.strict = on;
        self
    }
}

fn parse_flag(v: &str) -> bool {
    let s = v.trim().to_ascii_lowercase();
    s == "1" || s == "true" || s == "on" || s == "yes"
}

impl fmt::Display for DecoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DecoderConfig {{ table_path: {}, vendor: {}, strict: {} }}",
            self.table_path.display(),
            self.vendor,
            self.strict
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert!(parse_flag(" Yes"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("maybe"));
    }

    #[test]
    fn setters_override_defaults() {
        let cfg = DecoderConfig::default()
            .with_table_path("/tmp/dmi.bin")
            .with_strict(true);
        assert_eq!(cfg.table_path, PathBuf::from("/tmp/dmi.bin"));
        assert!(cfg.strict);
        assert_eq!(cfg.vendor, Vendor::Intel);
        assert!(cfg.to_string().contains("/tmp/dmi.bin"));
    }
}

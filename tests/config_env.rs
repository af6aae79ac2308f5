use std::path::PathBuf;

use oemdmi::{DecoderConfig, Vendor};

// Один тест на весь env: переменные процесса общие для всех потоков теста.
#[test]
fn env_overrides_then_builder_wins() {
    std::env::set_var("OEMDMI_TABLE_PATH", "  /tmp/oemdmi-table.bin ");
    std::env::set_var("OEMDMI_VENDOR", "INTEL");
    std::env::set_var("OEMDMI_STRICT", "on");

    let cfg = DecoderConfig::from_env();
    assert_eq!(cfg.table_path, PathBuf::from("/tmp/oemdmi-table.bin"));
    assert_eq!(cfg.vendor, Vendor::Intel);
    assert!(cfg.strict);

    let cfg = cfg.with_strict(false).with_table_path("/dev/null");
    assert!(!cfg.strict);
    assert_eq!(cfg.table_path, PathBuf::from("/dev/null"));

    // unknown vendor and empty path fall back to defaults
    std::env::set_var("OEMDMI_TABLE_PATH", "");
    std::env::set_var("OEMDMI_VENDOR", "acme");
    std::env::set_var("OEMDMI_STRICT", "0");
    let cfg = DecoderConfig::from_env();
    assert_eq!(cfg.table_path, PathBuf::from("/sys/firmware/dmi/tables/DMI"));
    assert_eq!(cfg.vendor, Vendor::Intel);
    assert!(!cfg.strict);

    std::env::remove_var("OEMDMI_TABLE_PATH");
    std::env::remove_var("OEMDMI_VENDOR");
    std::env::remove_var("OEMDMI_STRICT");
}

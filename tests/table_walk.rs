use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use oemdmi::table::read_table_file;
use oemdmi::{metrics, DmiTable, FieldLookup, TableFormat, Vendor};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

#[test]
fn table_walk_finds_oem_records_and_decodes_them() -> Result<()> {
    let table = sample_table();
    let walker = DmiTable::new(&table);

    let all: Vec<_> = walker.iter().collect::<Result<_>>()?;
    assert_eq!(all.len(), 5, "BIOS, legacy, KV, KTV, end-of-table");
    assert_eq!(all.last().map(|r| r.record_type()), Some(127));

    let vendor = Vendor::Intel;
    let oem = walker.records_of_type(vendor.record_type())?;
    assert_eq!(oem.len(), 3);
    let formats: Vec<_> = oem.iter().map(TableFormat::of).collect();
    assert_eq!(
        formats,
        [
            Some(TableFormat::Fixed),
            Some(TableFormat::KeyValue),
            Some(TableFormat::KeyTypeValue)
        ]
    );

    assert_eq!(vendor.decode(&oem[0], "GopVersion").value(), Some("GOP-10.0.1"));
    assert_eq!(vendor.decode(&oem[1], "BoardId").value(), Some("FFD"));
    assert_eq!(vendor.decode(&oem[2], "MemSize").value(), Some("2048"));
    assert_eq!(vendor.decode(&oem[2], "Platform").value(), Some("CHT"));

    // Не-OEM запись тем же декодером не разбирается
    assert!(vendor.decode(&all[0], "Platform").is_unsupported());
    Ok(())
}

#[test]
fn table_file_round_trip_through_disk() -> Result<()> {
    let root = unique_root("file");
    fs::create_dir_all(&root)?;
    let path = root.join("DMI");
    fs::write(&path, sample_table())?;

    let data = read_table_file(&path)?;
    let oem = DmiTable::new(&data).records_of_type(0x94)?;
    assert_eq!(oem.len(), 3);

    let dumps: Vec<_> = oem.iter().map(|r| Vendor::Intel.dump(r)).collect();
    let json = serde_json::to_string(&dumps)?;
    assert!(json.contains("\"GOP-10.0.1\""), "{json}");
    assert!(json.contains("\"KeyTypeValue\""), "{json}");

    assert!(read_table_file(&root.join("missing")).is_err());
    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn lookups_are_counted() -> Result<()> {
    let table = sample_table();
    let oem = DmiTable::new(&table).records_of_type(0x94)?;

    let before = metrics::snapshot();
    assert!(Vendor::Intel.decode(&oem[1], "BoardId").is_found());
    assert_eq!(Vendor::Intel.decode(&oem[1], "Nope"), FieldLookup::NotFound);
    let after = metrics::snapshot();

    // Счётчики глобальные, тесты идут параллельно — сравниваем по >=
    assert!(after.lookups_total >= before.lookups_total + 2);
    assert!(after.lookups_found > before.lookups_found);
    assert!(after.lookups_not_found > before.lookups_not_found);
    assert!(after.table_records_scanned >= before.table_records_scanned);
    Ok(())
}

// ---------- helpers ----------

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("oemdmi-{prefix}-{pid}-{t}-{id}"))
}

fn push_structure(out: &mut Vec<u8>, formatted: &[u8], strings: &[&str]) {
    out.extend_from_slice(formatted);
    for s in strings {
        out.extend_from_slice(s.as_bytes());
        out.push(0);
    }
    if strings.is_empty() {
        out.push(0);
    }
    out.push(0);
}

fn sample_table() -> Vec<u8> {
    let mut t = Vec::new();

    // type 0 (BIOS), vendor + version strings
    push_structure(&mut t, &[0x00, 8, 0x00, 0x00, 1, 2, 0, 0], &["Intel", "5.11"]);

    // 0x94 legacy: GopVersion=1, UCodeVersion=2, rest 0
    let mut legacy = vec![0x94, 26, 0x01, 0x00, 1, 2];
    legacy.resize(26, 0);
    push_structure(&mut t, &legacy, &["GOP-10.0.1", "UC-0x338"]);

    // 0x94 key/value: Platform=1, version 0x20, (BoardId -> FFD)
    push_structure(
        &mut t,
        &[0x94, 8, 0x02, 0x00, 1, 0x20, 2, 3],
        &["CHT", "BoardId", "FFD"],
    );

    // 0x94 key/type/value: Platform=1, version 0x40, MemSize: Word 2048
    push_structure(
        &mut t,
        &[0x94, 10, 0x03, 0x00, 1, 0x40, 2, 2, 0x00, 0x08],
        &["CHT", "MemSize"],
    );

    // end of table
    push_structure(&mut t, &[127, 4, 0xFF, 0xFF], &[]);
    t
}

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::path::PathBuf;

use crate::config::DecoderConfig;
use crate::intel::FieldDump;
use crate::lookup::FieldLookup;
use crate::metrics;
use crate::record::Record;
use crate::table::{read_table_file, DmiTable};
use crate::util::{decode_hex, hex_dump, parse_u16_auto};
use crate::vendor::Vendor;

#[derive(Parser, Debug)]
#[command(
    name = "oemdmi",
    version,
    about = "Decode vendor OEM SMBIOS/DMI records",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Look a field up in every OEM record of the structure table
    Get {
        #[arg(long)]
        field: String,
        /// Structure table dump (default: OEMDMI_TABLE_PATH or /sys/firmware/dmi/tables/DMI)
        #[arg(long)]
        table: Option<PathBuf>,
        #[arg(long)]
        vendor: Option<String>,
        /// Only the record with this handle (decimal or 0x..)
        #[arg(long, value_parser = parse_u16_auto)]
        handle: Option<u16>,
        /// Fail if a record cannot be decoded
        #[arg(long)]
        strict: bool,
    },
    /// Print every field of every OEM record
    Dump {
        #[arg(long)]
        table: Option<PathBuf>,
        #[arg(long)]
        vendor: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Decode a single record given as hex (formatted area, optional string set)
    Decode {
        #[arg(long)]
        hex: String,
        /// Field to look up; without it all fields are printed
        #[arg(long)]
        field: Option<String>,
        #[arg(long)]
        vendor: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = DecoderConfig::from_env();
    debug!("{}", cfg);

    let res = match cli.cmd {
        Cmd::Get {
            field,
            table,
            vendor,
            handle,
            strict,
        } => {
            let cfg = apply_overrides(cfg, table, vendor)?;
            let strict = cfg.strict || strict;
            cmd_get(&cfg.with_strict(strict), &field, handle)
        }
        Cmd::Dump {
            table,
            vendor,
            json,
        } => cmd_dump(&apply_overrides(cfg, table, vendor)?, json),
        Cmd::Decode {
            hex,
            field,
            vendor,
            json,
        } => cmd_decode(&apply_overrides(cfg, None, vendor)?, &hex, field.as_deref(), json),
    };

    debug!("metrics: {}", serde_json::to_string(&metrics::snapshot())?);
    res
}

fn apply_overrides(
    mut cfg: DecoderConfig,
    table: Option<PathBuf>,
    vendor: Option<String>,
) -> Result<DecoderConfig> {
    if let Some(t) = table {
        cfg = cfg.with_table_path(t);
    }
    if let Some(v) = vendor {
        cfg = cfg.with_vendor(Vendor::from_name(&v)?);
    }
    Ok(cfg)
}

fn cmd_get(cfg: &DecoderConfig, field: &str, handle: Option<u16>) -> Result<()> {
    let data = read_table_file(&cfg.table_path)?;
    let records = DmiTable::new(&data).records_of_type(cfg.vendor.record_type())?;
    let records: Vec<_> = records
        .into_iter()
        .filter(|r| handle.map_or(true, |h| r.handle() == h))
        .collect();
    if records.is_empty() {
        println!(
            "no {} OEM records (type 0x{:02x}) in {}",
            cfg.vendor,
            cfg.vendor.record_type(),
            cfg.table_path.display()
        );
        return Ok(());
    }

    let mut unsupported = 0usize;
    for rec in &records {
        match cfg.vendor.decode(rec, field) {
            FieldLookup::Found(v) => println!("0x{:04x} {}: {}", rec.handle(), field, v),
            FieldLookup::NotFound => println!("0x{:04x} {}: NOT FOUND", rec.handle(), field),
            FieldLookup::Unsupported(why) => {
                unsupported += 1;
                println!("0x{:04x} {}: UNSUPPORTED ({})", rec.handle(), field, why);
            }
        }
    }

    if cfg.strict && unsupported > 0 {
        return Err(anyhow!(
            "{} of {} records could not be decoded",
            unsupported,
            records.len()
        ));
    }
    Ok(())
}

fn cmd_dump(cfg: &DecoderConfig, json: bool) -> Result<()> {
    let data = read_table_file(&cfg.table_path)?;
    let records = DmiTable::new(&data).records_of_type(cfg.vendor.record_type())?;
    info!(
        "{}: {} {} OEM record(s)",
        cfg.table_path.display(),
        records.len(),
        cfg.vendor
    );

    let dumps: Vec<FieldDump> = records.iter().map(|r| cfg.vendor.dump(r)).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&dumps)?);
    } else {
        for (rec, d) in records.iter().zip(&dumps) {
            print_dump(rec, d);
        }
    }
    Ok(())
}

fn cmd_decode(cfg: &DecoderConfig, hex: &str, field: Option<&str>, json: bool) -> Result<()> {
    let bytes = decode_hex(hex)?;
    let rec = Record::from_bytes(&bytes)?;

    match field {
        Some(f) => match cfg.vendor.decode(&rec, f) {
            FieldLookup::Found(v) => println!("{}: {}", f, v),
            FieldLookup::NotFound => println!("{}: NOT FOUND", f),
            FieldLookup::Unsupported(why) => {
                if cfg.strict {
                    return Err(anyhow!("{}: {}", f, why));
                }
                println!("{}: UNSUPPORTED ({})", f, why);
            }
        },
        None => {
            let d = cfg.vendor.dump(&rec);
            if json {
                println!("{}", serde_json::to_string_pretty(&d)?);
            } else {
                print_dump(&rec, &d);
            }
        }
    }
    Ok(())
}

fn print_dump(rec: &Record<'_>, d: &FieldDump) {
    println!(
        "Handle 0x{:04x}, type 0x{:02x}, {} B, format {:?}",
        d.handle,
        d.record_type,
        rec.length(),
        d.format
    );
    println!("{}", hex_dump(rec.formatted()));
    for f in &d.fields {
        println!("  {:<16} {}", f.name, f.value);
    }
    if let Some(why) = &d.issue {
        println!("  (stopped: {})", why);
    }
}

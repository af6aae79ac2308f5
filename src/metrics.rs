//! Lightweight global metrics for oemdmi.
//!
//! Потокобезопасные атомарные счётчики:
//! - field lookups (by outcome)
//! - structure table walks

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::lookup::FieldLookup;

// ----- Lookups -----
static LOOKUPS_TOTAL: AtomicU64 = AtomicU64::new(0);
static LOOKUPS_FOUND: AtomicU64 = AtomicU64::new(0);
static LOOKUPS_NOT_FOUND: AtomicU64 = AtomicU64::new(0);
static LOOKUPS_UNSUPPORTED: AtomicU64 = AtomicU64::new(0);

// ----- Table walk -----
static TABLE_RECORDS_SCANNED: AtomicU64 = AtomicU64::new(0);
static TABLE_MALFORMED: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub lookups_total: u64,
    pub lookups_found: u64,
    pub lookups_not_found: u64,
    pub lookups_unsupported: u64,

    pub table_records_scanned: u64,
    pub table_malformed: u64,
}

impl MetricsSnapshot {
    pub fn found_ratio(&self) -> f64 {
        if self.lookups_total == 0 {
            0.0
        } else {
            self.lookups_found as f64 / self.lookups_total as f64
        }
    }
}

pub fn record_lookup(res: &FieldLookup) {
    LOOKUPS_TOTAL.fetch_add(1, Ordering::Relaxed);
    let counter = match res {
        FieldLookup::Found(_) => &LOOKUPS_FOUND,
        FieldLookup::NotFound => &LOOKUPS_NOT_FOUND,
        FieldLookup::Unsupported(_) => &LOOKUPS_UNSUPPORTED,
    };
    counter.fetch_add(1, Ordering::Relaxed);
}

pub fn record_table_record() {
    TABLE_RECORDS_SCANNED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_table_malformed() {
    TABLE_MALFORMED.fetch_add(1, Ordering::Relaxed);
}

pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        lookups_total: LOOKUPS_TOTAL.load(Ordering::Relaxed),
        lookups_found: LOOKUPS_FOUND.load(Ordering::Relaxed),
        lookups_not_found: LOOKUPS_NOT_FOUND.load(Ordering::Relaxed),
        lookups_unsupported: LOOKUPS_UNSUPPORTED.load(Ordering::Relaxed),

        table_records_scanned: TABLE_RECORDS_SCANNED.load(Ordering::Relaxed),
        table_malformed: TABLE_MALFORMED.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    for c in [
        &LOOKUPS_TOTAL,
        &LOOKUPS_FOUND,
        &LOOKUPS_NOT_FOUND,
        &LOOKUPS_UNSUPPORTED,
        &TABLE_RECORDS_SCANNED,
        &TABLE_MALFORMED,
    ] {
        c.store(0, Ordering::Relaxed);
    }
}

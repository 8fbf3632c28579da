#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use spendview_domain::ExpenseRecord;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Shared fixed instant: Thursday 2024-03-14 18:30 UTC.
pub const NOW: &str = "2024-03-14T18:30:00+00:00";

/// Creates an isolated directory that outlives the calling test.
pub fn temp_home() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

/// A small month of spending with one legacy record lacking amount and category.
pub fn sample_records() -> Vec<ExpenseRecord> {
    vec![
        ExpenseRecord::new("r-rent", 900.0, day(2024, 3, 1)).with_category("Bills"),
        ExpenseRecord::new("r-lunch", 120.0, day(2024, 3, 14))
            .with_category("Food")
            .with_note("Lunch with team"),
        ExpenseRecord::new("r-bus", 40.0, day(2024, 3, 13))
            .with_category("Transport")
            .with_note("bus pass"),
        ExpenseRecord::new("r-dinner", 260.0, day(2024, 3, 9))
            .with_category("Food")
            .with_note("Dinner, bus home"),
        ExpenseRecord {
            amount: None,
            ..ExpenseRecord::new("r-legacy", 0.0, day(2024, 2, 20))
        },
    ]
}

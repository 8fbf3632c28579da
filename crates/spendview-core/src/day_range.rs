use chrono::{DateTime, FixedOffset};
use spendview_domain::{DayRange, ExpenseRecord};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Fractional days elapsed between `record.date` and `now`. Negative for future records.
pub fn elapsed_days(record: &ExpenseRecord, now: DateTime<FixedOffset>) -> f64 {
    (now.timestamp_millis() - record.date.timestamp_millis()) as f64 / MILLIS_PER_DAY
}

/// Whether `record` passes `range`.
///
/// `today` compares calendar days in `now`'s offset, while `yesterday`,
/// `last7` and `last30` test continuous elapsed time. A record 25 hours old
/// is therefore outside `today` but inside `yesterday` and `last7`.
pub fn day_range_admits(range: DayRange, record: &ExpenseRecord, now: DateTime<FixedOffset>) -> bool {
    match range {
        DayRange::All => true,
        DayRange::Today => record.date.with_timezone(now.offset()).date_naive() == now.date_naive(),
        DayRange::Yesterday => {
            let days = elapsed_days(record, now);
            (1.0..2.0).contains(&days)
        }
        DayRange::Last7 => elapsed_days(record, now) < 7.0,
        DayRange::Last30 => elapsed_days(record, now) < 30.0,
    }
}

pub fn filter_by_day_range(
    records: &[ExpenseRecord],
    range: DayRange,
    now: DateTime<FixedOffset>,
) -> Vec<ExpenseRecord> {
    records
        .iter()
        .filter(|record| day_range_admits(range, record, now))
        .cloned()
        .collect()
}

use chrono::{DateTime, FixedOffset, Utc};
use spendview_domain::{ExpenseRecord, TimeWindow};

use crate::time::{start_of_month, start_of_today, start_of_week};

/// Inclusive `[start, end]` instant range a time window resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WindowBounds {
    /// Resolves `window` against `now`. `TimeWindow::All` has no bounds.
    pub fn resolve(window: TimeWindow, now: DateTime<FixedOffset>) -> Option<Self> {
        let start = match window {
            TimeWindow::All => return None,
            TimeWindow::Today => start_of_today(&now),
            TimeWindow::Week => start_of_week(&now),
            TimeWindow::Month => start_of_month(&now),
        };
        Some(Self {
            start: start.with_timezone(&Utc),
            end: now.with_timezone(&Utc),
        })
    }

    pub fn contains(&self, record: &ExpenseRecord) -> bool {
        record.date >= self.start && record.date <= self.end
    }
}

/// Keeps records inside `window`, in input order.
///
/// The upper bound is `now`, so future-dated records only survive `all`.
pub fn filter_by_time_window(
    records: &[ExpenseRecord],
    window: TimeWindow,
    now: DateTime<FixedOffset>,
) -> Vec<ExpenseRecord> {
    match WindowBounds::resolve(window, now) {
        None => records.to_vec(),
        Some(bounds) => records
            .iter()
            .filter(|record| bounds.contains(record))
            .cloned()
            .collect(),
    }
}

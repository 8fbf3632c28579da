//! Composition of the derivation stages.
//!
//! Stage order is fixed: time window, then (filters surface only) category,
//! day range and note search, then sort. Aggregates are computed over the
//! sorted result.

use chrono::{DateTime, FixedOffset};
use spendview_domain::{DerivedView, ExpenseRecord, FilterState, Surface};

use crate::day_range::day_range_admits;
use crate::filters::{category_admits, NoteQuery};
use crate::sort::sort_refs;
use crate::summary_service::SummaryService;
use crate::time_window::WindowBounds;

/// Runs the pipeline for `surface`. Pure: identical inputs give identical views.
pub fn derive_view(
    surface: Surface,
    records: &[ExpenseRecord],
    filters: &FilterState,
    now: DateTime<FixedOffset>,
) -> DerivedView {
    let mut visible: Vec<&ExpenseRecord> = match WindowBounds::resolve(filters.time_window, now) {
        None => records.iter().collect(),
        Some(bounds) => records.iter().filter(|record| bounds.contains(record)).collect(),
    };

    if surface == Surface::Filters {
        visible.retain(|record| category_admits(&filters.category, record));
        visible.retain(|record| day_range_admits(filters.day_range, record, now));
        if let Some(query) = NoteQuery::new(&filters.search_text) {
            visible.retain(|record| query.matches(record));
        }
    }

    sort_refs(&mut visible, filters.sort_key);

    DerivedView {
        summary: SummaryService::summarize(visible.iter().copied()),
        daily: SummaryService::daily_totals(visible.iter().copied()),
        visible_records: visible.into_iter().cloned().collect(),
        source_count: records.len(),
    }
}

/// Dashboard: time window, then sort. Category, day range and search are ignored.
pub fn dashboard_view(
    records: &[ExpenseRecord],
    filters: &FilterState,
    now: DateTime<FixedOffset>,
) -> DerivedView {
    derive_view(Surface::Dashboard, records, filters, now)
}

/// Filters page: time window, category, day range, search, sort.
pub fn filters_view(
    records: &[ExpenseRecord],
    filters: &FilterState,
    now: DateTime<FixedOffset>,
) -> DerivedView {
    derive_view(Surface::Filters, records, filters, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use spendview_domain::{CategoryFilter, DayRange, SortKey, TimeWindow};

    fn now() -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap().fixed_offset()
    }

    fn record(id: &str, amount: f64, category: &str, note: &str, age_hours: i64) -> ExpenseRecord {
        ExpenseRecord::new(id, amount, now().with_timezone(&Utc) - Duration::hours(age_hours))
            .with_category(category)
            .with_note(note)
    }

    fn sample() -> Vec<ExpenseRecord> {
        vec![
            record("coffee", 3.0, "Food", "coffee", 2),
            record("bus", 2.0, "Transport", "bus", 3),
            record("dinner", 30.0, "Food", "dinner with bus driver", 30),
            record("rent", 900.0, "Housing", "", 24 * 40),
        ]
    }

    #[test]
    fn dashboard_ignores_predicate_filters() {
        let filters = FilterState::default()
            .with_category(CategoryFilter::only("Food"))
            .with_search("nothing matches this")
            .with_day_range(DayRange::Today);
        let view = dashboard_view(&sample(), &filters, now());
        assert_eq!(view.visible_count(), 4);
        assert_eq!(view.total(), 935.0);
        assert_eq!(view.source_count, 4);
    }

    #[test]
    fn search_runs_after_category_filter() {
        let filters = FilterState::default()
            .with_category(CategoryFilter::only("Food"))
            .with_search("bus");
        let view = filters_view(&sample(), &filters, now());
        let ids: Vec<&str> = view.visible_records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["dinner"]);
        assert_eq!(view.total(), 30.0);
    }

    #[test]
    fn stages_compose_with_sort_and_aggregates() {
        let filters = FilterState::default()
            .with_time_window(TimeWindow::Month)
            .with_day_range(DayRange::Last7)
            .with_sort(SortKey::AmountDesc);
        let view = filters_view(&sample(), &filters, now());
        let ids: Vec<&str> = view.visible_records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["dinner", "coffee", "bus"]);
        assert_eq!(view.summary.subtotal("Food"), Some(33.0));
        assert_eq!(view.summary.subtotal("Transport"), Some(2.0));
        assert_eq!(view.daily.len(), 2);
    }

    #[test]
    fn empty_snapshot_gives_empty_view() {
        let view = filters_view(&[], &FilterState::default(), now());
        assert!(view.is_empty());
        assert_eq!(view.total(), 0.0);
        assert!(view.by_category().is_empty());
    }
}

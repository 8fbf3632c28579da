use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use spendview_core::{
    day_range_admits, filter_by_category, filter_by_day_range, filter_by_time_window,
    filters_view, dashboard_view, sort_records, summarize,
};
use spendview_domain::{
    CategoryFilter, DayRange, ExpenseRecord, FilterState, SortKey, TimeWindow,
};

const CATEGORIES: [Option<&str>; 6] = [
    Some("Food"),
    Some("Transport"),
    None,
    Some("Bills"),
    Some(""),
    Some("Food"),
];

fn now() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2024, 3, 14, 18, 30, 0).unwrap().fixed_offset()
}

/// Deterministic pseudo-random snapshot with plenty of duplicate keys.
fn generated(count: usize, seed: u64) -> Vec<ExpenseRecord> {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        state >> 33
    };
    (0..count)
        .map(|idx| {
            let hours_ago = (next() % (24 * 60)) as i64 - 48;
            let amount = (next() % 8) as f64 * 12.5;
            let mut record = ExpenseRecord::new(
                format!("r{idx}"),
                amount,
                now().with_timezone(&Utc) - Duration::hours(hours_ago),
            );
            record.category = CATEGORIES[(next() % CATEGORIES.len() as u64) as usize].map(str::to_string);
            if idx % 7 == 0 {
                record.amount = None;
            }
            record
        })
        .collect()
}

fn ids(records: &[ExpenseRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

#[test]
fn sorting_is_idempotent_for_every_key() {
    for seed in 1..6 {
        let records = generated(60, seed);
        for key in SortKey::ALL.into_iter().chain([SortKey::Unordered]) {
            let once = sort_records(&records, key);
            let twice = sort_records(&once, key);
            assert_eq!(ids(&once), ids(&twice), "key {key:?} seed {seed}");
        }
    }
}

#[test]
fn sorting_is_stable_for_equal_keys() {
    let records = generated(80, 42);
    let sorted = sort_records(&records, SortKey::AmountDesc);
    let position = |id: &str| records.iter().position(|r| r.id == id).unwrap();
    for pair in sorted.windows(2) {
        if pair[0].effective_amount() == pair[1].effective_amount() {
            assert!(position(&pair[0].id) < position(&pair[1].id));
        }
    }
}

#[test]
fn total_matches_sum_and_partitions_by_category() {
    for seed in 1..6 {
        let records = generated(50, seed);
        let summary = summarize(&records);
        let expected: f64 = records.iter().map(ExpenseRecord::effective_amount).sum();
        assert_eq!(summary.total, expected);
        let partitioned: f64 = summary.by_category.iter().map(|entry| entry.amount).sum();
        assert!((partitioned - summary.total).abs() < 1e-9);
    }
    assert_eq!(summarize(&[]).total, 0.0);
}

#[test]
fn category_filter_never_grows_the_time_filtered_set() {
    let records = generated(120, 7);
    for window in TimeWindow::ALL {
        let windowed = filter_by_time_window(&records, window, now());
        for label in ["Food", "Transport", "Uncategorized", "Bills", "Nope"] {
            let narrowed = filter_by_category(&windowed, &CategoryFilter::only(label));
            assert!(narrowed.len() <= windowed.len());
        }
        assert_eq!(filter_by_category(&windowed, &CategoryFilter::All).len(), windowed.len());
    }
}

#[test]
fn search_only_sees_records_that_survived_the_category_filter() {
    let records = vec![
        ExpenseRecord::new("coffee", 3.0, day(2024, 3, 14))
            .with_note("coffee")
            .with_category("Food"),
        ExpenseRecord::new("bus", 2.0, day(2024, 3, 13))
            .with_note("bus")
            .with_category("Transport"),
    ];
    let filters = FilterState::default()
        .with_category(CategoryFilter::only("Food"))
        .with_search("bus");
    let view = filters_view(&records, &filters, now());
    assert!(view.is_empty());
    assert_eq!(view.total(), 0.0);
}

#[test]
fn today_and_last7_disagree_on_a_record_from_25_hours_ago() {
    let record = ExpenseRecord::new("r", 1.0, now().with_timezone(&Utc) - Duration::hours(25));
    assert!(!day_range_admits(DayRange::Today, &record, now()));
    assert!(day_range_admits(DayRange::Last7, &record, now()));
    assert!(filter_by_day_range(&[record], DayRange::Today, now()).is_empty());
}

#[test]
fn absent_category_is_grouped_and_filtered_as_uncategorized() {
    let records = vec![
        ExpenseRecord::new("plain", 9.0, day(2024, 3, 1)),
        ExpenseRecord::new("food", 1.0, day(2024, 3, 1)).with_category("Food"),
    ];
    let summary = summarize(&records);
    assert_eq!(summary.subtotal("Uncategorized"), Some(9.0));

    let filters = FilterState::default().with_category(CategoryFilter::only("Uncategorized"));
    let view = filters_view(&records, &filters, now());
    assert_eq!(ids(&view.visible_records), vec!["plain"]);
}

#[test]
fn amount_descending_end_to_end() {
    let records = vec![
        ExpenseRecord::new("100", 100.0, day(2024, 1, 10)).with_category("Food"),
        ExpenseRecord::new("50", 50.0, day(2024, 1, 5)).with_category("Food"),
        ExpenseRecord::new("200", 200.0, day(2024, 1, 15)).with_category("Transport"),
    ];
    let filters = FilterState::default().with_sort(SortKey::AmountDesc);
    for view in [filters_view(&records, &filters, now()), dashboard_view(&records, &filters, now())] {
        assert_eq!(ids(&view.visible_records), vec!["200", "100", "50"]);
        assert_eq!(view.total(), 350.0);
        let categories: Vec<(&str, f64)> = view
            .by_category()
            .iter()
            .map(|entry| (entry.category.as_str(), entry.amount))
            .collect();
        assert_eq!(categories, vec![("Transport", 200.0), ("Food", 150.0)]);
    }
}

#[test]
fn identical_inputs_give_identical_views() {
    let records = generated(90, 11);
    let filters = FilterState::default()
        .with_time_window(TimeWindow::Month)
        .with_day_range(DayRange::Last30)
        .with_sort(SortKey::AmountAsc);
    assert_eq!(filters_view(&records, &filters, now()), filters_view(&records, &filters, now()));
}

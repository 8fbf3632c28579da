use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use spendview::utils::persistence::{load_snapshot_from_file, save_snapshot_to_file};
use spendview_core::{dashboard_view, filters_view, sort_records};
use spendview_domain::{Category, CategoryFilter, DayRange, ExpenseRecord, FilterState, SortKey, TimeWindow};
use tempfile::tempdir;

const NOTES: [&str; 5] = ["coffee", "bus to work", "groceries", "", "dinner with friends"];

fn now() -> DateTime<chrono::FixedOffset> {
    Utc.with_ymd_and_hms(2025, 6, 15, 18, 0, 0).unwrap().fixed_offset()
}

fn build_sample_snapshot(count: usize) -> Vec<ExpenseRecord> {
    let latest = now().with_timezone(&Utc);
    (0..count)
        .map(|idx| {
            let category = Category::ALL[idx % Category::ALL.len()];
            let mut record = ExpenseRecord::new(
                format!("bench-{idx}"),
                5.0 + (idx % 200) as f64,
                latest - Duration::hours((idx % (24 * 120)) as i64),
            )
            .with_category(category.as_str())
            .with_note(NOTES[idx % NOTES.len()]);
            if idx % 50 == 0 {
                record.amount = None;
                record.category = None;
            }
            record
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let records = build_sample_snapshot(black_box(10_000));
    let dashboard = FilterState::dashboard();
    let narrowed = FilterState::default()
        .with_time_window(TimeWindow::Month)
        .with_category(CategoryFilter::only("Food"))
        .with_day_range(DayRange::Last30)
        .with_search("Bus")
        .with_sort(SortKey::AmountDesc);

    c.bench_function("dashboard_view_10k", |b| {
        b.iter(|| black_box(dashboard_view(&records, &dashboard, now())))
    });

    c.bench_function("filters_view_10k", |b| {
        b.iter(|| black_box(filters_view(&records, &narrowed, now())))
    });

    c.bench_function("sort_amount_desc_10k", |b| {
        b.iter(|| black_box(sort_records(&records, SortKey::AmountDesc)))
    });
}

fn bench_snapshot_io(c: &mut Criterion) {
    let records = build_sample_snapshot(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("expenses.json");

    c.bench_function("snapshot_save_10k", |b| {
        b.iter_batched(
            || records.clone(),
            |snapshot| save_snapshot_to_file(&snapshot, &file_path).expect("save snapshot"),
            BatchSize::LargeInput,
        )
    });

    save_snapshot_to_file(&records, &file_path).expect("seed");

    c.bench_function("snapshot_load_10k", |b| {
        b.iter(|| black_box(load_snapshot_from_file(&file_path).expect("load snapshot")))
    });
}

criterion_group!(benches, bench_pipeline, bench_snapshot_io);
criterion_main!(benches);

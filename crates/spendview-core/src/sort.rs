use std::cmp::Ordering;

use spendview_domain::{ExpenseRecord, SortKey};

fn compare_amounts(a: &ExpenseRecord, b: &ExpenseRecord) -> Ordering {
    a.effective_amount()
        .partial_cmp(&b.effective_amount())
        .unwrap_or(Ordering::Equal)
}

/// Ordering between two records under `key`. `Unordered` treats everything as equal.
pub fn compare_records(key: SortKey, a: &ExpenseRecord, b: &ExpenseRecord) -> Ordering {
    match key {
        SortKey::DateDesc => b.date.cmp(&a.date),
        SortKey::DateAsc => a.date.cmp(&b.date),
        SortKey::AmountDesc => compare_amounts(b, a),
        SortKey::AmountAsc => compare_amounts(a, b),
        SortKey::Unordered => Ordering::Equal,
    }
}

/// Stable in-place sort of borrowed records.
pub fn sort_refs(records: &mut [&ExpenseRecord], key: SortKey) {
    if key == SortKey::Unordered {
        return;
    }
    records.sort_by(|a, b| compare_records(key, a, b));
}

/// Returns a sorted copy; `records` is left untouched. Ties keep their input order.
pub fn sort_records(records: &[ExpenseRecord], key: SortKey) -> Vec<ExpenseRecord> {
    let mut refs: Vec<&ExpenseRecord> = records.iter().collect();
    sort_refs(&mut refs, key);
    refs.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, amount: Option<f64>, day: u32) -> ExpenseRecord {
        let mut record = ExpenseRecord::new(id, 0.0, Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap());
        record.amount = amount;
        record
    }

    fn ids(records: &[ExpenseRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn sample() -> Vec<ExpenseRecord> {
        vec![
            record("a", Some(30.0), 3),
            record("b", Some(10.0), 1),
            record("c", Some(30.0), 2),
            record("d", None, 4),
        ]
    }

    #[test]
    fn sorts_by_each_key() {
        let records = sample();
        assert_eq!(ids(&sort_records(&records, SortKey::DateDesc)), vec!["d", "a", "c", "b"]);
        assert_eq!(ids(&sort_records(&records, SortKey::DateAsc)), vec!["b", "c", "a", "d"]);
        assert_eq!(ids(&sort_records(&records, SortKey::AmountDesc)), vec!["a", "c", "b", "d"]);
        assert_eq!(ids(&sort_records(&records, SortKey::AmountAsc)), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn unordered_keeps_input_order_and_input_is_untouched() {
        let records = sample();
        let snapshot = records.clone();
        assert_eq!(sort_records(&records, SortKey::Unordered), records);
        let _ = sort_records(&records, SortKey::AmountAsc);
        assert_eq!(records, snapshot);
    }

    #[test]
    fn equal_keys_keep_relative_order() {
        let records = vec![
            record("first", Some(5.0), 1),
            record("second", Some(5.0), 9),
            record("third", Some(5.0), 4),
        ];
        assert_eq!(
            ids(&sort_records(&records, SortKey::AmountDesc)),
            vec!["first", "second", "third"]
        );
    }
}

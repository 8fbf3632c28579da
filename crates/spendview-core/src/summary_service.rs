use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use spendview_domain::{CategoryFilter, CategoryTotal, DailyTotal, ExpenseRecord, Summary};

/// Aggregations over already filtered and ordered records.
pub struct SummaryService;

impl SummaryService {
    /// Total plus per-category subtotals, categories in first-seen order.
    pub fn summarize<'a, I>(records: I) -> Summary
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut summary = Summary::default();
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        for record in records {
            let amount = record.effective_amount();
            summary.total += amount;
            let category = record.effective_category();
            match index.get(category) {
                Some(&slot) => summary.by_category[slot].amount += amount,
                None => {
                    index.insert(category, summary.by_category.len());
                    summary.by_category.push(CategoryTotal {
                        category: category.to_string(),
                        amount,
                    });
                }
            }
        }
        summary
    }

    /// Category with the largest subtotal. Ties go to the first one encountered.
    pub fn top_category(summary: &Summary) -> Option<&CategoryTotal> {
        summary.by_category.iter().fold(None, |best, entry| match best {
            Some(current) if current.amount >= entry.amount => Some(current),
            _ => Some(entry),
        })
    }

    /// Spending per UTC calendar day, oldest day first.
    pub fn daily_totals<'a, I>(records: I) -> Vec<DailyTotal>
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in records {
            *days.entry(record.date.date_naive()).or_insert(0.0) += record.effective_amount();
        }
        days.into_iter()
            .map(|(day, amount)| DailyTotal { day, amount })
            .collect()
    }

    /// Choices for the category filter control: `all`, then every effective
    /// category present in `records` in first-seen order.
    pub fn category_options<'a, I>(records: I) -> Vec<CategoryFilter>
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut options = vec![CategoryFilter::All];
        for record in records {
            let label = record.effective_category();
            if !options.iter().any(|option| option.label() == label && !option.is_all()) {
                options.push(CategoryFilter::only(label));
            }
        }
        options
    }
}

/// Convenience wrapper over [`SummaryService::summarize`] for a record slice.
pub fn summarize(records: &[ExpenseRecord]) -> Summary {
    SummaryService::summarize(records)
}

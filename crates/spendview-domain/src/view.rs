//! Output of a derivation pass. Recomputed on demand, never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::expense::ExpenseRecord;

/// Subtotal for one effective category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Totals over a sequence of records.
///
/// `by_category` keeps categories in the order they were first seen in the
/// input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total: f64,
    pub by_category: Vec<CategoryTotal>,
}

impl Summary {
    pub fn subtotal(&self, category: &str) -> Option<f64> {
        self.by_category
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.amount)
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}

/// Spending summed over one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub day: NaiveDate,
    pub amount: f64,
}

/// Filtered, ordered records plus their aggregates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedView {
    pub visible_records: Vec<ExpenseRecord>,
    pub summary: Summary,
    pub daily: Vec<DailyTotal>,
    /// Size of the snapshot the view was derived from.
    pub source_count: usize,
}

impl DerivedView {
    pub fn total(&self) -> f64 {
        self.summary.total
    }

    pub fn by_category(&self) -> &[CategoryTotal] {
        &self.summary.by_category
    }

    pub fn visible_count(&self) -> usize {
        self.visible_records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible_records.is_empty()
    }
}

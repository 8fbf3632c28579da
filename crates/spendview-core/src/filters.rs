//! Predicate filters applied on the filters surface.

use spendview_domain::{CategoryFilter, ExpenseRecord};

/// Exact match on the effective category. No case folding.
pub fn category_admits(filter: &CategoryFilter, record: &ExpenseRecord) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Only(label) => record.effective_category() == label,
    }
}

pub fn filter_by_category(records: &[ExpenseRecord], filter: &CategoryFilter) -> Vec<ExpenseRecord> {
    records
        .iter()
        .filter(|record| category_admits(filter, record))
        .cloned()
        .collect()
}

/// Lower-cased note search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteQuery {
    needle: String,
}

impl NoteQuery {
    /// Returns `None` for blank input, which matches everything.
    ///
    /// Only the emptiness check trims; surrounding spaces in a non-blank
    /// query take part in the match.
    pub fn new(text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            needle: text.to_lowercase(),
        })
    }

    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        record.note_text().to_lowercase().contains(&self.needle)
    }
}

pub fn filter_by_note(records: &[ExpenseRecord], query: &str) -> Vec<ExpenseRecord> {
    match NoteQuery::new(query) {
        None => records.to_vec(),
        Some(query) => records
            .iter()
            .filter(|record| query.matches(record))
            .cloned()
            .collect(),
    }
}

//! Validation and CRUD helpers for expenses entered through forms.

use chrono::NaiveDate;
use spendview_domain::{parse_date_text, Category, ExpenseDraft, ExpenseInput, ExpenseRecord};
use tracing::info;

use crate::error::{CoreError, CoreResult};
use crate::store::RecordStore;

pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid amount.";
pub const MISSING_DATE_MESSAGE: &str = "Please choose a date.";

/// Provides validated create/edit/delete operations on top of a [`RecordStore`].
pub struct ExpenseService;

impl ExpenseService {
    /// Checks raw form values. Amounts must parse and be strictly positive.
    pub fn validate(draft: &ExpenseDraft) -> CoreResult<ExpenseInput> {
        let amount = draft
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value > 0.0)
            .ok_or_else(|| CoreError::Validation(INVALID_AMOUNT_MESSAGE.into()))?;

        let category = draft
            .category
            .parse::<Category>()
            .map_err(|err| CoreError::Validation(err.to_string()))?;

        if draft.date.trim().is_empty() {
            return Err(CoreError::Validation(MISSING_DATE_MESSAGE.into()));
        }
        let date = parse_date_text(&draft.date)
            .ok_or_else(|| CoreError::Validation(format!("Invalid date: {}", draft.date.trim())))?;

        Ok(ExpenseInput {
            amount,
            category,
            note: draft.note.clone(),
            date,
        })
    }

    /// Blank entry form for `today`.
    pub fn blank_draft(today: NaiveDate) -> ExpenseDraft {
        ExpenseDraft {
            date: today.format("%Y-%m-%d").to_string(),
            ..ExpenseDraft::default()
        }
    }

    /// Pre-fills the edit form from a stored record. A missing or blank
    /// category starts out as the default one.
    pub fn draft_from_record(record: &ExpenseRecord) -> ExpenseDraft {
        ExpenseDraft {
            amount: record.amount.map(|value| value.to_string()).unwrap_or_default(),
            category: record
                .category
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| Category::default().to_string()),
            note: record.note_text().to_string(),
            date: record.date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn create<S>(store: &mut S, draft: &ExpenseDraft) -> CoreResult<String>
    where
        S: RecordStore + ?Sized,
    {
        let input = Self::validate(draft)?;
        let id = store.add(input)?;
        info!(%id, "expense created");
        Ok(id)
    }

    pub fn edit<S>(store: &mut S, id: &str, draft: &ExpenseDraft) -> CoreResult<()>
    where
        S: RecordStore + ?Sized,
    {
        let input = Self::validate(draft)?;
        store.update(id, input)?;
        info!(%id, "expense edited");
        Ok(())
    }

    pub fn delete<S>(store: &mut S, id: &str) -> CoreResult<ExpenseRecord>
    where
        S: RecordStore + ?Sized,
    {
        let removed = store.remove(id)?;
        info!(%id, "expense deleted");
        Ok(removed)
    }

    /// Removes every expense of the current user.
    pub fn delete_all<S>(store: &mut S) -> usize
    where
        S: RecordStore + ?Sized,
    {
        let removed = store.clear();
        info!(removed, "all expenses deleted");
        removed
    }
}

//! Expense categories offered by the entry form.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::common::ParseValueError;

/// Label used wherever a record has no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Fixed set of categories the entry form lets users pick from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Food,
    Transport,
    Housing,
    Entertainment,
    Bills,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Housing,
        Category::Entertainment,
        Category::Bills,
        Category::Shopping,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseValueError::new("category", trimmed))
    }
}

/// Resolves the label a stored category is grouped and filtered under.
///
/// Absent and empty values collapse to [`UNCATEGORIZED`]; anything else is
/// returned verbatim, including labels outside [`Category::ALL`].
pub fn effective_category(raw: Option<&str>) -> &str {
    match raw {
        Some(label) if !label.is_empty() => label,
        _ => UNCATEGORIZED,
    }
}

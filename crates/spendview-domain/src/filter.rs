//! Filter and sort selections owned by the presentation layer.
//!
//! Every value here is an immutable selection handed to the derivation
//! pipeline on each recompute. Unknown serialized values degrade to the
//! identity behaviour (`all`, or input order for sorting) instead of failing.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::common::ParseValueError;

/// Coarse period filter shown on the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    Today,
    Week,
    Month,
    /// No restriction. Any unrecognised serialized window lands here.
    #[default]
    #[serde(other)]
    All,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::All,
        TimeWindow::Today,
        TimeWindow::Week,
        TimeWindow::Month,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            TimeWindow::All => "all",
            TimeWindow::Today => "today",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::All => "All time",
            TimeWindow::Today => "Today",
            TimeWindow::Week => "This week",
            TimeWindow::Month => "This month",
        }
    }
}

/// Finer period filter offered on the filters surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum DayRange {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "yesterday")]
    Yesterday,
    #[serde(rename = "last7")]
    Last7,
    #[serde(rename = "last30")]
    Last30,
    #[default]
    #[serde(rename = "all", other)]
    All,
}

impl DayRange {
    pub const ALL: [DayRange; 5] = [
        DayRange::All,
        DayRange::Today,
        DayRange::Yesterday,
        DayRange::Last7,
        DayRange::Last30,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            DayRange::All => "all",
            DayRange::Today => "today",
            DayRange::Yesterday => "yesterday",
            DayRange::Last7 => "last7",
            DayRange::Last30 => "last30",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayRange::All => "All Days",
            DayRange::Today => "Today",
            DayRange::Yesterday => "Yesterday",
            DayRange::Last7 => "Last 7 Days",
            DayRange::Last30 => "Last 30 Days",
        }
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
    /// Keeps the input order. Any unrecognised serialized key lands here.
    #[serde(other)]
    Unordered,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::AmountDesc,
        SortKey::AmountAsc,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            SortKey::DateDesc => "date_desc",
            SortKey::DateAsc => "date_asc",
            SortKey::AmountDesc => "amount_desc",
            SortKey::AmountAsc => "amount_asc",
            SortKey::Unordered => "unordered",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::DateDesc => "Newest first",
            SortKey::DateAsc => "Oldest first",
            SortKey::AmountDesc => "Highest amount",
            SortKey::AmountAsc => "Lowest amount",
            SortKey::Unordered => "As stored",
        }
    }
}

/// Category selection: everything, or one effective category label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn only(label: impl Into<String>) -> Self {
        CategoryFilter::Only(label.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(label) => label,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => "all".into(),
            CategoryFilter::Only(label) => label,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

macro_rules! token_enum {
    ($ty:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.token())
            }
        }

        impl FromStr for $ty {
            type Err = ParseValueError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let needle = value.trim().to_ascii_lowercase();
                [$($ty::$variant),+]
                    .into_iter()
                    .find(|candidate| candidate.token() == needle)
                    .ok_or_else(|| ParseValueError::new($kind, value.trim()))
            }
        }

        impl $ty {
            /// Parses a token, falling back to the identity selection when unknown.
            pub fn parse_lenient(value: &str) -> Self {
                value.parse().unwrap_or_else(|_| Self::identity())
            }
        }
    };
}

token_enum!(TimeWindow, "time window", [All, Today, Week, Month]);
token_enum!(DayRange, "day range", [All, Today, Yesterday, Last7, Last30]);
token_enum!(SortKey, "sort key", [DateDesc, DateAsc, AmountDesc, AmountAsc]);

impl TimeWindow {
    fn identity() -> Self {
        TimeWindow::All
    }
}

impl DayRange {
    fn identity() -> Self {
        DayRange::All
    }
}

impl SortKey {
    fn identity() -> Self {
        SortKey::Unordered
    }
}

/// Screens that consume derived views. They differ in which stages run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Time window and sort only.
    Dashboard,
    /// Time window, category, day range, note search, then sort.
    Filters,
}

impl Surface {
    pub fn default_filters(&self) -> FilterState {
        match self {
            Surface::Dashboard => FilterState::dashboard(),
            Surface::Filters => FilterState::default(),
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Surface::Dashboard => "dashboard",
            Surface::Filters => "filters",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Surface {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Surface::Dashboard),
            "filters" => Ok(Surface::Filters),
            other => Err(ParseValueError::new("surface", other)),
        }
    }
}

/// The full set of user selections fed into one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub time_window: TimeWindow,
    pub day_range: DayRange,
    pub category: CategoryFilter,
    pub search_text: String,
    pub sort_key: SortKey,
}

impl FilterState {
    /// Dashboard defaults: current month, newest first.
    pub fn dashboard() -> Self {
        Self {
            time_window: TimeWindow::Month,
            ..Self::default()
        }
    }

    pub fn with_time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = window;
        self
    }

    pub fn with_day_range(mut self, range: DayRange) -> Self {
        self.day_range = range;
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_sort(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }
}

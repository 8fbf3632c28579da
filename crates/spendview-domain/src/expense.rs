//! Expense records as delivered by the record store, plus the form-level
//! draft/input types used to create and edit them.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::category::{effective_category, Category};
use crate::common::{Displayable, Identifiable};

/// One expense as stored for the signed-in user.
///
/// Records are treated as immutable values for the duration of a recompute.
/// Every optional field has a well-defined fallback so externally injected
/// data never breaks derivation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: String,
    #[serde(
        default,
        deserialize_with = "deserialize_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,
    #[serde(
        default,
        alias = "createdAt",
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl ExpenseRecord {
    pub fn new(id: impl Into<String>, amount: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            amount: Some(amount),
            category: None,
            note: None,
            date,
            created_at: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Amount used for sums and ordering; missing or non-finite values count as zero.
    pub fn effective_amount(&self) -> f64 {
        self.amount.filter(|value| value.is_finite()).unwrap_or(0.0)
    }

    /// Category label with the `Uncategorized` substitution applied.
    pub fn effective_category(&self) -> &str {
        effective_category(self.category.as_deref())
    }

    /// Note text, empty when absent.
    pub fn note_text(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }
}

impl Identifiable for ExpenseRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for ExpenseRecord {
    fn display_label(&self) -> String {
        format!(
            "{} {} {:.2}",
            self.date.format("%Y-%m-%d"),
            self.effective_category(),
            self.effective_amount()
        )
    }
}

/// Raw form values as typed by the user, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub amount: String,
    pub category: String,
    pub note: String,
    pub date: String,
}

impl Default for ExpenseDraft {
    fn default() -> Self {
        Self {
            amount: String::new(),
            category: Category::default().to_string(),
            note: String::new(),
            date: String::new(),
        }
    }
}

/// Validated values ready to be written through the record store.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseInput {
    pub amount: f64,
    pub category: Category,
    pub note: String,
    pub date: DateTime<Utc>,
}

impl ExpenseInput {
    pub fn into_record(self, id: impl Into<String>, created_at: DateTime<Utc>) -> ExpenseRecord {
        ExpenseRecord {
            id: id.into(),
            amount: Some(self.amount),
            category: Some(self.category.to_string()),
            note: Some(self.note),
            date: self.date,
            created_at: Some(created_at),
        }
    }

    /// Overwrites the editable fields of `record`, keeping its id and audit timestamp.
    pub fn apply_to(self, record: &mut ExpenseRecord) {
        record.amount = Some(self.amount);
        record.category = Some(self.category.to_string());
        record.note = Some(self.note);
        record.date = self.date;
    }
}

/// Parses the textual date forms the store and the entry form produce.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates, the latter taken
/// as midnight UTC.
pub fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|day| Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(de::IgnoredAny),
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => Some(value),
        RawAmount::Text(text) => text.trim().parse::<f64>().ok(),
        RawAmount::Other(_) => None,
    };
    Ok(amount.filter(|value| value.is_finite()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Millis(i64),
    Text(String),
    Timestamp {
        seconds: i64,
        #[serde(default)]
        nanoseconds: u32,
    },
}

impl RawDate {
    fn into_datetime(self) -> Option<DateTime<Utc>> {
        match self {
            RawDate::Millis(millis) => Utc.timestamp_millis_opt(millis).single(),
            RawDate::Text(text) => parse_date_text(&text),
            RawDate::Timestamp {
                seconds,
                nanoseconds,
            } => Utc.timestamp_opt(seconds, nanoseconds).single(),
        }
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    RawDate::deserialize(deserializer)?
        .into_datetime()
        .ok_or_else(|| de::Error::custom("unrecognised date value"))
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawDate>::deserialize(deserializer)?.and_then(RawDate::into_datetime))
}

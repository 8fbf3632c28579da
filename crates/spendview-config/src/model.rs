use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use spendview_domain::{SortKey, TimeWindow};

/// User preferences for presentation and the dashboard's starting selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub decimal_places: u8,
    pub dashboard_window: TimeWindow,
    pub default_sort: SortKey,
    pub ui_color_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Snapshot file opened by the last `load`/`save`.
    pub last_snapshot: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::DEFAULT_CURRENCY_SYMBOL.into(),
            decimal_places: 2,
            dashboard_window: TimeWindow::Month,
            default_sort: SortKey::DateDesc,
            ui_color_enabled: true,
            last_snapshot: None,
        }
    }
}

impl Config {
    pub const DEFAULT_CURRENCY_SYMBOL: &'static str = "฿";

    /// Renders `amount` with the configured symbol and precision, e.g. `฿1,250.00`.
    pub fn format_amount(&self, amount: f64) -> String {
        let precision = usize::from(self.decimal_places);
        let raw = format!("{:.*}", precision, amount.abs());
        let (whole, fraction) = match raw.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (raw.as_str(), None),
        };
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (idx, ch) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if amount < 0.0 && raw.chars().any(|c| c != '0' && c != '.') {
            "-"
        } else {
            ""
        };
        match fraction {
            Some(fraction) => format!("{sign}{}{grouped}.{fraction}", self.currency_symbol),
            None => format!("{sign}{}{grouped}", self.currency_symbol),
        }
    }
}

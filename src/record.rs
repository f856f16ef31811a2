//! Performance record data model
//!
//! One `PerformanceRecord` per input row. Records are immutable once
//! loaded; every derived structure is computed fresh per analysis run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column names that must all be present (after normalization) for an
/// analysis run to proceed.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "campaign_name",
    "adset_name",
    "date",
    "spend",
    "impressions",
    "clicks",
    "ctr",
    "purchases",
    "revenue",
    "roas",
    "creative_type",
    "creative_message",
    "audience_type",
    "platform",
    "country",
];

/// A single row of campaign performance data.
///
/// `date`, `ctr`, and `roas` are `None` when the raw value was empty or
/// did not parse; such rows are excluded from every computation that
/// depends on the affected field but still feed rules over the fields
/// that did parse. `date_raw` keeps the original text for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub campaign_name: String,
    pub adset_name: String,
    pub date: Option<NaiveDate>,
    pub date_raw: String,
    pub spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    /// Click-through rate, carried as a pre-computed input field.
    pub ctr: Option<f64>,
    pub purchases: u64,
    pub revenue: f64,
    /// Return on ad spend, carried as a pre-computed input field.
    pub roas: Option<f64>,
    pub creative_type: String,
    pub creative_message: String,
    pub audience_type: String,
    pub platform: String,
    pub country: String,
}

impl PerformanceRecord {
    /// Display label for the row's date: ISO format when parsed, raw
    /// input text otherwise.
    pub fn date_label(&self) -> String {
        match self.date {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => self.date_raw.clone(),
        }
    }
}

/// An in-memory table: the normalized column names actually seen in the
/// input plus the typed rows built from them.
///
/// Column presence is tracked separately from the typed rows so that
/// rules can degrade (yield nothing) when a column they depend on was
/// never in the input, rather than operating on default-filled values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub records: Vec<PerformanceRecord>,
}

impl Table {
    pub fn new(columns: Vec<String>, records: Vec<PerformanceRecord>) -> Self {
        Self { columns, records }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn has_columns(&self, names: &[&str]) -> bool {
        names.iter().all(|n| self.has_column(n))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

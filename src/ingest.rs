//! CSV ingestion adapter
//!
//! Reads a delimited table into typed `PerformanceRecord`s. Header names
//! are normalized before anything else; per-field parse failures degrade
//! the affected field (logged at warn) and never fail the load. Columns
//! beyond the required set are ignored.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

use crate::error::{AnalysisError, Result};
use crate::record::{PerformanceRecord, Table};
use crate::schema::normalize_column;

/// Date formats accepted on input, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a calendar date, tolerating the common delimited-export formats.
/// Returns `None` for anything unrecognizable.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Read a table from a CSV file on disk.
pub fn read_table_from_path(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).map_err(|source| AnalysisError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_table(file)
}

/// Read a table from any CSV byte stream.
pub fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_column)
        .collect();

    // First index wins when a header repeats after normalization.
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (i, name) in columns.iter().enumerate() {
        index.entry(name.as_str()).or_insert(i);
    }

    let mut records = Vec::new();
    for (row_num, row) in csv_reader.records().enumerate() {
        let row = row?;
        records.push(build_record(&row, &index, row_num));
    }

    Ok(Table::new(columns, records))
}

fn build_record(
    row: &csv::StringRecord,
    index: &HashMap<&str, usize>,
    row_num: usize,
) -> PerformanceRecord {
    let text = |name: &str| -> String {
        index
            .get(name)
            .and_then(|&i| row.get(i))
            .unwrap_or("")
            .trim()
            .to_string()
    };

    let float = |name: &str| -> f64 {
        let raw = text(name);
        if raw.is_empty() {
            return 0.0;
        }
        raw.parse().unwrap_or_else(|_| {
            warn!(row = row_num, column = name, value = %raw, "unparseable number, coerced to 0");
            0.0
        })
    };

    // Metric fields feed thresholds and means, so a bad value must drop
    // out of dependent computations rather than enter them as 0.0.
    let metric = |name: &str| -> Option<f64> {
        let raw = text(name);
        if raw.is_empty() {
            return None;
        }
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(row = row_num, column = name, value = %raw, "unparseable metric, row excluded from dependent rules");
                None
            }
        }
    };

    let int = |name: &str| -> u64 {
        let raw = text(name);
        if raw.is_empty() {
            return 0;
        }
        raw.parse().unwrap_or_else(|_| {
            warn!(row = row_num, column = name, value = %raw, "unparseable count, coerced to 0");
            0
        })
    };

    let date_raw = text("date");
    let date = parse_date(&date_raw);
    if date.is_none() && !date_raw.is_empty() {
        warn!(row = row_num, value = %date_raw, "unparseable date, row excluded from date aggregation");
    }

    PerformanceRecord {
        campaign_name: text("campaign_name"),
        adset_name: text("adset_name"),
        date,
        date_raw,
        spend: float("spend"),
        impressions: int("impressions"),
        clicks: int("clicks"),
        ctr: metric("ctr"),
        purchases: int("purchases"),
        revenue: float("revenue"),
        roas: metric("roas"),
        creative_type: text("creative_type"),
        creative_message: text("creative_message"),
        audience_type: text("audience_type"),
        platform: text("platform"),
        country: text("country"),
    }
}

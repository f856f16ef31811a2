//! Dataset-level descriptive statistics

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::Table;

/// Descriptive statistics for one analysis run. Purely derived,
/// recomputed every run.
///
/// ROAS fields are `None` when the column is absent or no row carries a
/// parseable value; they serialize as JSON `null` and the Markdown
/// report shows the "N/A" sentinel. Date bounds only cover rows whose
/// date parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub n_rows: usize,
    pub columns: Vec<String>,
    pub earliest_date: Option<NaiveDate>,
    pub latest_date: Option<NaiveDate>,
    pub min_roas: Option<f64>,
    pub max_roas: Option<f64>,
    pub avg_roas: Option<f64>,
}

/// Compute the run summary for a validated table.
pub fn summarize(table: &Table) -> Summary {
    let dates: Vec<NaiveDate> = table.records.iter().filter_map(|r| r.date).collect();

    let roas_values: Vec<f64> = if table.has_column("roas") {
        table.records.iter().filter_map(|r| r.roas).collect()
    } else {
        Vec::new()
    };

    let (min_roas, max_roas, avg_roas) = if roas_values.is_empty() {
        (None, None, None)
    } else {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for value in &roas_values {
            min = min.min(*value);
            max = max.max(*value);
            sum += value;
        }
        let mean = sum / roas_values.len() as f64;
        (Some(min), Some(max), Some(mean))
    };

    Summary {
        n_rows: table.records.len(),
        columns: table.columns.clone(),
        earliest_date: dates.iter().min().copied(),
        latest_date: dates.iter().max().copied(),
        min_roas,
        max_roas,
        avg_roas,
    }
}

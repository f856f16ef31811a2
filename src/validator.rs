//! Post-hoc hypothesis validation
//!
//! Re-derives supporting aggregates per hypothesis kind and attaches a
//! verdict. The two kinds are deliberately asymmetric:
//!
//! - metric drop gets a quantitative re-check: mean ROAS over the last
//!   N records strictly before the drop date (table order, not calendar
//!   bounded) against mean ROAS on the drop date;
//! - low engagement gets a crude label-based rule: the verdict is simply
//!   whether the original confidence was Medium, and the validation
//!   confidence echoes the original.
//!
//! Validation is pure over (hypotheses, table, config); re-running it
//! overwrites the verdict fields with identical values.

use chrono::NaiveDate;

use crate::config::AnalysisConfig;
use crate::detector::{Confidence, Hypothesis, HypothesisKind};
use crate::record::Table;

/// Validate every hypothesis in place and return the list.
pub fn validate(
    mut hypotheses: Vec<Hypothesis>,
    table: &Table,
    config: &AnalysisConfig,
) -> Vec<Hypothesis> {
    for hypothesis in &mut hypotheses {
        match hypothesis.kind {
            HypothesisKind::MetricDrop { date } => {
                let validated = drop_confirmed(table, date, config);
                hypothesis.validated = Some(validated);
                hypothesis.validation_confidence = Some(if validated {
                    Confidence::High
                } else {
                    Confidence::Low
                });
            }
            HypothesisKind::LowEngagement => {
                hypothesis.validated = Some(hypothesis.confidence == Confidence::Medium);
                hypothesis.validation_confidence = Some(hypothesis.confidence);
            }
        }
    }
    hypotheses
}

/// Quantitative drop re-check: both windows non-empty and post-window
/// mean ROAS below `validation_ratio` of the pre-window mean. Rows
/// without a parsed date or ROAS belong to neither window.
fn drop_confirmed(table: &Table, drop_date: NaiveDate, config: &AnalysisConfig) -> bool {
    let pre: Vec<f64> = table
        .records
        .iter()
        .filter(|r| r.date.is_some_and(|d| d < drop_date))
        .filter_map(|r| r.roas)
        .collect();
    let pre = &pre[pre.len().saturating_sub(config.pre_window_len)..];

    let post: Vec<f64> = table
        .records
        .iter()
        .filter(|r| r.date == Some(drop_date))
        .filter_map(|r| r.roas)
        .collect();

    if pre.is_empty() || post.is_empty() {
        return false;
    }

    mean(&post) < mean(pre) * config.validation_ratio
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

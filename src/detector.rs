//! Hypothesis detection over the performance table
//!
//! Two independent detection rules:
//! - metric drop: day-over-day mean-ROAS delta below a fixed negative
//!   threshold flags the date;
//! - low engagement: per-row CTR strictly below the underperformance
//!   cutoff flags the row, with a two-tier severity band.
//!
//! Output order is deterministic: all drop hypotheses in ascending date
//! order, then all low-engagement hypotheses in input row order. A rule
//! whose input columns are absent yields zero hypotheses of that kind.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::record::Table;

/// Confidence label carried by hypotheses and validation verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// Discriminated hypothesis kind, set at creation and read by the
/// validator. A drop hypothesis carries its date directly so no
/// component ever re-parses it out of display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum HypothesisKind {
    MetricDrop { date: NaiveDate },
    LowEngagement,
}

/// A claim about a performance phenomenon with attached confidence and
/// evidence. Text, confidence, and evidence are fixed at creation; the
/// validator fills `validated` and `validation_confidence` exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub hypothesis: String,
    pub kind: HypothesisKind,
    pub confidence: Confidence,
    pub evidence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_confidence: Option<Confidence>,
}

/// Mean ROAS for one calendar date; the series the drop rule derives,
/// exposed so presentation adapters can chart or export the trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRoas {
    pub date: NaiveDate,
    pub mean_roas: f64,
}

/// Per-date mean ROAS in ascending date order. Rows without a parsed
/// date are excluded. Empty when either input column is absent.
pub fn roas_by_date(table: &Table) -> Vec<DailyRoas> {
    if !table.has_columns(&["date", "roas"]) {
        return Vec::new();
    }

    let mut by_date: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for record in &table.records {
        if let (Some(date), Some(roas)) = (record.date, record.roas) {
            let entry = by_date.entry(date).or_insert((0.0, 0));
            entry.0 += roas;
            entry.1 += 1;
        }
    }

    by_date
        .into_iter()
        .map(|(date, (sum, count))| DailyRoas {
            date,
            mean_roas: sum / count as f64,
        })
        .collect()
}

/// Run both detection rules and return candidate hypotheses.
pub fn detect(table: &Table, config: &AnalysisConfig) -> Vec<Hypothesis> {
    let mut hypotheses = detect_metric_drops(table, config);
    hypotheses.extend(detect_low_engagement(table, config));
    debug!(count = hypotheses.len(), "hypothesis detection complete");
    hypotheses
}

/// Flag every date whose day-over-day mean-ROAS delta is strictly below
/// the configured (negative) threshold.
fn detect_metric_drops(table: &Table, config: &AnalysisConfig) -> Vec<Hypothesis> {
    if !table.has_columns(&["date", "ctr", "roas"]) {
        return Vec::new();
    }

    let series = roas_by_date(table);
    series
        .windows(2)
        .filter_map(|pair| {
            let delta = pair[1].mean_roas - pair[0].mean_roas;
            if delta < config.roas_drop_delta {
                Some(metric_drop_hypothesis(pair[1].date, delta))
            } else {
                None
            }
        })
        .collect()
}

fn metric_drop_hypothesis(date: NaiveDate, delta: f64) -> Hypothesis {
    let day = date.format("%Y-%m-%d");
    Hypothesis {
        hypothesis: format!("ROAS drop detected on {day}"),
        kind: HypothesisKind::MetricDrop { date },
        confidence: Confidence::Medium,
        evidence: format!("ROAS delta: {delta:.2} on {day}"),
        validated: None,
        validation_confidence: None,
    }
}

/// Flag every row whose CTR is strictly below the underperformance
/// cutoff, with Medium confidence below the inner severity cutoff and
/// Low between the two. Rows without a parsed CTR are skipped.
fn detect_low_engagement(table: &Table, config: &AnalysisConfig) -> Vec<Hypothesis> {
    if !table.has_columns(&["date", "ctr"]) {
        return Vec::new();
    }

    table
        .records
        .iter()
        .filter_map(|record| record.ctr.map(|ctr| (record, ctr)))
        .filter(|(_, ctr)| *ctr < config.low_ctr_threshold)
        .map(|(record, ctr)| {
            let confidence = if ctr < config.severe_ctr_threshold {
                Confidence::Medium
            } else {
                Confidence::Low
            };
            Hypothesis {
                hypothesis: format!(
                    "Underperformance likely in creative for campaign {} on {}",
                    record.campaign_name,
                    record.date_label()
                ),
                kind: HypothesisKind::LowEngagement,
                confidence,
                evidence: format!(
                    "Creative '{}' has low CTR {ctr:.3}, creative type: {}",
                    record.creative_message, record.creative_type
                ),
                validated: None,
                validation_confidence: None,
            }
        })
        .collect()
}

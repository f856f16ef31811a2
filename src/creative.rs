//! Comparable-creative retrieval and copy suggestions
//!
//! For each distinct underperforming creative message (first occurrence
//! kept), retrieves high-performing records sharing creative type and
//! audience type, ranks their messages by frequency, and composes a
//! short list of templated replacement suggestions.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::record::{PerformanceRecord, Table};

/// Columns the engine needs; any absent one makes it yield nothing.
const ENGINE_COLUMNS: &[&str] = &[
    "ctr",
    "creative_message",
    "campaign_name",
    "date",
    "creative_type",
    "audience_type",
];

/// Replacement-copy proposal for one underperforming creative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativeSuggestion {
    pub campaign: String,
    pub date: String,
    pub old_message: String,
    pub suggestions: Vec<String>,
}

/// Suggestion line templates, kept as data so the composed report can be
/// tested and localized without string-matching prose scattered through
/// the engine.
pub mod templates {
    pub const URGENCY: &str = "Add urgency: e.g. 'Limited Time Offer!'";
    pub const DISCOUNT: &str = "Highlight offer/discount more explicitly.";

    pub fn reference(message: &str) -> String {
        format!("Reference similar successful creative: '{message}'")
    }
}

/// Produce suggestions for every distinct underperforming creative
/// message. Empty when a needed column is absent, the table is empty,
/// or no row carries a parseable CTR.
pub fn suggest(table: &Table, config: &AnalysisConfig) -> Vec<CreativeSuggestion> {
    if !table.has_columns(ENGINE_COLUMNS) || table.is_empty() {
        return Vec::new();
    }

    let Some(baseline) = mean_ctr(&table.records) else {
        return Vec::new();
    };
    let mut seen_messages: HashSet<&str> = HashSet::new();
    let mut output = Vec::new();

    for record in &table.records {
        let Some(ctr) = record.ctr else {
            continue;
        };
        if ctr >= config.low_ctr_threshold {
            continue;
        }
        if !seen_messages.insert(record.creative_message.as_str()) {
            continue;
        }

        let top = top_comparable_messages(table, record, baseline, config);
        debug!(
            campaign = %record.campaign_name,
            comparable_messages = top.len(),
            "composing creative suggestions"
        );

        let mut suggestions: Vec<String> =
            top.iter().map(|msg| templates::reference(msg)).collect();
        if suggestions.is_empty() {
            suggestions.push(templates::URGENCY.to_string());
        }
        if ctr < baseline {
            suggestions.push(templates::DISCOUNT.to_string());
        }
        suggestions.truncate(config.max_suggestions);

        output.push(CreativeSuggestion {
            campaign: record.campaign_name.clone(),
            date: record.date_label(),
            old_message: record.creative_message.clone(),
            suggestions,
        });
    }

    output
}

/// Messages from the comparable set (CTR above the baseline multiple,
/// matching creative type and audience type), ranked by frequency with
/// first-seen order breaking ties, truncated to the configured count.
fn top_comparable_messages<'a>(
    table: &'a Table,
    underperformer: &PerformanceRecord,
    baseline: f64,
    config: &AnalysisConfig,
) -> Vec<&'a str> {
    let cutoff = baseline * config.comparable_ctr_multiplier;

    // Insertion-ordered counting; a stable sort then keeps first-seen
    // order among equal frequencies, so identical input gives identical
    // ranking.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in &table.records {
        if record.ctr.is_some_and(|c| c > cutoff)
            && record.creative_type == underperformer.creative_type
            && record.audience_type == underperformer.audience_type
        {
            match counts
                .iter_mut()
                .find(|(msg, _)| *msg == record.creative_message)
            {
                Some((_, n)) => *n += 1,
                None => counts.push((record.creative_message.as_str(), 1)),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(config.top_messages)
        .map(|(msg, _)| msg)
        .collect()
}

/// Mean CTR over rows that carry a parsed value; `None` when no row does.
fn mean_ctr(records: &[PerformanceRecord]) -> Option<f64> {
    let values: Vec<f64> = records.iter().filter_map(|r| r.ctr).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

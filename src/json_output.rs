//! JSON export for analysis artifacts
//!
//! Thin serialization adapter over the core output structures. Each
//! artifact (whole report, hypotheses, creative suggestions) exports as
//! pretty-printed JSON matching the serde contract, and deserializes
//! back field-for-field.

use std::path::Path;

use crate::creative::CreativeSuggestion;
use crate::detector::Hypothesis;
use crate::error::{AnalysisError, Result};
use crate::pipeline::AnalysisReport;

/// Pretty-print the full report.
pub fn report_json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Pretty-print the validated hypothesis list on its own.
pub fn insights_json(hypotheses: &[Hypothesis]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(hypotheses)
}

/// Pretty-print the creative suggestion list on its own.
pub fn creatives_json(creatives: &[CreativeSuggestion]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(creatives)
}

/// Write the hypothesis artifact to a JSON file.
pub fn export_insights(hypotheses: &[Hypothesis], path: &Path) -> Result<()> {
    write_file(insights_json(hypotheses)?, path)
}

/// Write the creative-suggestion artifact to a JSON file.
pub fn export_creatives(creatives: &[CreativeSuggestion], path: &Path) -> Result<()> {
    write_file(creatives_json(creatives)?, path)
}

fn write_file(json: String, path: &Path) -> Result<()> {
    std::fs::write(path, json).map_err(|source| AnalysisError::Io {
        path: path.display().to_string(),
        source,
    })
}

//! Markdown report adapter
//!
//! Renders the analysis output into the fixed-order human-readable
//! document: Summary, Insights & Hypotheses, Creative Suggestions. Pure
//! consumer of the core structures.

use crate::pipeline::{analysis_plan, AnalysisReport};

/// Sentinel shown for values the summarizer could not derive.
const NOT_AVAILABLE: &str = "N/A";

fn roas_label(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn date_label(value: Option<chrono::NaiveDate>) -> String {
    match value {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Render the full Markdown report.
pub fn render_markdown(report: &AnalysisReport) -> String {
    let mut out = String::from("# ROAS Analysis Report\n\n");

    out.push_str("## Analysis Plan\n");
    for step in analysis_plan() {
        out.push_str(&format!("- {step}\n"));
    }
    out.push('\n');

    let summary = &report.summary;
    out.push_str("## Data Summary\n");
    out.push_str(&format!("- rows: {}\n", summary.n_rows));
    out.push_str(&format!("- columns: {}\n", summary.columns.join(", ")));
    out.push_str(&format!(
        "- date range: {} to {}\n",
        date_label(summary.earliest_date),
        date_label(summary.latest_date)
    ));
    out.push_str(&format!("- min ROAS: {}\n", roas_label(summary.min_roas)));
    out.push_str(&format!("- max ROAS: {}\n", roas_label(summary.max_roas)));
    out.push_str(&format!("- avg ROAS: {}\n", roas_label(summary.avg_roas)));
    out.push('\n');

    out.push_str("## Insights & Hypotheses\n");
    for h in &report.hypotheses {
        out.push_str(&format!(
            "- {} | Confidence: {} | Validated: {} | Evidence: {}\n",
            h.hypothesis,
            h.confidence,
            h.validated.unwrap_or(false),
            h.evidence
        ));
    }

    out.push_str("\n## Creative Suggestions\n");
    for c in &report.creatives {
        out.push_str(&format!(
            "- Campaign: {} (Date: {})\n  Old Message: '{}'\n  Suggestions:\n",
            c.campaign, c.date, c.old_message
        ));
        for s in &c.suggestions {
            out.push_str(&format!("    - {s}\n"));
        }
    }

    out
}

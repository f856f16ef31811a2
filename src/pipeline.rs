//! Analysis pipeline orchestration
//!
//! Runs the schema gate, then the summarizer and detector, then the
//! validator, with the creative engine as an independent branch over the
//! same table. Every component receives an immutable view of the input
//! and returns fresh derived structures; two runs over identical input
//! produce identical reports.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AnalysisConfig;
use crate::creative::{self, CreativeSuggestion};
use crate::detector::{self, DailyRoas, Hypothesis};
use crate::error::{AnalysisError, Result};
use crate::record::Table;
use crate::schema;
use crate::summary::{self, Summary};
use crate::validator;

/// The fixed analysis plan, shown at the head of a run.
pub fn analysis_plan() -> &'static [&'static str] {
    &[
        "Summarize ROAS trends and detect drop periods.",
        "Identify likely drivers for ROAS changes (audience fatigue, creative type, etc.).",
        "Find campaigns with low CTR and generate message recommendations.",
    ]
}

/// Everything one analysis run produces, in report order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: Summary,
    pub hypotheses: Vec<Hypothesis>,
    pub creatives: Vec<CreativeSuggestion>,
    /// Per-date mean ROAS, for trend charting/export by consumers.
    pub roas_by_date: Vec<DailyRoas>,
}

/// Run the full pipeline over a validated-or-rejected table.
///
/// Fails before any component runs when required columns are missing or
/// the configuration is inconsistent; every other irregularity degrades
/// inside the components.
pub fn run_analysis(table: &Table, config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.validate().map_err(AnalysisError::InvalidConfig)?;

    let missing = schema::missing_columns(&table.columns);
    if !missing.is_empty() {
        return Err(AnalysisError::MissingColumns {
            missing,
            detected: table.columns.clone(),
        });
    }

    let summary = summary::summarize(table);
    let hypotheses = detector::detect(table, config);
    let hypotheses = validator::validate(hypotheses, table, config);
    let creatives = creative::suggest(table, config);
    let roas_by_date = detector::roas_by_date(table);

    info!(
        rows = summary.n_rows,
        hypotheses = hypotheses.len(),
        creatives = creatives.len(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        summary,
        hypotheses,
        creatives,
        roas_by_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{PerformanceRecord, REQUIRED_COLUMNS};
    use chrono::NaiveDate;

    fn full_columns() -> Vec<String> {
        REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    fn rec(date: &str, roas: f64, ctr: f64) -> PerformanceRecord {
        PerformanceRecord {
            campaign_name: "Camp".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            date_raw: date.to_string(),
            roas: Some(roas),
            ctr: Some(ctr),
            creative_type: "video".to_string(),
            creative_message: "msg".to_string(),
            audience_type: "broad".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_schema_failure_halts_everything() {
        let table = Table::new(vec!["date".to_string()], vec![rec("2024-01-01", 1.0, 0.02)]);
        let err = run_analysis(&table, &AnalysisConfig::default()).unwrap_err();
        match err {
            AnalysisError::MissingColumns { missing, detected } => {
                assert!(missing.contains(&"roas".to_string()));
                assert!(!missing.contains(&"date".to_string()));
                assert_eq!(detected, vec!["date".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_analysis() {
        let table = Table::new(full_columns(), Vec::new());
        let config = AnalysisConfig {
            pre_window_len: 0,
            ..Default::default()
        };
        assert!(matches!(
            run_analysis(&table, &config),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_full_run_produces_all_sections() {
        let table = Table::new(
            full_columns(),
            vec![
                rec("2024-01-01", 3.0, 0.02),
                rec("2024-01-02", 2.0, 0.01),
            ],
        );
        let report = run_analysis(&table, &AnalysisConfig::default()).unwrap();
        assert_eq!(report.summary.n_rows, 2);
        assert_eq!(report.roas_by_date.len(), 2);
        // One drop plus one low-engagement row, all validated.
        assert_eq!(report.hypotheses.len(), 2);
        assert!(report.hypotheses.iter().all(|h| h.validated.is_some()));
        assert_eq!(report.creatives.len(), 1);
    }

    #[test]
    fn test_identical_input_identical_output() {
        let table = Table::new(
            full_columns(),
            vec![
                rec("2024-01-01", 3.0, 0.013),
                rec("2024-01-02", 2.2, 0.02),
            ],
        );
        let config = AnalysisConfig::default();
        let a = run_analysis(&table, &config).unwrap();
        let b = run_analysis(&table, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_plan_has_three_steps() {
        assert_eq!(analysis_plan().len(), 3);
    }
}

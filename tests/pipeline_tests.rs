//! End-to-end pipeline tests over in-memory CSV input

use adscope::config::AnalysisConfig;
use adscope::detector::{Confidence, HypothesisKind};
use adscope::error::AnalysisError;
use adscope::{ingest, pipeline};

const HEADER: &str = "campaign_name,adset_name,date,spend,impressions,clicks,ctr,\
purchases,revenue,roas,creative_type,creative_message,audience_type,platform,country";

fn row(campaign: &str, date: &str, ctr: f64, roas: f64, message: &str) -> String {
    format!(
        "{campaign},AS1,{date},100,10000,150,{ctr},5,300,{roas},video,{message},lookalike,facebook,US"
    )
}

#[test]
fn test_full_pipeline_over_csv() {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    // Three days of healthy ROAS, then a collapse on day four.
    csv.push_str(&row("Camp1", "2024-01-01", 0.02, 3.0, "Fresh styles are here"));
    csv.push('\n');
    csv.push_str(&row("Camp1", "2024-01-02", 0.021, 3.1, "Fresh styles are here"));
    csv.push('\n');
    csv.push_str(&row("Camp1", "2024-01-03", 0.022, 2.9, "Fresh styles are here"));
    csv.push('\n');
    csv.push_str(&row("Camp1", "2024-01-04", 0.01, 1.0, "Old tired pitch"));
    csv.push('\n');

    let table = ingest::read_table(csv.as_bytes()).unwrap();
    let report = pipeline::run_analysis(&table, &AnalysisConfig::default()).unwrap();

    assert_eq!(report.summary.n_rows, 4);
    assert_eq!(report.summary.min_roas, Some(1.0));
    assert_eq!(report.summary.max_roas, Some(3.1));

    // Day four: mean ROAS falls 2.9 -> 1.0 (delta -1.9) and its row has
    // CTR 0.01, so there is one drop hypothesis and one low-engagement.
    assert_eq!(report.hypotheses.len(), 2);

    let drop = &report.hypotheses[0];
    assert!(matches!(drop.kind, HypothesisKind::MetricDrop { .. }));
    assert_eq!(drop.hypothesis, "ROAS drop detected on 2024-01-04");
    // Pre-window mean (3 rows) is 3.0, post is 1.0 < 2.4: confirmed.
    assert_eq!(drop.validated, Some(true));
    assert_eq!(drop.validation_confidence, Some(Confidence::High));

    let low = &report.hypotheses[1];
    assert_eq!(low.kind, HypothesisKind::LowEngagement);
    assert_eq!(low.confidence, Confidence::Medium);
    assert_eq!(low.validated, Some(true));

    // The weak creative gets suggestions; the day-three row (CTR 0.022)
    // clears 1.2x the mean CTR (0.01825) and shares type/audience, so it
    // is the one comparable message, followed by the discount line.
    assert_eq!(report.creatives.len(), 1);
    assert_eq!(report.creatives[0].old_message, "Old tired pitch");
    assert_eq!(
        report.creatives[0].suggestions[0],
        "Reference similar successful creative: 'Fresh styles are here'"
    );
    assert_eq!(
        report.creatives[0].suggestions[1],
        "Highlight offer/discount more explicitly."
    );

    assert_eq!(report.roas_by_date.len(), 4);
    assert_eq!(report.roas_by_date[3].mean_roas, 1.0);
}

#[test]
fn test_schema_failure_reports_missing_and_detected() {
    let csv = "campaign_name,date,roas\nCamp1,2024-01-01,2.0\n";
    let table = ingest::read_table(csv.as_bytes()).unwrap();
    let err = pipeline::run_analysis(&table, &AnalysisConfig::default()).unwrap_err();

    match err {
        AnalysisError::MissingColumns { missing, detected } => {
            assert!(missing.contains(&"ctr".to_string()));
            assert!(missing.contains(&"creative_message".to_string()));
            assert!(!missing.contains(&"roas".to_string()));
            assert_eq!(detected.len(), 3);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn test_unparseable_date_keeps_row_for_row_wise_rules() {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    csv.push_str(&row("Camp1", "someday", 0.005, 2.0, "Weak message"));
    csv.push('\n');
    csv.push_str(&row("Camp1", "2024-01-02", 0.02, 2.0, "Strong message"));
    csv.push('\n');

    let table = ingest::read_table(csv.as_bytes()).unwrap();
    let report = pipeline::run_analysis(&table, &AnalysisConfig::default()).unwrap();

    // The bad-date row cannot feed date aggregation...
    assert_eq!(report.roas_by_date.len(), 1);
    // ...but still triggers the row-wise low-engagement rule, labeled
    // with its raw date text.
    assert_eq!(report.hypotheses.len(), 1);
    assert!(report.hypotheses[0].hypothesis.contains("on someday"));
}

#[test]
fn test_unparseable_ctr_yields_no_hypotheses() {
    // A garbage CTR must drop out of every dependent rule instead of
    // entering them as 0.0 and flagging the row as underperforming.
    let mut csv = String::from(HEADER);
    csv.push('\n');
    csv.push_str(&row("Camp1", "2024-01-01", 0.02, 3.0, "Fine creative"));
    csv.push('\n');
    csv.push_str(
        "Camp1,AS1,2024-01-02,100,10000,150,oops,5,300,2.9,video,Fine creative,lookalike,facebook,US\n",
    );

    let table = ingest::read_table(csv.as_bytes()).unwrap();
    let report = pipeline::run_analysis(&table, &AnalysisConfig::default()).unwrap();

    assert!(report.hypotheses.is_empty());
    assert!(report.creatives.is_empty());
    // The bad row's ROAS still parsed, so the trend keeps both dates.
    assert_eq!(report.roas_by_date.len(), 2);
}

#[test]
fn test_unparseable_roas_does_not_fabricate_drop() {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    csv.push_str(&row("Camp1", "2024-01-01", 0.02, 3.0, "Fine creative"));
    csv.push('\n');
    csv.push_str(
        "Camp1,AS1,2024-01-02,100,10000,150,0.02,5,300,n/a,video,Fine creative,lookalike,facebook,US\n",
    );

    let table = ingest::read_table(csv.as_bytes()).unwrap();
    let report = pipeline::run_analysis(&table, &AnalysisConfig::default()).unwrap();

    // Counted as 0.0 the second day would show a -3.0 delta; excluded it
    // contributes no date mean at all.
    assert!(report.hypotheses.is_empty());
    assert_eq!(report.roas_by_date.len(), 1);
    assert_eq!(report.summary.min_roas, Some(3.0));
}

#[test]
fn test_comparable_retrieval_ranks_by_frequency() {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    csv.push_str(&row("Camp1", "2024-01-01", 0.01, 2.0, "Underperformer"));
    csv.push('\n');
    for _ in 0..3 {
        csv.push_str(&row("Camp2", "2024-01-01", 0.026, 2.0, "A"));
        csv.push('\n');
    }
    csv.push_str(&row("Camp3", "2024-01-01", 0.03, 2.0, "B"));
    csv.push('\n');
    csv.push_str(&row("Camp4", "2024-01-01", 0.012, 2.0, "Filler low"));
    csv.push('\n');
    csv.push_str(&row("Camp5", "2024-01-01", 0.018, 2.0, "Filler mid"));
    csv.push('\n');

    let table = ingest::read_table(csv.as_bytes()).unwrap();
    let report = pipeline::run_analysis(&table, &AnalysisConfig::default()).unwrap();

    let first = &report.creatives[0];
    assert_eq!(first.old_message, "Underperformer");
    assert_eq!(
        first.suggestions[0],
        "Reference similar successful creative: 'A'"
    );
    assert_eq!(
        first.suggestions[1],
        "Reference similar successful creative: 'B'"
    );
    assert_eq!(
        first.suggestions[2],
        "Highlight offer/discount more explicitly."
    );
}

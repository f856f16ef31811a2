//! CLI argument parsing for Adscope

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the analysis report
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable Markdown report (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "adscope")]
#[command(version)]
#[command(about = "Explainable hypothesis analysis for ad-campaign performance tables", long_about = None)]
pub struct Cli {
    /// CSV file with campaign performance records
    pub input: PathBuf,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file overriding detection/validation thresholds
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the validated hypothesis list as JSON to this path
    #[arg(long = "export-insights", value_name = "FILE")]
    pub export_insights: Option<PathBuf>,

    /// Write the creative suggestions as JSON to this path
    #[arg(long = "export-creatives", value_name = "FILE")]
    pub export_creatives: Option<PathBuf>,

    /// Write the Markdown report to this path
    #[arg(long = "export-report", value_name = "FILE")]
    pub export_report: Option<PathBuf>,

    /// Enable debug logging to stderr
    #[arg(short, long)]
    pub debug: bool,
}

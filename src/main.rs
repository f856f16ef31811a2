use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use adscope::cli::{Cli, OutputFormat};
use adscope::config::AnalysisConfig;
use adscope::{ingest, json_output, pipeline, report};

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    let table = ingest::read_table_from_path(&cli.input)?;
    let analysis = pipeline::run_analysis(&table, &config)?;

    match cli.format {
        OutputFormat::Text => println!("{}", report::render_markdown(&analysis)),
        OutputFormat::Json => println!("{}", json_output::report_json(&analysis)?),
    }

    if let Some(path) = &cli.export_insights {
        json_output::export_insights(&analysis.hypotheses, path)?;
    }
    if let Some(path) = &cli.export_creatives {
        json_output::export_creatives(&analysis.creatives, path)?;
    }
    if let Some(path) = &cli.export_report {
        std::fs::write(path, report::render_markdown(&analysis))?;
    }

    Ok(())
}

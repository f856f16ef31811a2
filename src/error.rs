//! Errors for analysis pipeline operations

use thiserror::Error;

/// Errors surfaced by ingestion and the analysis pipeline.
///
/// Only two conditions are fatal: an unreadable input and a schema
/// failure. Everything else (unparseable dates, absent optional columns)
/// degrades to partial output inside the components instead.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Required columns absent after name normalization. Carries both the
    /// missing names (in required order) and the columns that were
    /// detected, so the caller can show the user what to fix.
    #[error("missing required columns: {} (detected: {})", missing.join(", "), detected.join(", "))]
    MissingColumns {
        missing: Vec<String>,
        detected: Vec<String>,
    },

    #[error("failed to read input: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: String,
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

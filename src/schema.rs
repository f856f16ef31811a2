//! Schema gate: column-name normalization and required-column check
//!
//! Pure predicates, no state. If `missing_columns` returns a non-empty
//! list the pipeline must halt before any other component runs.

use crate::record::REQUIRED_COLUMNS;

/// Normalize a raw header name: trim, lowercase, and collapse internal
/// whitespace runs to single underscores.
pub fn normalize_column(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Normalize a full header row.
pub fn normalize_columns(raw: &[String]) -> Vec<String> {
    raw.iter().map(|c| normalize_column(c)).collect()
}

/// Required columns absent from a normalized header row, in the fixed
/// required order (stable for identical input).
pub fn missing_columns(present: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !present.iter().any(|p| p == *required))
        .map(|required| required.to_string())
        .collect()
}

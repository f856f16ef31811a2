//! Configuration for hypothesis detection and validation thresholds
//!
//! Every cutoff used by the pipeline lives here as a named field with a
//! documented default, so nothing downstream carries magic numbers. A
//! TOML file may override any subset of fields; unspecified fields keep
//! their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AnalysisError, Result};

/// Tunable thresholds for the analysis pipeline.
///
/// # Example
/// ```
/// use adscope::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.roas_drop_delta, -0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Day-over-day mean-ROAS delta below which a drop hypothesis is
    /// emitted. Strict inequality: a delta exactly equal to this value
    /// is not flagged.
    ///
    /// Default: -0.5
    pub roas_drop_delta: f64,

    /// CTR below which a row is considered underperforming (strict).
    ///
    /// Default: 0.015
    pub low_ctr_threshold: f64,

    /// Inner CTR cutoff for the two-tier severity band: rows strictly
    /// below this get Medium confidence, rows between this and
    /// `low_ctr_threshold` get Low.
    ///
    /// Default: 0.012
    pub severe_ctr_threshold: f64,

    /// A drop hypothesis validates when post-window mean ROAS falls
    /// below this fraction of the pre-window mean.
    ///
    /// Default: 0.8
    pub validation_ratio: f64,

    /// Number of most recent records (table order, not calendar days)
    /// taken strictly before the drop date as the validation pre-window.
    ///
    /// Default: 7
    pub pre_window_len: usize,

    /// A record is a comparable high performer when its CTR exceeds
    /// this multiple of the dataset mean CTR.
    ///
    /// Default: 1.2
    pub comparable_ctr_multiplier: f64,

    /// How many top-ranked comparable messages to reference per
    /// underperforming creative.
    ///
    /// Default: 2
    pub top_messages: usize,

    /// Hard cap on suggestion lines per creative.
    ///
    /// Default: 3
    pub max_suggestions: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            roas_drop_delta: -0.5,
            low_ctr_threshold: 0.015,
            severe_ctr_threshold: 0.012,
            validation_ratio: 0.8,
            pre_window_len: 7,
            comparable_ctr_multiplier: 1.2,
            top_messages: 2,
            max_suggestions: 3,
        }
    }
}

impl AnalysisConfig {
    /// Load a config from a TOML file, overriding defaults field by field.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self =
            toml::from_str(&text).map_err(|source| AnalysisError::ConfigParse {
                path: path.display().to_string(),
                source,
            })?;
        config
            .validate()
            .map_err(AnalysisError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate threshold relationships.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.roas_drop_delta >= 0.0 {
            return Err(format!(
                "roas_drop_delta must be negative, got {}",
                self.roas_drop_delta
            ));
        }

        if !(0.0..=1.0).contains(&self.low_ctr_threshold) {
            return Err(format!(
                "low_ctr_threshold must be in [0, 1], got {}",
                self.low_ctr_threshold
            ));
        }

        if self.severe_ctr_threshold > self.low_ctr_threshold {
            return Err(format!(
                "severe_ctr_threshold ({}) must not exceed low_ctr_threshold ({})",
                self.severe_ctr_threshold, self.low_ctr_threshold
            ));
        }

        if !(0.0..1.0).contains(&self.validation_ratio) {
            return Err(format!(
                "validation_ratio must be in [0, 1), got {}",
                self.validation_ratio
            ));
        }

        if self.pre_window_len == 0 {
            return Err("pre_window_len must be at least 1".to_string());
        }

        if self.comparable_ctr_multiplier <= 0.0 {
            return Err(format!(
                "comparable_ctr_multiplier must be positive, got {}",
                self.comparable_ctr_multiplier
            ));
        }

        if self.max_suggestions == 0 {
            return Err("max_suggestions must be at least 1".to_string());
        }

        Ok(())
    }
}

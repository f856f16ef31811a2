//! Adscope - explainable hypothesis analysis for ad-campaign performance tables
//!
//! This library ingests a table of advertising performance records and
//! produces validated hypotheses about performance changes (ROAS drops,
//! weak creatives) with confidence levels and supporting evidence, plus
//! replacement-copy suggestions borrowed from comparable high-performing
//! creatives.

pub mod cli;
pub mod config;
pub mod creative;
pub mod detector;
pub mod error;
pub mod ingest;
pub mod json_output;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod schema;
pub mod summary;
pub mod validator;

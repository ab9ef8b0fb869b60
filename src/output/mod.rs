//! Output module for persisting harvest results
//!
//! This module handles:
//! - Writing per-problem test-case JSON files
//! - Writing the problem-metadata listing
//! - Writing and reading the crawl manifest used for resumed runs

mod json;

pub use json::{
    read_manifest, write_manifest, write_problems, write_test_cases, CrawlManifest,
};

use thiserror::Error;

/// Errors that can occur while writing or reading output files
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

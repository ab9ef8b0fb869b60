//! Caseharvest: a test-case harvester for competitive-programming archives
//!
//! This crate crawls a publicly shared cloud folder tree of contest test data
//! (contest → problem → `in`/`out` text files), pairs same-named input/output
//! files into test-case records, and fetches problem metadata from a public
//! JSON endpoint.

pub mod config;
pub mod crawler;
pub mod metadata;
pub mod model;
pub mod output;
pub mod remote;

use thiserror::Error;

/// Main error type for caseharvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Remote storage error: {0}")]
    Remote(#[from] remote::RemoteError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] metadata::MetadataError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for caseharvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::TestCaseCrawler;
pub use metadata::{Problem, ProblemsClient};
pub use model::{build_problem_id, TestCase, TestCaseFile};
pub use remote::{FileFetcher, FolderEntry, FolderLister, FolderPage, RemoteError};

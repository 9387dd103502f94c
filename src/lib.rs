//! Press-Mirror: an incremental press-release mirror
//!
//! This crate crawls a paginated news listing, extracts each article into a
//! structured record and writes it as a Markdown document. A run stops as soon
//! as it reaches an article that has already been mirrored.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod pagination;
pub mod storage;

use thiserror::Error;

/// Main error type for Press-Mirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Pagination discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

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

/// A request that still failed after every retry attempt
#[derive(Debug, Error)]
#[error("Fetch failed after {attempts} attempt(s): {url}: {message}")]
pub struct FetchError {
    pub url: String,
    pub attempts: u32,
    /// Description of the last underlying failure
    pub message: String,
}

/// No usable pagination scheme could be determined
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("first listing page at {url} yielded no items, nothing to compare probes against")]
    EmptyFirstPage { url: String },

    #[error(
        "no pagination parameter worked for {url} after {attempts} probes; \
         the site may page through a form or POST request, supply the scheme manually"
    )]
    Exhausted { url: String, attempts: usize },
}

/// Result type alias for Press-Mirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlOutcome, StopReason};
pub use extract::{parse_article, parse_listing, ArticleRecord, SummaryRecord};
pub use pagination::{PaginationMode, PaginationScheme};
pub use storage::{DocumentStore, FsDocumentStore, TargetIdentity};

//! Configuration module for Press-Mirror
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so the crawler also runs without a file at all.
//!
//! # Example
//!
//! ```no_run
//! use press_mirror::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("press-mirror.toml")).unwrap();
//! println!("Listing: {}", config.crawler.list_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FetchConfig, OutputConfig, UserAgentConfig};
pub use types::{DEFAULT_BASE_URL, DEFAULT_LIST_URL};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;

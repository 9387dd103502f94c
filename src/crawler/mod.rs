//! Crawler module for listing traversal and article mirroring
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - Pacing of consecutive requests
//! - Overall crawl coordination and the stop-at-known-content policy

mod coordinator;
mod fetcher;
mod pacer;
#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome, StopReason};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use pacer::{PacedFetcher, RequestPacer};

use crate::config::Config;
use crate::MirrorError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the output directory
/// 2. Build the paced HTTP fetcher
/// 3. Walk the listing, discovering pagination when page 1 is needed
/// 4. Mirror new articles until the listing ends or known content is reached
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl completed or halted on mirrored content
/// * `Err(MirrorError)` - Crawl failed
pub async fn crawl(config: &Config) -> Result<CrawlOutcome, MirrorError> {
    run_crawl(config).await
}

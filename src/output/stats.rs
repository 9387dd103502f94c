//! Run statistics
//!
//! Counters kept by the coordinator while it walks the listing, reported
//! once at the end of a run.

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Counters for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,

    /// Listing pages processed
    pub pages_visited: u64,

    /// Summary records examined, including the one that stopped the run
    pub items_seen: u64,

    /// Documents written this run
    pub documents_saved: u64,

    /// Items skipped after a fetch, parse or write failure
    pub items_failed: u64,

    started: Instant,
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            pages_visited: 0,
            items_seen: 0,
            documents_saved: 0,
            items_failed: 0,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints statistics to stdout in a human-readable format
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Press-Mirror Run Statistics ===\n");
    println!("Started:          {}", stats.started_at.to_rfc3339());
    println!("Elapsed:          {:.1}s", stats.elapsed().as_secs_f64());
    println!("Pages visited:    {}", stats.pages_visited);
    println!("Items seen:       {}", stats.items_seen);
    println!("Documents saved:  {}", stats.documents_saved);
    println!("Items failed:     {}", stats.items_failed);
}

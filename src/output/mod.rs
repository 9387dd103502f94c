//! Output module for rendering mirrored documents and run reports
//!
//! This module handles:
//! - Rendering an article record as a Markdown document
//! - Recording and printing per-run statistics

mod markdown;
pub mod stats;

pub use markdown::{render_document, UNTITLED};
pub use stats::{print_statistics, CrawlStatistics};

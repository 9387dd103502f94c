//! Crawler coordinator - incremental crawl orchestration
//!
//! This module contains the main crawl loop, which:
//! - Walks the listing page by page
//! - Stops the whole run at the first article already mirrored
//! - Fetches, extracts, reconciles and persists every new article
//! - Skips (and logs) articles that fail individually

use crate::config::Config;
use crate::crawler::{Fetcher, HttpFetcher, PacedFetcher};
use crate::extract::{parse_article, SummaryRecord};
use crate::output::{render_document, CrawlStatistics};
use crate::pagination::{ListingEndpoint, PageSequence};
use crate::storage::{open_storage, DocumentStore, TargetIdentity};
use crate::MirrorError;
use std::path::{Path, PathBuf};

/// Why a run ended without an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The listing ran out of pages, or the page cap was reached
    Exhausted,

    /// An item's target already existed, so everything older is mirrored
    AlreadyMirrored {
        identity: TargetIdentity,
        path: PathBuf,
    },
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub stats: CrawlStatistics,
    pub stop: StopReason,
}

/// Main crawler coordinator structure
pub struct Coordinator<F, S> {
    fetcher: F,
    store: S,
    endpoint: ListingEndpoint,
    max_pages: Option<u32>,
    last_stats: Option<CrawlStatistics>,
}

impl<F: Fetcher, S: DocumentStore> Coordinator<F, S> {
    /// Creates a new coordinator
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Fetcher for listing pages, probes and articles
    /// * `store` - Where documents are checked for and written
    /// * `endpoint` - The listing to crawl
    /// * `max_pages` - Optional cap on listing pages
    pub fn new(fetcher: F, store: S, endpoint: ListingEndpoint, max_pages: Option<u32>) -> Self {
        Self {
            fetcher,
            store,
            endpoint,
            max_pages,
            last_stats: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Statistics of the most recent run, including one that failed
    pub fn last_stats(&self) -> Option<&CrawlStatistics> {
        self.last_stats.as_ref()
    }

    /// Runs the main crawl loop
    ///
    /// Items are processed strictly in listing order. The existence check is
    /// made on the listing's own unit, date and title before anything is
    /// fetched, and an existing target ends the entire run.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - The run finished or reached mirrored content
    /// * `Err(MirrorError)` - A listing page could not be fetched or paged
    pub async fn run(&mut self) -> Result<CrawlOutcome, MirrorError> {
        let mut stats = CrawlStatistics::new();
        tracing::info!(url = %self.endpoint.list_url, "Starting crawl");

        let result = self.walk(&mut stats).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "Crawl aborted");
        }
        log_finish(&stats);
        self.last_stats = Some(stats.clone());

        result.map(|stop| CrawlOutcome { stats, stop })
    }

    async fn walk(&mut self, stats: &mut CrawlStatistics) -> Result<StopReason, MirrorError> {
        let mut pages = PageSequence::new(&self.fetcher, self.endpoint.clone(), self.max_pages);

        while let Some(page) = pages.next_page().await? {
            stats.pages_visited += 1;
            tracing::info!(
                page = page.index,
                url = %page.url,
                items = page.records.len(),
                "Processing listing page"
            );

            let total = page.records.len();
            for (position, summary) in page.records.iter().enumerate() {
                stats.items_seen += 1;

                let identity =
                    TargetIdentity::new(&summary.unit, &summary.publish_date, &summary.title);
                if self.store.exists(&identity) {
                    let path = self.store.locate(&identity);
                    tracing::info!(
                        path = %path.display(),
                        "Already mirrored, treating everything older as downloaded"
                    );
                    return Ok(StopReason::AlreadyMirrored { identity, path });
                }

                tracing::info!(
                    "[{}/{}] {} | {} | {}",
                    position + 1,
                    total,
                    summary.publish_date,
                    summary.unit,
                    summary.title
                );

                match mirror_item(&self.fetcher, &mut self.store, summary).await {
                    Ok(path) => {
                        stats.documents_saved += 1;
                        tracing::debug!(path = %path.display(), "Saved document");
                    }
                    Err(e) => {
                        stats.items_failed += 1;
                        tracing::error!(url = %summary.url, error = %e, "Failed to mirror article");
                    }
                }
            }
        }

        tracing::info!("Reached the end of the listing");
        Ok(StopReason::Exhausted)
    }
}

/// Fetches, extracts, reconciles and persists one article
///
/// The target is recomputed from the reconciled record, so it may differ
/// from the listing-derived identity used for the existence check.
async fn mirror_item<F: Fetcher, S: DocumentStore>(
    fetcher: &F,
    store: &mut S,
    summary: &SummaryRecord,
) -> Result<PathBuf, MirrorError> {
    let html = fetcher.fetch(&summary.url).await?;
    let article = parse_article(&html, &summary.url).backfill_from(summary);

    let identity = TargetIdentity::new(
        article.unit.as_deref().unwrap_or(&summary.unit),
        article.publish_date.as_deref().unwrap_or(&summary.publish_date),
        article.title.as_deref().unwrap_or(&summary.title),
    );

    let document = render_document(&article);
    Ok(store.write(&identity, &document)?)
}

fn log_finish(stats: &CrawlStatistics) {
    tracing::info!(
        saved = stats.documents_saved,
        seen = stats.items_seen,
        failed = stats.items_failed,
        pages = stats.pages_visited,
        elapsed_secs = stats.elapsed().as_secs_f64(),
        "Crawl finished"
    );
}

/// Runs the main crawl operation from configuration
///
/// Builds the paced HTTP fetcher and the filesystem store described by
/// `config` and runs a [`Coordinator`] over them.
///
/// # Example
///
/// ```no_run
/// use press_mirror::config::Config;
/// use press_mirror::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_crawl(&Config::default()).await?;
/// println!("saved {}", outcome.stats.documents_saved);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlOutcome, MirrorError> {
    let endpoint = ListingEndpoint::from_config(&config.crawler)?;
    let http = HttpFetcher::from_config(&config.user_agent, &config.fetch)?;
    let fetcher = PacedFetcher::new(http, config.crawler.request_delay());
    let store = open_storage(Path::new(&config.output.output_dir))?;

    let mut coordinator = Coordinator::new(fetcher, store, endpoint, config.crawler.page_limit());
    coordinator.run().await
}

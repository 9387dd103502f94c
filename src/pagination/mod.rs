//! Pagination of the listing
//!
//! The site publishes no paging contract, so the scheme is discovered at run
//! time by probing a fixed list of query parameters:
//! - [`query`]: query-string substitution
//! - [`discovery`]: the bounded probe over candidate schemes
//! - [`sequence`]: the lazy page-by-page walk of the listing

pub mod discovery;
pub mod query;
pub mod sequence;

pub use discovery::{
    discover_pagination, is_new_page, probe_candidates, PaginationMode, PaginationScheme,
    OFFSET_PARAMS, PAGE_INDEX_PARAMS,
};
pub use query::set_query_param;
pub use sequence::{ListingPage, PageSequence};

use crate::config::CrawlerConfig;
use crate::crawler::Fetcher;
use crate::extract::{parse_listing, SummaryRecord};
use crate::FetchError;
use url::Url;

/// Where the listing lives and how its links resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEndpoint {
    /// Page 0 of the listing, requested without any pagination parameter
    pub list_url: Url,

    /// Base for resolving relative article links
    pub link_base: Url,
}

impl ListingEndpoint {
    pub fn new(list_url: Url, link_base: Url) -> Self {
        Self {
            list_url,
            link_base,
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Result<Self, url::ParseError> {
        Ok(Self::new(
            Url::parse(&config.list_url)?,
            Url::parse(&config.base_url)?,
        ))
    }

    /// Fetches one listing URL and extracts its records
    pub async fn fetch_records<F: Fetcher + ?Sized>(
        &self,
        fetcher: &F,
        url: &Url,
    ) -> Result<Vec<SummaryRecord>, FetchError> {
        let html = fetcher.fetch(url.as_str()).await?;
        Ok(parse_listing(&html, &self.link_base))
    }
}

//! Lazy page-by-page walk of the listing

use crate::crawler::Fetcher;
use crate::extract::SummaryRecord;
use crate::pagination::discovery::{discover_pagination, PaginationScheme};
use crate::pagination::ListingEndpoint;
use crate::MirrorError;
use url::Url;

/// One fetched listing page
#[derive(Debug, Clone)]
pub struct ListingPage {
    /// Position in the sequence, starting at 0
    pub index: u32,

    /// The URL the page was fetched from
    pub url: Url,

    pub records: Vec<SummaryRecord>,
}

/// Finite, non-restartable sequence of listing pages
///
/// Page 0 is the bare listing URL. The pagination scheme is discovered only
/// when page 1 is first requested, so a single-page run never probes. The
/// sequence ends at the first later page with no records, when discovery
/// finds no second page, at the page cap, or after the first error.
pub struct PageSequence<'a, F: ?Sized> {
    fetcher: &'a F,
    endpoint: ListingEndpoint,
    max_pages: Option<u32>,
    scheme: Option<PaginationScheme>,
    first_page: Vec<SummaryRecord>,
    next_index: u32,
    finished: bool,
}

impl<'a, F: Fetcher + ?Sized> PageSequence<'a, F> {
    /// Creates a sequence; nothing is fetched until [`next_page`](Self::next_page)
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Fetcher for listing pages and probes
    /// * `endpoint` - The listing to walk
    /// * `max_pages` - Optional cap on the number of pages yielded
    pub fn new(fetcher: &'a F, endpoint: ListingEndpoint, max_pages: Option<u32>) -> Self {
        Self {
            fetcher,
            endpoint,
            max_pages,
            scheme: None,
            first_page: Vec::new(),
            next_index: 0,
            finished: false,
        }
    }

    /// The pagination scheme, once discovered
    pub fn scheme(&self) -> Option<&PaginationScheme> {
        self.scheme.as_ref()
    }

    /// Fetches the next page
    ///
    /// # Returns
    ///
    /// * `Ok(Some(page))` - The next page of the listing
    /// * `Ok(None)` - The listing ran out or the page cap was reached
    /// * `Err(MirrorError)` - A listing fetch or pagination discovery failed
    pub async fn next_page(&mut self) -> Result<Option<ListingPage>, MirrorError> {
        if self.finished {
            return Ok(None);
        }

        let index = self.next_index;
        if self.max_pages.is_some_and(|limit| index >= limit) {
            tracing::debug!(limit = index, "Page cap reached");
            self.finished = true;
            return Ok(None);
        }

        let result = self.fetch_page(index).await;
        match result {
            Ok(Some(page)) => {
                self.next_index += 1;
                Ok(Some(page))
            }
            Ok(None) => {
                self.finished = true;
                Ok(None)
            }
            Err(e) => {
                self.finished = true;
                Err(e)
            }
        }
    }

    async fn fetch_page(&mut self, index: u32) -> Result<Option<ListingPage>, MirrorError> {
        let url = if index == 0 {
            self.endpoint.list_url.clone()
        } else {
            match self.scheme_for_later_pages().await? {
                Some(scheme) => scheme.page_url(&self.endpoint.list_url, index),
                None => return Ok(None),
            }
        };

        let records = self.endpoint.fetch_records(self.fetcher, &url).await?;

        if index == 0 {
            self.first_page = records.clone();
        } else if records.is_empty() {
            tracing::info!(page = index, url = %url, "Listing page is empty, end of listing");
            return Ok(None);
        }

        Ok(Some(ListingPage {
            index,
            url,
            records,
        }))
    }

    /// `None` means the listing has no second page
    async fn scheme_for_later_pages(&mut self) -> Result<Option<PaginationScheme>, MirrorError> {
        if let Some(scheme) = &self.scheme {
            return Ok(Some(scheme.clone()));
        }

        let scheme = discover_pagination(self.fetcher, &self.endpoint, &self.first_page).await?;
        self.scheme = scheme.clone();
        Ok(scheme)
    }
}

//! Pagination scheme discovery
//!
//! Discovery is a bounded trial over an ordered candidate list: each
//! candidate scheme is asked for the site's second page and the first one
//! that returns records different from page 0 wins. Nothing after a success
//! is probed, and a fixed scheme is trusted for the rest of the run. A listing
//! whose every probe comes back empty has no second page at all.

use crate::crawler::Fetcher;
use crate::extract::SummaryRecord;
use crate::pagination::query::set_query_param;
use crate::pagination::ListingEndpoint;
use crate::{DiscoveryError, MirrorError};
use std::collections::HashSet;
use url::Url;

/// Page-number parameters, tried first and in this order
pub const PAGE_INDEX_PARAMS: [&str; 6] = ["page", "pageIndex", "pageNo", "pageNum", "p", "pg"];

/// Offset parameters, each tried zero-based then one-based
pub const OFFSET_PARAMS: [&str; 4] = ["start", "offset", "from", "begin"];

/// How a listing page is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaginationMode {
    /// The parameter carries a 1-based page number
    PageIndex,
    /// The parameter carries the position of the first item on the page
    Offset,
}

/// The discovered paging convention of one listing URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaginationScheme {
    pub mode: PaginationMode,

    /// Query parameter name
    pub param: String,

    /// Page size (offset mode only)
    pub step: u64,

    /// Whether offsets count from 1 (offset mode only)
    pub offset_one_based: bool,
}

impl PaginationScheme {
    pub fn page_index(param: &str) -> Self {
        Self {
            mode: PaginationMode::PageIndex,
            param: param.to_string(),
            step: 0,
            offset_one_based: false,
        }
    }

    pub fn offset(param: &str, step: u64, one_based: bool) -> Self {
        Self {
            mode: PaginationMode::Offset,
            param: param.to_string(),
            step,
            offset_one_based: one_based,
        }
    }

    /// Parameter value addressing page `index` of the sequence
    ///
    /// Page-index schemes send the index itself; offset schemes send the
    /// position of the page's first item, `(index - 1) * step`, plus one when
    /// offsets count from 1.
    pub fn param_value(&self, index: u32) -> u64 {
        let index = u64::from(index);
        match self.mode {
            PaginationMode::PageIndex => index,
            PaginationMode::Offset => self.with_base(index.saturating_sub(1) * self.step),
        }
    }

    /// Parameter value used when probing the candidate: the site's second page
    pub fn probe_value(&self) -> u64 {
        match self.mode {
            PaginationMode::PageIndex => 2,
            PaginationMode::Offset => self.with_base(self.step),
        }
    }

    fn with_base(&self, offset: u64) -> u64 {
        if self.offset_one_based {
            offset + 1
        } else {
            offset
        }
    }

    /// URL of page `index`; page 0 is always `list_url` unchanged
    pub fn page_url(&self, list_url: &Url, index: u32) -> Url {
        if index == 0 {
            return list_url.clone();
        }
        set_query_param(list_url, &self.param, &self.param_value(index).to_string())
    }

    /// URL requested when probing this candidate
    pub fn probe_url(&self, list_url: &Url) -> Url {
        set_query_param(list_url, &self.param, &self.probe_value().to_string())
    }
}

/// All candidate schemes in probe order
///
/// Probing a candidate means requesting the site's second page: `param=2`
/// for page-index candidates, `param=page_size` or `param=page_size + 1` for
/// offsets.
pub fn probe_candidates(page_size: usize) -> Vec<PaginationScheme> {
    let step = page_size.max(1) as u64;

    let page_index = PAGE_INDEX_PARAMS
        .iter()
        .map(|param| PaginationScheme::page_index(param));

    let offsets = OFFSET_PARAMS.iter().flat_map(|param| {
        [false, true]
            .into_iter()
            .map(move |one_based| PaginationScheme::offset(param, step, one_based))
    });

    page_index.chain(offsets).collect()
}

/// True if a probe returned a real, different page
///
/// The probe must yield records, and its URL set must differ from the
/// baseline (a site ignoring the parameter would serve page 0 again).
pub fn is_new_page(baseline: &HashSet<&str>, records: &[SummaryRecord]) -> bool {
    if records.is_empty() {
        return false;
    }
    let urls: HashSet<&str> = records.iter().map(|r| r.url.as_str()).collect();
    &urls != baseline
}

/// Determines the paging scheme of a listing by bounded probing
///
/// # Arguments
///
/// * `fetcher` - Fetcher used for the probes
/// * `endpoint` - The listing being paged
/// * `first_page` - Records of page 0, the baseline for comparison
///
/// # Returns
///
/// * `Ok(Some(scheme))` - The first candidate that produced a new page
/// * `Ok(None)` - Every probe came back empty: the listing has a single page
/// * `Err(MirrorError::Discovery)` - Page 0 was empty, or some probe served
///   records but none differed from page 0
/// * `Err(MirrorError::Fetch)` - A probe request failed after retries
pub async fn discover_pagination<F: Fetcher + ?Sized>(
    fetcher: &F,
    endpoint: &ListingEndpoint,
    first_page: &[SummaryRecord],
) -> Result<Option<PaginationScheme>, MirrorError> {
    if first_page.is_empty() {
        return Err(DiscoveryError::EmptyFirstPage {
            url: endpoint.list_url.to_string(),
        }
        .into());
    }

    let baseline: HashSet<&str> = first_page.iter().map(|r| r.url.as_str()).collect();
    let candidates = probe_candidates(first_page.len());
    let mut served_records = false;

    for candidate in &candidates {
        let probe_url = candidate.probe_url(&endpoint.list_url);
        tracing::debug!(url = %probe_url, param = %candidate.param, "Probing pagination candidate");

        let records = endpoint.fetch_records(fetcher, &probe_url).await?;
        if is_new_page(&baseline, &records) {
            tracing::info!(
                mode = ?candidate.mode,
                param = %candidate.param,
                step = candidate.step,
                one_based = candidate.offset_one_based,
                "Pagination scheme discovered"
            );
            return Ok(Some(candidate.clone()));
        }
        served_records |= !records.is_empty();
    }

    if !served_records {
        tracing::info!(
            url = %endpoint.list_url,
            probes = candidates.len(),
            "No second listing page exists, listing has a single page"
        );
        return Ok(None);
    }

    Err(DiscoveryError::Exhausted {
        url: endpoint.list_url.to_string(),
        attempts: candidates.len(),
    }
    .into())
}

//! In-memory fetcher for unit tests

use crate::crawler::Fetcher;
use crate::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned pages by exact URL and records every call
#[derive(Debug, Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    default_page: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Page returned for any URL without its own entry
    pub fn with_default(mut self, html: &str) -> Self {
        self.default_page = Some(html.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());

        self.pages
            .get(url)
            .or(self.default_page.as_ref())
            .cloned()
            .ok_or_else(|| FetchError {
                url: url.to_string(),
                attempts: 1,
                message: "HTTP 404".to_string(),
            })
    }
}

//! Request pacing
//!
//! The crawler is strictly sequential; the only scheduling knob is a fixed
//! delay between any two consecutive requests, whatever they are for
//! (listing pages, pagination probes or articles).

use crate::crawler::Fetcher;
use crate::FetchError;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Enforces a minimum gap between the end of one request and the start of
/// the next
#[derive(Debug)]
pub struct RequestPacer {
    delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits until the next request may start
    ///
    /// The first request never waits.
    pub async fn wait_turn(&self) {
        let last_request = *self.last_request.lock().await;

        if let Some(last) = last_request {
            let ready_at = last + self.delay;
            let now = Instant::now();
            if ready_at > now {
                tokio::time::sleep(ready_at - now).await;
            }
        }
    }

    /// Records that a request just completed, successfully or not
    pub async fn request_finished(&self) {
        *self.last_request.lock().await = Some(Instant::now());
    }
}

/// A [`Fetcher`] that paces every request through a [`RequestPacer`]
#[derive(Debug)]
pub struct PacedFetcher<F> {
    inner: F,
    pacer: RequestPacer,
}

impl<F: Fetcher> PacedFetcher<F> {
    pub fn new(inner: F, delay: Duration) -> Self {
        Self {
            inner,
            pacer: RequestPacer::new(delay),
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for PacedFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.pacer.wait_turn().await;
        let result = self.inner.fetch(url).await;
        self.pacer.request_finished().await;
        result
    }
}

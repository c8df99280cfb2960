//! Scrape orchestration: one invocation drives one page lifecycle.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use birdwatch_core::{CoreError, PostRecord, UserProfile};

use crate::collector::ResponseCollector;
use crate::driver::{PageDriver, RawResponse};
use crate::matcher::{filter_matches, POST_DETAIL_MARKER, USER_LOOKUP_MARKER};
use crate::normalize::{parse_post_payload, parse_profile_payload};

/// DOM marker indicating the post content rendered.
pub const POST_READY_SELECTOR: &str = "[data-testid='tweet']";
/// DOM marker indicating the profile column rendered.
pub const PROFILE_READY_SELECTOR: &str = "[data-testid='primaryColumn']";

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub ready_timeout: Duration,
    pub viewport: (u32, u32),
    pub headless: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            ready_timeout: Duration::from_secs(30),
            viewport: (1920, 1080),
            headless: true,
        }
    }
}

/// Composes the driver, collector, matcher and normalizer for one scrape.
/// Consumed per invocation; the driver is released on every exit path.
pub struct Scraper<D: PageDriver> {
    driver: D,
    collector: ResponseCollector,
    ready_timeout: Duration,
}

impl<D: PageDriver> Scraper<D> {
    pub fn new(
        driver: D,
        responses: mpsc::UnboundedReceiver<RawResponse>,
        ready_timeout: Duration,
    ) -> Self {
        Self {
            driver,
            collector: ResponseCollector::new(responses),
            ready_timeout,
        }
    }

    /// Post-detail mode: every response matching the post-detail endpoint
    /// yields one record, in arrival order. A page load can issue more than
    /// one relevant call, so this deliberately emits all matches.
    pub async fn scrape_post(mut self, url: &str) -> Result<Vec<PostRecord>, CoreError> {
        let outcome = self.run_post(url).await;
        self.release().await;
        outcome
    }

    /// Profile mode: the first response matching the user-lookup endpoint
    /// wins; the rest of the buffer is discarded. `None` when nothing
    /// matched.
    pub async fn scrape_profile(mut self, url: &str) -> Result<Option<UserProfile>, CoreError> {
        let outcome = self.run_profile(url).await;
        self.release().await;
        outcome
    }

    async fn run_post(&mut self, url: &str) -> Result<Vec<PostRecord>, CoreError> {
        info!(%url, "navigating to post page");
        self.driver.navigate(url).await?;
        self.driver
            .wait_for_ready(POST_READY_SELECTOR, self.ready_timeout)
            .await?;

        let buffered = self.collector.drain();
        let matches = filter_matches(buffered, POST_DETAIL_MARKER);
        debug!(
            buffered = buffered.len(),
            matched = matches.len(),
            marker = POST_DETAIL_MARKER,
            "filtered captured responses"
        );

        let mut records = Vec::with_capacity(matches.len());
        for response in matches {
            let body = match self.driver.response_body(response).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(url = %response.url, error = %e, "response body unavailable, skipping");
                    continue;
                }
            };
            match parse_post_payload(&body) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(url = %response.url, error = %e, "malformed payload, skipping");
                }
            }
        }

        if records.is_empty() {
            info!("no post data captured; the target may be deleted or login-gated");
        } else {
            info!(records = records.len(), "extracted post records");
        }
        Ok(records)
    }

    async fn run_profile(&mut self, url: &str) -> Result<Option<UserProfile>, CoreError> {
        info!(%url, "navigating to profile page");
        self.driver.navigate(url).await?;
        self.driver
            .wait_for_ready(PROFILE_READY_SELECTOR, self.ready_timeout)
            .await?;

        let buffered = self.collector.drain();
        let matches = filter_matches(buffered, USER_LOOKUP_MARKER);
        debug!(
            buffered = buffered.len(),
            matched = matches.len(),
            marker = USER_LOOKUP_MARKER,
            "filtered captured responses"
        );

        let first = match matches.first() {
            Some(response) => *response,
            None => {
                info!("no user lookup captured; the profile may be login-gated");
                return Ok(None);
            }
        };

        let body = self.driver.response_body(first).await?;
        let profile = parse_profile_payload(&body)?;
        info!(handle = profile.name.as_deref().unwrap_or("<unknown>"), "extracted profile");
        Ok(Some(profile))
    }

    /// Runs on success, empty-result and error paths alike. A close failure
    /// must not override the scrape outcome, so it is only logged.
    async fn release(&mut self) {
        if let Err(e) = self.driver.close().await {
            warn!(error = %e, "failed to close browser cleanly");
        }
    }
}

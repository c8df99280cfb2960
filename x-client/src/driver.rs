//! The seam between the scrape orchestration and the automation engine.
//!
//! A driver hands out the receiving end of a per-invocation response channel
//! at construction time, before any navigation is requested. Events the
//! browser fires before that channel exists are lost by design; creating the
//! channel first is what guarantees the listen-before-navigate ordering the
//! interception model requires.

use async_trait::async_trait;
use birdwatch_core::BrowserError;
use std::time::Duration;

/// Resource classification of an intercepted response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Script-issued asynchronous fetch (the only kind worth buffering).
    Xhr,
    /// Everything else: documents, scripts, images, fonts, ...
    Other,
}

/// An intercepted network response. The body is not carried here; it stays in
/// the browser and is fetched lazily by id through the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub id: String,
    pub url: String,
    pub kind: ResourceKind,
}

#[async_trait]
pub trait PageDriver {
    /// Request navigation to `url` and wait for the navigation response.
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// Suspend until `selector` appears in the DOM or `timeout` elapses.
    async fn wait_for_ready(&self, selector: &str, timeout: Duration)
        -> Result<(), BrowserError>;

    /// Fetch the body of a previously intercepted response.
    async fn response_body(&self, response: &RawResponse) -> Result<String, BrowserError>;

    /// Tear down the page and browser. Called on every exit path of a scrape.
    async fn close(&mut self) -> Result<(), BrowserError>;
}

//! chromiumoxide-backed [`PageDriver`].

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EventResponseReceived, GetResponseBodyParams, ResourceType,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use birdwatch_core::BrowserError;

use crate::driver::{PageDriver, RawResponse, ResourceKind};
use crate::scrape::ScrapeConfig;

const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct ChromeDriver {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    forwarder_task: JoinHandle<()>,
}

impl ChromeDriver {
    /// Launch a browser, open a blank page and subscribe to its network
    /// response events. The returned receiver is the invocation's response
    /// channel; it exists before any navigation can happen.
    pub async fn launch(
        config: &ScrapeConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<RawResponse>), BrowserError> {
        let mut builder = BrowserConfig::builder().window_size(config.viewport.0, config.viewport.1);
        if !config.headless {
            builder = builder.with_head();
        }
        let browser_config = builder
            .build()
            .map_err(|reason| BrowserError::Launch { reason })?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            BrowserError::Launch {
                reason: e.to_string(),
            }
        })?;

        // Drives the websocket connection until the browser goes away.
        let handler_task = tokio::spawn(async move {
            while let Some(result) = handler.next().await {
                if result.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Launch {
                reason: e.to_string(),
            })?;

        let mut events = page
            .event_listener::<EventResponseReceived>()
            .await
            .map_err(|e| BrowserError::Protocol {
                reason: e.to_string(),
            })?;

        let (tx, rx) = mpsc::unbounded_channel();
        let forwarder_task = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                let raw = RawResponse {
                    id: event.request_id.inner().clone(),
                    url: event.response.url.clone(),
                    kind: kind_of(&event.r#type),
                };
                trace!(url = %raw.url, kind = ?raw.kind, "intercepted response");
                if tx.send(raw).is_err() {
                    break;
                }
            }
        });

        debug!("browser launched, response listener attached");
        Ok((
            Self {
                browser,
                page,
                handler_task,
                forwarder_task,
            },
            rx,
        ))
    }
}

/// Pages issue their API calls through both `XMLHttpRequest` and `fetch()`;
/// the split between the two CDP resource types is a transport detail.
fn kind_of(resource_type: &ResourceType) -> ResourceKind {
    match resource_type {
        ResourceType::Xhr | ResourceType::Fetch => ResourceKind::Xhr,
        _ => ResourceKind::Other,
    }
}

#[async_trait]
impl PageDriver for ChromeDriver {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn wait_for_ready(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let appeared = tokio::time::timeout(timeout, async {
            loop {
                if self.page.find_element(selector).await.is_ok() {
                    return;
                }
                tokio::time::sleep(READY_POLL_INTERVAL).await;
            }
        })
        .await;

        appeared.map_err(|_| BrowserError::ReadyTimeout {
            marker: selector.to_string(),
            seconds: timeout.as_secs(),
        })
    }

    async fn response_body(&self, response: &RawResponse) -> Result<String, BrowserError> {
        let reply = self
            .page
            .execute(GetResponseBodyParams::new(response.id.clone()))
            .await
            .map_err(|e| BrowserError::BodyUnavailable {
                request_id: response.id.clone(),
                reason: e.to_string(),
            })?;

        let returns = reply.result;
        if returns.base64_encoded {
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(returns.body.as_bytes())
                .map_err(|e| BrowserError::BodyUnavailable {
                    request_id: response.id.clone(),
                    reason: format!("invalid base64 body: {e}"),
                })?;
            String::from_utf8(bytes).map_err(|e| BrowserError::BodyUnavailable {
                request_id: response.id.clone(),
                reason: format!("body is not utf-8: {e}"),
            })
        } else {
            Ok(returns.body)
        }
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        self.forwarder_task.abort();

        let closed = self.browser.close().await.map(|_| ()).map_err(|e| BrowserError::Protocol {
            reason: e.to_string(),
        });
        // The handler loop must keep running while the close command is in
        // flight; only stop it once the process is down.
        if self.browser.wait().await.is_err() {
            warn!("browser process did not exit cleanly");
        }
        self.handler_task.abort();

        debug!("browser closed");
        closed
    }
}

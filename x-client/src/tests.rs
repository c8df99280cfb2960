use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc;

use birdwatch_core::{BrowserError, CoreError};

use crate::driver::{PageDriver, RawResponse, ResourceKind};
use crate::scrape::Scraper;

const TIMEOUT: Duration = Duration::from_secs(5);

struct FakeDriver {
    bodies: HashMap<String, String>,
    fail_navigation: bool,
    closed: Arc<AtomicBool>,
}

impl FakeDriver {
    /// All events are published into the channel up front, simulating
    /// responses that arrived while the page was loading.
    fn new(
        events: Vec<RawResponse>,
        bodies: Vec<(&str, String)>,
    ) -> (Self, mpsc::UnboundedReceiver<RawResponse>, Arc<AtomicBool>) {
        let (tx, rx) = mpsc::unbounded_channel();
        for event in events {
            tx.send(event).expect("receiver alive");
        }
        let closed = Arc::new(AtomicBool::new(false));
        let driver = Self {
            bodies: bodies
                .into_iter()
                .map(|(id, body)| (id.to_string(), body))
                .collect(),
            fail_navigation: false,
            closed: closed.clone(),
        };
        (driver, rx, closed)
    }

    fn failing_navigation() -> (Self, mpsc::UnboundedReceiver<RawResponse>, Arc<AtomicBool>) {
        let (mut driver, rx, closed) = Self::new(Vec::new(), Vec::new());
        driver.fail_navigation = true;
        (driver, rx, closed)
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        if self.fail_navigation {
            Err(BrowserError::Navigation {
                url: url.to_string(),
                reason: "net::ERR_CONNECTION_REFUSED".to_string(),
            })
        } else {
            Ok(())
        }
    }

    async fn wait_for_ready(
        &self,
        _selector: &str,
        _timeout: Duration,
    ) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn response_body(&self, response: &RawResponse) -> Result<String, BrowserError> {
        self.bodies
            .get(&response.id)
            .cloned()
            .ok_or_else(|| BrowserError::BodyUnavailable {
                request_id: response.id.clone(),
                reason: "body evicted".to_string(),
            })
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

fn xhr(id: &str, url: &str) -> RawResponse {
    RawResponse {
        id: id.to_string(),
        url: url.to_string(),
        kind: ResourceKind::Xhr,
    }
}

fn other(id: &str, url: &str) -> RawResponse {
    RawResponse {
        id: id.to_string(),
        url: url.to_string(),
        kind: ResourceKind::Other,
    }
}

fn post_body(text: &str, likes: u64) -> String {
    json!({"data": {"tweetResult": {"result": {
        "legacy": {"full_text": text, "favorite_count": likes}
    }}}})
    .to_string()
}

fn profile_body(name: &str) -> String {
    json!({"data": {"user": {"result": {
        "id": "VXNlcjox",
        "legacy": {"name": name}
    }}}})
    .to_string()
}

const POST_URL: &str = "https://x.com/i/api/graphql/abc/TweetResultByRestId?id=1";
const USER_URL: &str = "https://x.com/i/api/graphql/abc/UserByScreenName?name=x";
const NOISE_URL: &str = "https://x.com/i/api/graphql/abc/HomeTimeline";

#[tokio::test]
async fn empty_buffer_yields_empty_result() {
    let (driver, rx, closed) = FakeDriver::new(Vec::new(), Vec::new());
    let records = Scraper::new(driver, rx, TIMEOUT)
        .scrape_post("https://x.com/someone/status/1")
        .await
        .expect("empty buffer is not an error");

    assert!(records.is_empty());
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn emits_one_record_per_match_in_arrival_order() {
    let (driver, rx, closed) = FakeDriver::new(
        vec![xhr("1", POST_URL), xhr("2", NOISE_URL), xhr("3", POST_URL)],
        vec![
            ("1", post_body("first", 1)),
            ("3", post_body("second", 2)),
        ],
    );
    let records = Scraper::new(driver, rx, TIMEOUT)
        .scrape_post("https://x.com/someone/status/1")
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].text.as_deref(), Some("first"));
    assert_eq!(records[1].text.as_deref(), Some("second"));
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn non_xhr_responses_are_never_matched() {
    let (driver, rx, _closed) = FakeDriver::new(
        vec![other("1", POST_URL)],
        vec![("1", post_body("should not appear", 0))],
    );
    let records = Scraper::new(driver, rx, TIMEOUT)
        .scrape_post("https://x.com/someone/status/1")
        .await
        .unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn malformed_payloads_are_skipped_not_fatal() {
    let (driver, rx, _closed) = FakeDriver::new(
        vec![xhr("1", POST_URL), xhr("2", POST_URL), xhr("3", POST_URL)],
        vec![
            ("1", "{not json".to_string()),
            ("2", json!({"data": {"unexpected": {}}}).to_string()),
            ("3", post_body("survivor", 3)),
        ],
    );
    let records = Scraper::new(driver, rx, TIMEOUT)
        .scrape_post("https://x.com/someone/status/1")
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text.as_deref(), Some("survivor"));
}

#[tokio::test]
async fn unavailable_body_is_skipped_in_post_mode() {
    // "4" has no registered body; the fetch fails and the record is dropped.
    let (driver, rx, _closed) = FakeDriver::new(
        vec![xhr("4", POST_URL), xhr("5", POST_URL)],
        vec![("5", post_body("kept", 9))],
    );
    let records = Scraper::new(driver, rx, TIMEOUT)
        .scrape_post("https://x.com/someone/status/1")
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text.as_deref(), Some("kept"));
}

#[tokio::test]
async fn navigation_failure_is_fatal_but_still_releases_driver() {
    let (driver, rx, closed) = FakeDriver::failing_navigation();
    let result = Scraper::new(driver, rx, TIMEOUT)
        .scrape_post("https://x.com/someone/status/1")
        .await;

    assert!(matches!(
        result,
        Err(CoreError::Browser(BrowserError::Navigation { .. }))
    ));
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn profile_mode_first_match_wins() {
    let (driver, rx, closed) = FakeDriver::new(
        vec![xhr("1", USER_URL), xhr("2", USER_URL)],
        vec![
            ("1", profile_body("First Match")),
            ("2", profile_body("Second Match")),
        ],
    );
    let profile = Scraper::new(driver, rx, TIMEOUT)
        .scrape_profile("https://x.com/someone")
        .await
        .unwrap()
        .expect("profile should be extracted");

    assert_eq!(profile.name.as_deref(), Some("First Match"));
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn profile_mode_no_match_yields_none() {
    let (driver, rx, closed) = FakeDriver::new(vec![xhr("1", NOISE_URL)], Vec::new());
    let profile = Scraper::new(driver, rx, TIMEOUT)
        .scrape_profile("https://x.com/someone")
        .await
        .unwrap();

    assert!(profile.is_none());
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn profile_mode_malformed_payload_is_fatal() {
    let (driver, rx, closed) = FakeDriver::new(
        vec![xhr("1", USER_URL)],
        vec![("1", "{not json".to_string())],
    );
    let result = Scraper::new(driver, rx, TIMEOUT)
        .scrape_profile("https://x.com/someone")
        .await;

    assert!(matches!(result, Err(CoreError::Extract(_))));
    assert!(closed.load(Ordering::SeqCst));
}

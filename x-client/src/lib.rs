pub mod chrome;
pub mod collector;
pub mod driver;
pub mod embed;
pub mod matcher;
pub mod normalize;
pub mod scrape;

#[cfg(test)]
mod tests;

pub use chrome::ChromeDriver;
pub use collector::ResponseCollector;
pub use driver::{PageDriver, RawResponse, ResourceKind};
pub use matcher::{filter_matches, POST_DETAIL_MARKER, USER_LOOKUP_MARKER};
pub use scrape::{ScrapeConfig, Scraper, POST_READY_SELECTOR, PROFILE_READY_SELECTOR};

pub const PLATFORM_BASE_URL: &str = "https://x.com";

/// Expand a bare handle to a canonical profile URL. Anything already carrying
/// an http(s) scheme passes through untouched.
pub fn profile_url_for(target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        format!("{PLATFORM_BASE_URL}/{}", target.trim_start_matches('@'))
    }
}

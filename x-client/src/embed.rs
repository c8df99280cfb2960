//! Trivial client for the platform's public oEmbed endpoint. No structural
//! extraction happens here; callers render the payload as-is.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use birdwatch_core::{CoreError, EmbedError};

const OEMBED_ENDPOINT: &str = "https://publish.x.com/oembed";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn fetch_embed(post_url: &str) -> Result<Value, CoreError> {
    let endpoint =
        Url::parse_with_params(OEMBED_ENDPOINT, &[("url", post_url)]).map_err(|e| {
            CoreError::InvalidInput {
                message: format!("invalid post url: {e}"),
            }
        })?;

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    info!(%post_url, "fetching oEmbed payload");
    let response = client.get(endpoint).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CoreError::Embed(EmbedError::Status {
            status: status.as_u16(),
        }));
    }

    let payload = response.json::<Value>().await.map_err(|e| {
        CoreError::Embed(EmbedError::InvalidResponse {
            details: e.to_string(),
        })
    })?;
    debug!("oEmbed payload received");
    Ok(payload)
}

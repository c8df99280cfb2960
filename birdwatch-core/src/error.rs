use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Embed API error: {0}")]
    Embed(#[from] EmbedError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Operation timeout after {seconds} seconds")]
    Timeout { seconds: u64 },
}

#[derive(Error, Debug, Clone)]
pub enum BrowserError {
    #[error("Failed to launch browser: {reason}")]
    Launch { reason: String },

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Content marker {marker} did not appear within {seconds} seconds")]
    ReadyTimeout { marker: String, seconds: u64 },

    #[error("Response body unavailable for request {request_id}: {reason}")]
    BodyUnavailable { request_id: String, reason: String },

    #[error("DevTools protocol error: {reason}")]
    Protocol { reason: String },
}

#[derive(Error, Debug, Clone)]
pub enum ExtractError {
    #[error("Response body is not valid JSON: {details}")]
    InvalidJson { details: String },

    #[error("Payload is missing the expected wrapper: {wrapper}")]
    MissingWrapper { wrapper: String },
}

#[derive(Error, Debug, Clone)]
pub enum EmbedError {
    #[error("Embed endpoint returned status {status}")]
    Status { status: u16 },

    #[error("Invalid embed response: {details}")]
    InvalidResponse { details: String },
}

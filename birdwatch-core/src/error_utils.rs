use crate::error::*;
use tracing::{error, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn is_retryable(&self) -> bool;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Browser(e) => {
                error!("Browser error details: {:?}", e);
            }
            CoreError::Extract(e) => {
                error!("Extraction error details: {:?}", e);
            }
            CoreError::Embed(e) => {
                error!("Embed error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        match self {
            CoreError::Browser(e) => e.is_retryable(),
            CoreError::Network(_) => true,
            CoreError::Timeout { .. } => true,
            _ => false,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Browser(e) => e.user_friendly_message(),
            CoreError::Extract(e) => e.user_friendly_message(),
            CoreError::Embed(EmbedError::Status { status }) => {
                format!("The embed endpoint rejected the request (status {status}).")
            }
            CoreError::Embed(EmbedError::InvalidResponse { .. }) => {
                "The embed endpoint returned an unreadable response.".to_string()
            }
            CoreError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            CoreError::InvalidInput { message } => {
                format!("Invalid input: {message}")
            }
            CoreError::Timeout { .. } => {
                "The operation took too long to complete. Please try again.".to_string()
            }
            _ => "An unexpected error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Browser(_) => "BROWSER".to_string(),
            CoreError::Extract(_) => "EXTRACT".to_string(),
            CoreError::Embed(_) => "EMBED".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
            CoreError::Timeout { .. } => "TIMEOUT".to_string(),
        }
    }
}

impl ErrorExt for BrowserError {
    fn log_error(&self) -> &Self {
        error!("BrowserError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("BrowserError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        match self {
            BrowserError::Navigation { .. } => true,
            BrowserError::ReadyTimeout { .. } => true,
            BrowserError::Launch { .. } => false,
            BrowserError::BodyUnavailable { .. } => false,
            BrowserError::Protocol { .. } => false,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            BrowserError::Launch { .. } => {
                "Could not start the browser. Is Chrome or Chromium installed?".to_string()
            }
            BrowserError::Navigation { url, .. } => {
                format!("Could not open the page at {url}.")
            }
            BrowserError::ReadyTimeout { seconds, .. } => format!(
                "The page did not finish loading within {seconds} seconds. \
                 The post may be deleted or behind a login wall."
            ),
            BrowserError::BodyUnavailable { .. } => {
                "A captured response body could not be read back from the browser.".to_string()
            }
            BrowserError::Protocol { .. } => {
                "The browser connection failed unexpectedly.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            BrowserError::Launch { .. } => "BROWSER_LAUNCH".to_string(),
            BrowserError::Navigation { .. } => "BROWSER_NAVIGATION".to_string(),
            BrowserError::ReadyTimeout { .. } => "BROWSER_READY_TIMEOUT".to_string(),
            BrowserError::BodyUnavailable { .. } => "BROWSER_BODY_UNAVAILABLE".to_string(),
            BrowserError::Protocol { .. } => "BROWSER_PROTOCOL".to_string(),
        }
    }
}

impl ErrorExt for ExtractError {
    fn log_error(&self) -> &Self {
        error!("ExtractError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ExtractError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        false
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ExtractError::InvalidJson { .. } => {
                "A captured response was not valid JSON and was skipped.".to_string()
            }
            ExtractError::MissingWrapper { wrapper } => format!(
                "A captured response did not carry the expected {wrapper} data."
            ),
        }
    }

    fn error_code(&self) -> String {
        match self {
            ExtractError::InvalidJson { .. } => "EXTRACT_INVALID_JSON".to_string(),
            ExtractError::MissingWrapper { .. } => "EXTRACT_MISSING_WRAPPER".to_string(),
        }
    }
}

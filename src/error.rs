//! Error handling for the resume screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("LLM request failed: {0}")]
    LlmRequest(String),

    #[error("LLM API error (status {status}): {message}")]
    LlmApi { status: u16, message: String },

    #[error("Malformed score response: {0}")]
    ScoreParse(String),

    #[error("Mail delivery error: {0}")]
    Mail(String),

    #[error("Inbox error: {0}")]
    Inbox(String),

    #[error("Timed out after {seconds}s while screening {path}")]
    Timeout { path: String, seconds: u64 },

    #[error("Template rendering error: {0}")]
    Template(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

impl From<reqwest::Error> for ScreenerError {
    fn from(err: reqwest::Error) -> Self {
        ScreenerError::LlmRequest(err.to_string())
    }
}

impl From<askama::Error> for ScreenerError {
    fn from(err: askama::Error) -> Self {
        ScreenerError::Template(err.to_string())
    }
}

impl From<imap::error::Error> for ScreenerError {
    fn from(err: imap::error::Error) -> Self {
        ScreenerError::Inbox(err.to_string())
    }
}

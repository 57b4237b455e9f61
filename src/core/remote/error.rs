use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Remote store is not configured")]
    Unconfigured,

    #[error("Remote store unreachable: {0}")]
    Unreachable(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote store answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("No remote record with id {0}")]
    NotFound(String),

    #[error("Malformed remote payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Live update stream failed: {0}")]
    Stream(String),
}

impl RemoteError {
    /// Whether the failure means remote sync is switched off rather than broken.
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, RemoteError::Unconfigured)
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid AI endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathlinkerError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{service} returned HTTP {status} for {url}")]
    UpstreamStatus {
        service: &'static str,
        status: u16,
        url: String,
    },

    #[error("Malformed {service} response: {detail}")]
    MalformedResponse {
        service: &'static str,
        detail: String,
    },

    #[error("Security error: {0}")]
    SecurityError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PathlinkerError {
    pub fn malformed(service: &'static str, detail: impl Into<String>) -> Self {
        PathlinkerError::MalformedResponse { service, detail: detail.into() }
    }
}

pub type Result<T> = std::result::Result<T, PathlinkerError>;

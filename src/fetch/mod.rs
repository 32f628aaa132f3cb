mod http;

use async_trait::async_trait;
use serde_json::Value;

pub use http::HttpFetcher;

/// Failure of a read-only resource request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("response from {url} is not valid JSON: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Status { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

/// Source of JSON resources. Every request is an unauthenticated `GET` without
/// headers or body; any non-2xx answer is a [`FetchError::Status`].
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

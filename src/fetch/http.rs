use async_trait::async_trait;
use serde_json::Value;

use super::{FetchError, ResourceFetcher};

/// [`ResourceFetcher`] backed by a shared `reqwest` client. Requests are bare
/// `GET`s with no extra headers and no timeout: a request that never answers
/// keeps its stage loading.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn with_default_client() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| FetchError::Decode {
                url: url.to_string(),
                message: err.to_string(),
            })
    }
}

use super::{ImageSource, ImageUrl, NetworkError};
use serde::Deserialize;

/// Public endpoint returning one random image per request
pub const DEFAULT_ENDPOINT: &str = "https://api.waifu.pics/sfw/waifu";

/// Body of a successful response: `{"url": "https://..."}`
#[derive(Debug, Deserialize)]
struct ImageResponse {
    url: ImageUrl,
}

/// [`ImageSource`] backed by a single stateless HTTP GET endpoint.
///
/// No authentication, no pagination parameters and no retry: every call is
/// one request, and every request returns one random image.
#[derive(Debug, Clone)]
pub struct WaifuClient {
    client: reqwest::Client,
    endpoint: String,
}

impl WaifuClient {
    /// Create a client for `endpoint` with the default user agent
    pub fn new(endpoint: impl Into<String>) -> Result<Self, NetworkError> {
        Self::with_user_agent(endpoint, concat!("funtime/", env!("CARGO_PKG_VERSION")))
    }

    /// Create a client for `endpoint` with a custom user agent
    pub fn with_user_agent(endpoint: impl Into<String>, user_agent: &str) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .pool_max_idle_per_host(10) // A batch opens up to page-size connections at once
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ImageSource for WaifuClient {
    async fn fetch_one(&self) -> Result<ImageUrl, NetworkError> {
        tracing::trace!("Sending HTTP request to {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;
        tracing::trace!("Received response with status: {}", response.status());

        if !response.status().is_success() {
            return Err(NetworkError::from_status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let parsed: ImageResponse = serde_json::from_str(&body)?;
        Ok(parsed.url)
    }
}

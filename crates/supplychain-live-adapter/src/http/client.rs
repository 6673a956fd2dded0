/*
[INPUT]:  HTTP configuration (base URL, timeouts, stats path)
[OUTPUT]: Configured reqwest client ready for dashboard API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::error::{DashboardError, Result};

pub const DEFAULT_STATS_PATH: &str = "/api/dashboard/stats/";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub stats_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            stats_path: DEFAULT_STATS_PATH.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the dashboard's JSON endpoints
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http_client: Client,
    base_url: Url,
    stats_path: String,
}

impl DashboardClient {
    /// Create a new client with default configuration
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default(), base_url)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        if !config.stats_path.starts_with('/') {
            return Err(DashboardError::Config(format!(
                "stats path must be absolute, got `{}`",
                config.stats_path
            )));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            stats_path: config.stats_path,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn stats_path(&self) -> &str {
        &self.stats_path
    }

    /// Build full URL for an endpoint
    pub(crate) fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint)?)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header("X-Requested-With", "XMLHttpRequest")
    }

    /// Send and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = Self::check_status(builder.send().await?).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            DashboardError::InvalidResponse(format!("unexpected JSON body: {err}"))
        })
    }

    /// Send and return the body verbatim
    pub(crate) async fn send_text(&self, builder: RequestBuilder) -> Result<String> {
        let response = Self::check_status(builder.send().await?).await?;
        Ok(response.text().await?)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "dashboard response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|body| body.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        Err(DashboardError::api_error(status, message))
    }
}

//! Native HTTP gateway
//!
//! `reqwest`-backed implementation of [`UsageGateway`].

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::error::{GatewayError, GatewayResult, TransportError};
use super::{decode_regions, decode_usage, join_url, usage_path, UsageGateway, DEFAULT_API_BASE, REGIONS_PATH};
use crate::model::{RegionFilter, UsageRecord};

/// Configuration for the HTTP gateway
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Base URL of the usage API (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout; `None` leaves the transport default in place
    pub request_timeout: Option<Duration>,
}

impl Default for HttpGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            request_timeout: None,
        }
    }
}

/// Usage API client over HTTP
pub struct HttpGateway {
    client: Client,
    config: HttpGatewayConfig,
}

impl HttpGateway {
    /// Create a gateway with the given configuration
    pub fn new(config: HttpGatewayConfig) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TransportError::Unreachable {
            url: config.base_url.clone(),
            message: format!("failed to create HTTP client: {}", e),
        })?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &HttpGatewayConfig {
        &self.config
    }

    /// GET a path and return the body of a successful response
    async fn get_body(&self, path: &str) -> Result<String, TransportError> {
        let url = join_url(&self.config.base_url, path);
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| classify(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        response.text().await.map_err(|e| TransportError::Body {
            url,
            message: e.to_string(),
        })
    }
}

fn classify(url: &str, e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else {
        TransportError::Unreachable {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl UsageGateway for HttpGateway {
    async fn fetch_regions(&self) -> GatewayResult<Vec<String>> {
        let body = self.get_body(REGIONS_PATH).await?;
        Ok(decode_regions(&body)?)
    }

    async fn fetch_usage(&self, filter: &RegionFilter) -> GatewayResult<Vec<UsageRecord>> {
        let body = self.get_body(&usage_path(filter)).await?;
        Ok(decode_usage(&body)?)
    }
}

//! HTTP API Client
//!
//! `gloo-net` implementation of the usage gateway.

use async_trait::async_trait;
use gloo_net::http::Request;

use energy_dashboard::gateway::{
    decode_regions, decode_usage, join_url, usage_path, GatewayResult, TransportError,
    UsageGateway, DEFAULT_API_BASE, REGIONS_PATH,
};
use energy_dashboard::{RegionFilter, UsageRecord};

/// Local storage key holding an API base URL override
pub const API_URL_STORAGE_KEY: &str = "energy_dashboard_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_STORAGE_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty());

    // Normalize: remove trailing slash
    stored
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Usage API client for the browser
#[derive(Debug, Clone)]
pub struct GlooGateway {
    base_url: String,
}

impl GlooGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Gateway for the configured API base
    pub fn from_storage() -> Self {
        Self::new(get_api_base())
    }

    async fn get_body(&self, path: &str) -> Result<String, TransportError> {
        let url = join_url(&self.base_url, path);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Unreachable {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                url,
                status: response.status(),
                body,
            });
        }

        response.text().await.map_err(|e| TransportError::Body {
            url,
            message: e.to_string(),
        })
    }
}

#[async_trait(?Send)]
impl UsageGateway for GlooGateway {
    async fn fetch_regions(&self) -> GatewayResult<Vec<String>> {
        let body = self.get_body(REGIONS_PATH).await?;
        Ok(decode_regions(&body)?)
    }

    async fn fetch_usage(&self, filter: &RegionFilter) -> GatewayResult<Vec<UsageRecord>> {
        let body = self.get_body(&usage_path(filter)).await?;
        Ok(decode_usage(&body)?)
    }
}

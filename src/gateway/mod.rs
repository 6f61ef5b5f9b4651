//! Remote Data Gateway
//!
//! Read-only access to the usage API:
//!
//! - `GET /api/regions` lists the valid region identifiers
//! - `GET /api/data[?region=..]` returns usage records, optionally filtered
//!
//! The [`UsageGateway`] trait is the seam between the state controller and
//! the transport. Calls are never retried or cached; a failure is returned
//! to the caller as a [`GatewayError`].

pub mod decode;
pub mod error;
#[cfg(feature = "native")]
pub mod http;

use async_trait::async_trait;

use crate::model::{RegionFilter, UsageRecord};

pub use decode::{decode_regions, decode_usage};
pub use error::{DecodeError, GatewayError, GatewayResult, TransportError};
#[cfg(feature = "native")]
pub use http::{HttpGateway, HttpGatewayConfig};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Region list endpoint
pub const REGIONS_PATH: &str = "/api/regions";

/// Usage records endpoint
pub const DATA_PATH: &str = "/api/data";

/// Source of regions and usage records
///
/// Futures are not required to be `Send`: the browser client awaits JS
/// promises, and the controller drives everything from one thread anyway.
#[async_trait(?Send)]
pub trait UsageGateway {
    /// Fetch the full list of valid regions
    async fn fetch_regions(&self) -> GatewayResult<Vec<String>>;

    /// Fetch usage records, constrained server-side when `filter` names a region
    async fn fetch_usage(&self, filter: &RegionFilter) -> GatewayResult<Vec<UsageRecord>>;
}

/// Path and query for a usage request
pub fn usage_path(filter: &RegionFilter) -> String {
    match filter.as_deref() {
        Some(region) => format!("{}?region={}", DATA_PATH, urlencoding::encode(region)),
        None => DATA_PATH.to_string(),
    }
}

/// Join an API base URL and a path, tolerating a trailing slash on the base
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

//! # Energy Dashboard
//!
//! Client-side orchestration for a regional energy usage dashboard: fetch
//! usage records and the region list from the usage API, hold them as one
//! canonical dataset, refetch when the region filter changes, and derive
//! the table and bar-chart views from that dataset.
//!
//! ## Modules
//!
//! - [`model`]: `UsageRecord`, region filters, timestamp parsing
//! - [`gateway`]: the `UsageGateway` seam and its HTTP implementation
//! - [`state`]: `DashboardController`, the single owner of dashboard state
//! - [`projection`]: pure table and chart projectors
//! - [`render`]: terminal renderers and the region filter options
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use energy_dashboard::{ChartProjector, DashboardController, HttpGateway, HttpGatewayConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = HttpGateway::new(HttpGatewayConfig::default())?;
//!     let controller = DashboardController::new(gateway);
//!
//!     // Regions and all-region usage, fetched concurrently
//!     controller.initialize().await;
//!
//!     // Narrow to one region; a newer selection always wins
//!     controller.select_region(Some("north".to_string())).await;
//!
//!     let view = controller.view(&ChartProjector::default());
//!     println!("{} rows, {} bars", view.rows.len(), view.chart.values().len());
//!     Ok(())
//! }
//! ```

#[cfg(feature = "native")]
pub mod config;
pub mod gateway;
#[cfg(feature = "native")]
pub mod logging;
pub mod model;
pub mod projection;
pub mod render;
pub mod state;

// Re-export top-level types for convenience
pub use model::{parse_timestamp, LabelZone, RegionFilter, UsageRecord};

pub use gateway::{
    DecodeError, GatewayError, GatewayResult, TransportError, UsageGateway, DEFAULT_API_BASE,
};
#[cfg(feature = "native")]
pub use gateway::{HttpGateway, HttpGatewayConfig};

pub use state::{
    DashboardController, DashboardSnapshot, DashboardView, FetchOutcome, InitReport, RequestToken,
};

pub use projection::{
    project_chart, project_table, ChartDisplayOptions, ChartInput, ChartProjector, ChartSeries,
    TableColumn, TableRow, COLUMNS,
};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};

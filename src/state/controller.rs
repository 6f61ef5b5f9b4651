//! Dashboard State Controller
//!
//! Owns the dataset, region list and selected region, and is the only
//! place they change. Every usage fetch carries a request token issued when
//! the fetch is *requested*; a response is applied only if its token is
//! still the latest when it resolves, so a slow response for an older
//! selection can never overwrite a newer one.
//!
//! State sits in a `RefCell` and is never borrowed across an `.await`.

use futures_util::future::join;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::sync::Arc;

use crate::gateway::{GatewayError, UsageGateway};
use crate::model::{RegionFilter, UsageRecord};
use crate::projection::{project_table, ChartInput, ChartProjector, TableRow};

/// Identifier of one issued usage fetch; later requests get larger tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// What became of one fetch
#[derive(Debug)]
pub enum FetchOutcome {
    /// The response replaced the corresponding state field
    Applied { count: usize },
    /// A newer request was issued before this one resolved; response dropped
    Superseded {
        token: RequestToken,
        latest: RequestToken,
    },
    /// The fetch failed; the field keeps its previous value
    Failed(GatewayError),
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied { .. })
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, FetchOutcome::Superseded { .. })
    }

    pub fn error(&self) -> Option<&GatewayError> {
        match self {
            FetchOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Outcomes of the two independent fetches issued by `initialize`
#[derive(Debug)]
pub struct InitReport {
    pub regions: FetchOutcome,
    pub usage: FetchOutcome,
}

/// Read-only view of controller state
///
/// Cloning is cheap: dataset and region list are shared immutable slices.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub dataset: Arc<[UsageRecord]>,
    pub regions: Arc<[String]>,
    pub selected_region: Option<String>,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self {
            dataset: Arc::from(Vec::new()),
            regions: Arc::from(Vec::new()),
            selected_region: None,
        }
    }
}

impl DashboardSnapshot {
    /// Derive both presentation views
    pub fn view(&self, chart: &ChartProjector) -> DashboardView {
        DashboardView {
            rows: project_table(&self.dataset),
            chart: chart.project(&self.dataset),
            regions: self.regions.to_vec(),
            selected_region: self.selected_region.clone(),
        }
    }
}

/// Everything a renderer needs, derived from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub rows: Vec<TableRow>,
    pub chart: ChartInput,
    pub regions: Vec<String>,
    pub selected_region: Option<String>,
}

/// Single source of truth for dataset, region list and selection
pub struct DashboardController<G> {
    gateway: G,
    state: RefCell<DashboardSnapshot>,
    last_token: Cell<u64>,
}

impl<G: UsageGateway> DashboardController<G> {
    /// Create a controller with empty state
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: RefCell::new(DashboardSnapshot::default()),
            last_token: Cell::new(0),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Current state
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.state.borrow().clone()
    }

    /// Derive both views from the current state
    pub fn view(&self, chart: &ChartProjector) -> DashboardView {
        self.state.borrow().view(chart)
    }

    pub fn selected_region(&self) -> Option<String> {
        self.state.borrow().selected_region.clone()
    }

    /// Token of the most recently issued usage fetch
    pub fn latest_token(&self) -> RequestToken {
        RequestToken(self.last_token.get())
    }

    /// First load: fetch regions and all-region usage concurrently
    ///
    /// The two fetches are independent. Each success replaces its field;
    /// a failure leaves its field untouched and does not affect the other.
    /// The usage fetch takes its request token at call time, so a selection
    /// made while this is in flight wins over it.
    pub fn initialize(&self) -> impl Future<Output = InitReport> + '_ {
        let filter = RegionFilter::from(self.selected_region());
        let usage = self.load_usage(filter);
        async move {
            let (regions, usage) = join(self.load_regions(), usage).await;
            InitReport { regions, usage }
        }
    }

    /// Change the selection and refetch usage for it
    ///
    /// The selection and the request token are updated when this is called,
    /// before the returned future is polled. An empty region means all
    /// regions.
    pub fn select_region(
        &self,
        region: Option<String>,
    ) -> impl Future<Output = FetchOutcome> + '_ {
        let filter = RegionFilter::from(region);
        self.state.borrow_mut().selected_region = filter.as_deref().map(str::to_string);
        tracing::debug!(region = ?filter.as_deref(), "selection changed");
        self.load_usage(filter)
    }

    fn issue_token(&self) -> RequestToken {
        let next = self.last_token.get() + 1;
        self.last_token.set(next);
        RequestToken(next)
    }

    async fn load_regions(&self) -> FetchOutcome {
        match self.gateway.fetch_regions().await {
            Ok(regions) => {
                let count = regions.len();
                self.state.borrow_mut().regions = Arc::from(regions);
                tracing::info!(count, "region list updated");
                FetchOutcome::Applied { count }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch regions");
                FetchOutcome::Failed(e)
            }
        }
    }

    /// Issue a token now; fetch and apply when polled
    fn load_usage(&self, filter: RegionFilter) -> impl Future<Output = FetchOutcome> + '_ {
        let token = self.issue_token();
        tracing::debug!(token = token.value(), region = ?filter.as_deref(), "usage fetch issued");

        async move {
            let result = self.gateway.fetch_usage(&filter).await;

            let latest = self.latest_token();
            if token != latest {
                tracing::debug!(
                    token = token.value(),
                    latest = latest.value(),
                    region = ?filter.as_deref(),
                    "discarding stale usage response"
                );
                return FetchOutcome::Superseded { token, latest };
            }

            match result {
                Ok(records) => {
                    let count = records.len();
                    self.state.borrow_mut().dataset = Arc::from(records);
                    tracing::info!(count, region = ?filter.as_deref(), "dataset updated");
                    FetchOutcome::Applied { count }
                }
                Err(e) => {
                    tracing::warn!(error = %e, region = ?filter.as_deref(), "failed to fetch usage");
                    FetchOutcome::Failed(e)
                }
            }
        }
    }
}

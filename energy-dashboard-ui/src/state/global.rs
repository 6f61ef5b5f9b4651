//! Global Application State
//!
//! The controller owns the dataset, region list and selection. A signal
//! carries its latest snapshot to the component tree and is republished
//! after every fetch settles.

use std::rc::Rc;

use leptos::*;

use energy_dashboard::{
    ChartInput, ChartProjector, DashboardController, DashboardSnapshot, FetchOutcome,
};

use crate::api::GlooGateway;

/// Dashboard state provided to all components
#[derive(Clone)]
pub struct DashboardState {
    controller: Rc<DashboardController<GlooGateway>>,
    projector: Rc<ChartProjector>,
    /// Latest published controller state
    pub snapshot: RwSignal<DashboardSnapshot>,
}

/// Provide dashboard state to the component tree
pub fn provide_dashboard_state() {
    let controller = DashboardController::new(GlooGateway::from_storage());
    let state = DashboardState {
        snapshot: create_rw_signal(controller.snapshot()),
        controller: Rc::new(controller),
        projector: Rc::new(ChartProjector::default()),
    };

    provide_context(state);
}

impl DashboardState {
    /// Fetch regions and all-region usage
    pub fn initialize(&self) {
        let state = self.clone();
        spawn_local(async move {
            let report = state.controller.initialize().await;
            report_failure("regions", &report.regions);
            report_failure("usage", &report.usage);
            state.publish();
        });
    }

    /// Change the selection; an empty value means all regions
    pub fn select_region(&self, region: Option<String>) {
        let state = self.clone();
        spawn_local(async move {
            let outcome = state.controller.select_region(region).await;
            report_failure("usage", &outcome);
            state.publish();
        });
    }

    /// Chart input for a snapshot
    pub fn chart_of(&self, snapshot: &DashboardSnapshot) -> ChartInput {
        chart_for(&self.projector, snapshot)
    }

    fn publish(&self) {
        self.snapshot.set(self.controller.snapshot());
    }
}

fn chart_for(projector: &ChartProjector, snapshot: &DashboardSnapshot) -> ChartInput {
    projector.project(&snapshot.dataset)
}

/// Failures are logged only; the dashboard keeps showing what it has
fn report_failure(what: &str, outcome: &FetchOutcome) {
    if let Some(error) = outcome.error() {
        web_sys::console::error_1(&format!("Failed to fetch {}: {}", what, error).into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use energy_dashboard::model::LabelZone;
    use energy_dashboard::UsageRecord;
    use std::sync::Arc;

    #[test]
    fn test_chart_for_matches_full_view() {
        let records: Vec<UsageRecord> = (1..=25)
            .map(|day| {
                UsageRecord::new("north", format!("2024-01-{:02}T00:00:00Z", day), day as f64)
            })
            .collect();
        let snapshot = DashboardSnapshot {
            dataset: Arc::from(records),
            ..DashboardSnapshot::default()
        };
        let projector = ChartProjector::new().zone(LabelZone::utc());

        let chart = chart_for(&projector, &snapshot);
        assert_eq!(chart, snapshot.view(&projector).chart);
        assert_eq!(chart.values().first(), Some(&6.0));
        assert_eq!(chart.values().len(), 20);
    }
}

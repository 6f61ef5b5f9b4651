//! App Root Component

use leptos::*;

use crate::components::{DataTable, RegionFilter, UsageChart};
use crate::state::global::{provide_dashboard_state, DashboardState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_dashboard_state();

    // Regions and all-region usage, once on mount
    let state = expect_context::<DashboardState>();
    state.initialize();

    view! {
        <div class="min-h-screen bg-gray-900 text-white">
            <main class="container mx-auto px-4 py-8 space-y-6">
                <h1 class="text-3xl font-bold">"Energy Usage Dashboard"</h1>

                <RegionFilter />

                <section class="bg-gray-800 rounded-xl p-6">
                    <UsageChart />
                </section>

                <section class="bg-gray-800 rounded-xl p-6 overflow-x-auto">
                    <DataTable />
                </section>
            </main>
        </div>
    }
}

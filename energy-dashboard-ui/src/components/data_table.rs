//! Data Table Component

use leptos::*;

use energy_dashboard::{project_table, COLUMNS};

use crate::state::global::DashboardState;

/// Every record of the dataset, in dataset order
#[component]
pub fn DataTable() -> impl IntoView {
    let state = expect_context::<DashboardState>();
    let rows = create_memo(move |_| project_table(&state.snapshot.get().dataset));

    view! {
        <table class="min-w-full text-sm">
            <thead>
                <tr class="text-left text-gray-400 border-b border-gray-700">
                    {COLUMNS
                        .iter()
                        .map(|column| view! { <th class="py-2 pr-6">{column.header}</th> })
                        .collect_view()}
                </tr>
            </thead>
            <tbody>
                {move || {
                    rows.get()
                        .into_iter()
                        .map(|row| {
                            view! {
                                <tr class="border-b border-gray-800">
                                    {row
                                        .cells()
                                        .into_iter()
                                        .map(|cell| view! { <td class="py-2 pr-6">{cell}</td> })
                                        .collect_view()}
                                </tr>
                            }
                        })
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}

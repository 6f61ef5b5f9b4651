//! Region Filter Component

use leptos::*;

use energy_dashboard::render::filter_options;

use crate::state::global::DashboardState;

/// Region selector: "All Regions" followed by each known region
#[component]
pub fn RegionFilter() -> impl IntoView {
    let state = expect_context::<DashboardState>();
    let snapshot = state.snapshot;

    let on_change = move |ev| {
        let value = event_target_value(&ev);
        state.select_region(Some(value));
    };

    view! {
        <label class="flex items-center space-x-3">
            <span class="text-gray-300">"Region"</span>
            <select
                on:change=on_change
                class="bg-gray-700 text-white rounded-lg px-3 py-2"
            >
                {move || {
                    let current = snapshot.get();
                    let selected = current.selected_region.unwrap_or_default();
                    filter_options(&current.regions)
                        .into_iter()
                        .map(|option| {
                            let is_selected = option.value == selected;
                            view! {
                                <option value=option.value selected=is_selected>
                                    {option.label}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        </label>
    }
}

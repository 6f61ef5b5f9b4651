//! Energy Usage Dashboard
//!
//! Browser front end built with Leptos (WASM).
//!
//! # Architecture
//!
//! A client-side rendered (CSR) application. All dashboard state lives in
//! one `DashboardController` from the `energy-dashboard` crate, driven
//! through a `gloo-net` gateway. Components only read the published
//! snapshot and call back into the controller.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}

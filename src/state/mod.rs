//! State Management
//!
//! The dashboard controller and the read-only snapshots it hands out.

pub mod controller;

pub use controller::{
    DashboardController, DashboardSnapshot, DashboardView, FetchOutcome, InitReport, RequestToken,
};

//! API Module
//!
//! Browser transport for the usage API.

mod client;

pub use client::*;

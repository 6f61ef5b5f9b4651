//! State Management

pub mod global;

pub use global::*;

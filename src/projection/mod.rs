//! Presentation projectors
//!
//! Pure transforms from the canonical dataset to the two views. They take
//! read-only slices and never mutate their input.

pub mod chart;
pub mod table;

pub use chart::{
    project_chart, ChartDisplayOptions, ChartInput, ChartProjector, ChartSeries, InvalidDateFormat,
    LegendPosition,
};
pub use table::{project_table, TableColumn, TableRow, UsageField, COLUMNS};

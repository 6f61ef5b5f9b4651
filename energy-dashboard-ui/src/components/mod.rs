//! UI Components

pub mod data_table;
pub mod region_filter;
pub mod usage_chart;

pub use data_table::DataTable;
pub use region_filter::RegionFilter;
pub use usage_chart::UsageChart;

//! Chart View Projector
//!
//! Derives the bar-chart input from the dataset:
//!
//! 1. stable-sort a copy by parsed timestamp
//! 2. keep the most recent `window` records (20 by default)
//! 3. label each with its date (time of day dropped) in the label zone
//! 4. carry the usage values in the same order as one named series
//!
//! Points sharing a date stay separate bars. Records whose timestamp does
//! not parse sort before all others, keep their input order among
//! themselves and are labelled `Invalid Date`.

use chrono::format::{Item, StrftimeItems};
use serde::Serialize;
use thiserror::Error;

use crate::model::{LabelZone, UsageRecord};

/// Number of most recent points shown
pub const DEFAULT_WINDOW: usize = 20;

/// Name of the single series
pub const DEFAULT_SERIES_LABEL: &str = "Usage (MWh)";

/// Short en-US date, e.g. `1/15/2024`
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Label for records whose timestamp does not parse
pub const INVALID_DATE_LABEL: &str = "Invalid Date";

/// Single-series bar chart input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartInput {
    /// Category labels (dates), one per bar
    pub labels: Vec<String>,
    pub series: ChartSeries,
    /// Static display configuration
    pub options: ChartDisplayOptions,
}

impl ChartInput {
    pub fn values(&self) -> &[f64] {
        &self.series.values
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label/value pairs in display order
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.series.values.iter().copied())
    }
}

/// One named numeric series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
}

/// Where the legend sits relative to the plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

/// Static chart configuration; never computed from data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDisplayOptions {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub legend: LegendPosition,
    /// Tooltip shows every series at the hovered index, without requiring
    /// the pointer to intersect a bar
    pub tooltip_index_mode: bool,
    /// CSS color of the bars
    pub bar_color: String,
}

impl Default for ChartDisplayOptions {
    fn default() -> Self {
        Self {
            title: "Usage (MWh) Over Time".to_string(),
            x_axis_title: "Date".to_string(),
            y_axis_title: "MWh".to_string(),
            legend: LegendPosition::Top,
            tooltip_index_mode: true,
            bar_color: "rgba(75,192,192,0.6)".to_string(),
        }
    }
}

/// The date pattern contains an unknown or malformed specifier
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid date format: {0}")]
pub struct InvalidDateFormat(pub String);

/// Chart View Projector
#[derive(Debug, Clone)]
pub struct ChartProjector {
    window: usize,
    series_label: String,
    date_format: String,
    zone: LabelZone,
    options: ChartDisplayOptions,
}

impl Default for ChartProjector {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            series_label: DEFAULT_SERIES_LABEL.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            zone: LabelZone::Local,
            options: ChartDisplayOptions::default(),
        }
    }
}

impl ChartProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: number of most recent points kept
    pub fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Builder method: series name
    pub fn series_label(mut self, label: impl Into<String>) -> Self {
        self.series_label = label.into();
        self
    }

    /// Builder method: zone for zone-less timestamps and labels
    pub fn zone(mut self, zone: LabelZone) -> Self {
        self.zone = zone;
        self
    }

    /// Builder method: static display options
    pub fn options(mut self, options: ChartDisplayOptions) -> Self {
        self.options = options;
        self
    }

    /// Builder method: strftime pattern for date labels
    pub fn date_format(mut self, pattern: impl Into<String>) -> Result<Self, InvalidDateFormat> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(InvalidDateFormat(pattern));
        }
        self.date_format = pattern;
        Ok(self)
    }

    pub fn window_size(&self) -> usize {
        self.window
    }

    pub fn label_zone(&self) -> LabelZone {
        self.zone
    }

    /// Project a dataset into chart input
    pub fn project(&self, records: &[UsageRecord]) -> ChartInput {
        let mut keyed: Vec<_> = records
            .iter()
            .map(|record| (record.instant(&self.zone), record))
            .collect();
        // Option orders None first; sort_by_key is stable
        keyed.sort_by_key(|(instant, _)| *instant);

        let start = keyed.len().saturating_sub(self.window);
        let recent = &keyed[start..];

        let labels = recent
            .iter()
            .map(|(instant, _)| match instant {
                Some(instant) => self.zone.format(*instant, &self.date_format),
                None => INVALID_DATE_LABEL.to_string(),
            })
            .collect();
        let values = recent.iter().map(|(_, record)| record.usage_mw).collect();

        ChartInput {
            labels,
            series: ChartSeries {
                label: self.series_label.clone(),
                values,
            },
            options: self.options.clone(),
        }
    }
}

/// Project with the default window, series name, date format and local zone
pub fn project_chart(records: &[UsageRecord]) -> ChartInput {
    ChartProjector::default().project(records)
}

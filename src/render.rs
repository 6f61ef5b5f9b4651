//! Text renderers
//!
//! Terminal stand-ins for the table and bar-chart components, plus the
//! option list of the region filter control (shared with the browser UI).

use crate::projection::{ChartInput, LegendPosition, TableRow, COLUMNS};

/// Label of the filter option that clears the selection
pub const ALL_REGIONS_LABEL: &str = "All Regions";

/// One entry of the region filter control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Empty for "all regions"
    pub value: String,
    pub label: String,
}

/// Options offered by the region filter: "All Regions" first, then the
/// region list in order
pub fn filter_options(regions: &[String]) -> Vec<FilterOption> {
    std::iter::once(FilterOption {
        value: String::new(),
        label: ALL_REGIONS_LABEL.to_string(),
    })
    .chain(regions.iter().map(|region| FilterOption {
        value: region.clone(),
        label: region.clone(),
    }))
    .collect()
}

/// One-line filter control, the selected option in brackets
pub fn render_filter(regions: &[String], selected: Option<&str>) -> String {
    let selected = selected.unwrap_or("");
    let options: Vec<String> = filter_options(regions)
        .into_iter()
        .map(|option| {
            if option.value == selected {
                format!("[{}]", option.label)
            } else {
                option.label
            }
        })
        .collect();
    format!("Region: {}", options.join("  "))
}

/// Column-aligned table with a header row
pub fn render_table(rows: &[TableRow]) -> String {
    let cells: Vec<[String; 3]> = rows.iter().map(TableRow::cells).collect();

    let mut widths = COLUMNS.map(|column| column.header.len());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = COLUMNS
        .iter()
        .zip(widths)
        .map(|(column, width)| format!("{:<width$}", column.header, width = width))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    out.push('\n');

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }

    out
}

/// Horizontal bar chart, one bar per point, scaled to `bar_width` columns
pub fn render_chart(chart: &ChartInput, bar_width: usize) -> String {
    let mut out = format!("{}\n", chart.options.title);
    let legend = format!("[#] {}\n", chart.series.label);
    if chart.options.legend == LegendPosition::Top {
        out.push_str(&legend);
    }

    if chart.is_empty() {
        out.push_str("No data\n");
        return out;
    }

    let max = chart.values().iter().cloned().fold(0.0_f64, f64::max);
    let label_width = chart.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    for (label, value) in chart.points() {
        let len = if max > 0.0 {
            ((value.max(0.0) / max) * bar_width as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{:<width$} | {} {}\n",
            label,
            "#".repeat(len),
            value,
            width = label_width
        ));
    }

    out.push_str(&format!(
        "x: {}, y: {}\n",
        chart.options.x_axis_title, chart.options.y_axis_title
    ));
    if chart.options.legend != LegendPosition::Top {
        out.push_str(&legend);
    }
    out
}

/// Rows as CSV with the table's column headers
#[cfg(feature = "native")]
pub fn write_csv<W: std::io::Write>(rows: &[TableRow], writer: W) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(COLUMNS.iter().map(|c| c.header))?;
    for row in rows {
        csv.write_record(row.cells())?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LabelZone, UsageRecord};
    use crate::projection::{project_table, ChartProjector};

    fn records() -> Vec<UsageRecord> {
        vec![
            UsageRecord::new("north", "2024-01-01T00:00:00Z", 10.0),
            UsageRecord::new("south", "2024-01-02T00:00:00Z", 5.0),
        ]
    }

    #[test]
    fn test_filter_without_regions_offers_all_only() {
        let options = filter_options(&[]);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].label, "All Regions");
        assert_eq!(options[0].value, "");
        assert_eq!(render_filter(&[], None), "Region: [All Regions]");
    }

    #[test]
    fn test_filter_marks_selection() {
        let regions = vec!["north".to_string(), "south".to_string()];
        assert_eq!(
            render_filter(&regions, Some("south")),
            "Region: All Regions  north  [south]"
        );
    }

    #[test]
    fn test_render_table() {
        let out = render_table(&project_table(&records()));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Region  Datetime              Usage (MW)");
        assert_eq!(lines[2], "north   2024-01-01T00:00:00Z  10");
        assert_eq!(lines[3], "south   2024-01-02T00:00:00Z  5");
    }

    #[test]
    fn test_render_empty_table() {
        let out = render_table(&[]);
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_render_chart() {
        let chart = ChartProjector::new()
            .zone(LabelZone::utc())
            .project(&records());
        let out = render_chart(&chart, 10);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Usage (MWh) Over Time");
        assert_eq!(lines[1], "[#] Usage (MWh)");
        assert_eq!(lines[2], "1/1/2024 | ########## 10");
        assert_eq!(lines[3], "1/2/2024 | ##### 5");
        assert_eq!(lines[4], "x: Date, y: MWh");
    }

    #[test]
    fn test_render_empty_chart() {
        let chart = ChartProjector::new().project(&[]);
        assert_eq!(
            render_chart(&chart, 10),
            "Usage (MWh) Over Time\n[#] Usage (MWh)\nNo data\n"
        );
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        write_csv(&project_table(&records()), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Region,Datetime,Usage (MW)\nnorth,2024-01-01T00:00:00Z,10\nsouth,2024-01-02T00:00:00Z,5\n"
        );
    }
}

//! Table View Projector
//!
//! Maps the dataset 1:1 into display rows, preserving input order. Values
//! are shown as received: no reformatting, no aggregation.

use serde::Serialize;

use crate::model::UsageRecord;

/// Record field a column is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageField {
    Region,
    Datetime,
    UsageMw,
}

/// Column definition handed to a table renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableColumn {
    pub header: &'static str,
    pub field: UsageField,
}

/// The three displayed columns, in display order
pub const COLUMNS: [TableColumn; 3] = [
    TableColumn {
        header: "Region",
        field: UsageField::Region,
    },
    TableColumn {
        header: "Datetime",
        field: UsageField::Datetime,
    },
    TableColumn {
        header: "Usage (MW)",
        field: UsageField::UsageMw,
    },
];

/// One displayed row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub region: String,
    pub datetime: String,
    pub usage_mw: f64,
}

impl TableRow {
    /// Text for a single cell
    pub fn cell(&self, field: UsageField) -> String {
        match field {
            UsageField::Region => self.region.clone(),
            UsageField::Datetime => self.datetime.clone(),
            // f64's Display is the shortest round-trip form: 10 -> "10", 10.5 -> "10.5"
            UsageField::UsageMw => self.usage_mw.to_string(),
        }
    }

    /// All cells in column order
    pub fn cells(&self) -> [String; 3] {
        COLUMNS.map(|column| self.cell(column.field))
    }
}

impl From<&UsageRecord> for TableRow {
    fn from(record: &UsageRecord) -> Self {
        Self {
            region: record.region.clone(),
            datetime: record.timestamp.clone(),
            usage_mw: record.usage_mw,
        }
    }
}

/// Project a dataset into table rows
pub fn project_table(records: &[UsageRecord]) -> Vec<TableRow> {
    records.iter().map(TableRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Vec<UsageRecord> {
        vec![
            UsageRecord::new("south", "2024-01-02T00:00:00Z", 12.5),
            UsageRecord::new("north", "2024-01-01T00:00:00Z", 10.0),
            UsageRecord::new("north", "2024-01-01T00:00:00Z", 10.0),
        ]
    }

    #[test]
    fn test_single_row() {
        let rows = project_table(&[UsageRecord::new("north", "2024-01-01T00:00:00Z", 10.0)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells(), ["north", "2024-01-01T00:00:00Z", "10"]);
    }

    #[test]
    fn test_empty_dataset() {
        assert!(project_table(&[]).is_empty());
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let records = dataset();
        let rows = project_table(&records);

        assert_eq!(rows.len(), records.len());
        for (row, record) in rows.iter().zip(&records) {
            assert_eq!(row.region, record.region);
            assert_eq!(row.datetime, record.timestamp);
            assert_eq!(row.usage_mw, record.usage_mw);
        }
        assert_eq!(rows[1], rows[2]);
    }

    #[test]
    fn test_projection_is_repeatable() {
        let records = dataset();
        assert_eq!(project_table(&records), project_table(&records));
    }

    #[test]
    fn test_values_rendered_as_is() {
        let row = TableRow::from(&UsageRecord::new("east", "2024-01-01 13:00:00", 1234.5678));
        assert_eq!(row.cell(UsageField::Datetime), "2024-01-01 13:00:00");
        assert_eq!(row.cell(UsageField::UsageMw), "1234.5678");
    }

    #[test]
    fn test_column_headers() {
        let headers: Vec<_> = COLUMNS.iter().map(|c| c.header).collect();
        assert_eq!(headers, vec!["Region", "Datetime", "Usage (MW)"]);
    }
}

use crate::aggregate::GroupedResult;
use crate::table::{CellValue, Table};
use serde::Serialize;

/// A table of display strings, ready for a page or a CSV export.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DisplayTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DisplayTable {
    /// Renders every cell with its plain text, without thousands separators.
    pub fn raw(table: &Table) -> Self {
        DisplayTable {
            columns: table.columns.clone(),
            rows: table
                .rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Formats an integer with comma thousands separators.
///
/// # Examples
/// ```
/// use cxo_dashboard::format::format_thousands;
///
/// assert_eq!(format_thousands(2306914235), "2,306,914,235");
/// assert_eq!(format_thousands(-1500), "-1,500");
/// assert_eq!(format_thousands(999), "999");
/// ```
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// A column is numeric when it has no text, boolean or date cells. Blank cells do not count.
pub fn is_numeric_column(table: &Table, col: usize) -> bool {
    table
        .column_values(col)
        .all(|cell| cell.is_blank() || cell.is_number())
}

/// Builds the display copy of a table.
///
/// Numeric columns get thousands separators (fractions are truncated), blank cells stay
/// blank, and every other column passes through unchanged.
pub fn format_table(table: &Table) -> DisplayTable {
    let numeric: Vec<bool> = (0..table.width())
        .map(|col| is_numeric_column(table, col))
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&numeric)
                .map(|(cell, is_numeric)| {
                    if *is_numeric {
                        format_number_cell(cell)
                    } else {
                        cell.to_string()
                    }
                })
                .collect()
        })
        .collect();

    DisplayTable {
        columns: table.columns.clone(),
        rows,
    }
}

/// Display copy of a grouped result: the grouping column followed by one formatted column
/// per metric.
pub fn format_grouped(grouped: &GroupedResult) -> DisplayTable {
    let mut columns = vec![grouped.axis_column.clone()];
    columns.extend(grouped.metrics.iter().map(|m| m.label().to_string()));

    let rows = grouped
        .groups
        .iter()
        .map(|group| {
            let mut row = vec![group.label.clone()];
            row.extend(group.totals.iter().map(|v| format_thousands(*v)));
            row
        })
        .collect();

    DisplayTable { columns, rows }
}

fn format_number_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Int(i) => format_thousands(*i),
        CellValue::Float(f) if f.is_finite() => format_thousands(f.trunc() as i64),
        other => other.to_string(),
    }
}

#[cfg(feature = "web")]
use crate::aggregate::GroupedResult;
use crate::format::DisplayTable;

/// Convert a display table to CSV format
///
/// The header row carries the column names and every following row the display strings,
/// so thousands separators survive exactly as shown on screen. Fields containing commas,
/// quotes or newlines are quoted.
///
/// # Examples
/// ```
/// use cxo_dashboard::downloader::to_csv;
/// use cxo_dashboard::format::DisplayTable;
///
/// let table = DisplayTable {
///     columns: vec!["Zone".into(), "GMV".into()],
///     rows: vec![vec!["North".into(), "1,500".into()]],
/// };
/// assert_eq!(to_csv(&table), "Zone,GMV\nNorth,\"1,500\"\n");
/// ```
pub fn to_csv(table: &DisplayTable) -> String {
    let mut csv_content = String::new();

    push_csv_row(&mut csv_content, &table.columns);
    for row in &table.rows {
        push_csv_row(&mut csv_content, row);
    }

    csv_content
}

fn push_csv_row(out: &mut String, fields: &[String]) {
    for (i, value) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            let escaped = value.replace('"', "\"\"");
            out.push_str(&format!("\"{}\"", escaped));
        } else {
            out.push_str(value);
        }
    }
    out.push('\n');
}

/// Convert a grouped result to XLSX format
///
/// Writes one sheet named after the grouping column with a bold header row. Metric sums are
/// written as numbers, not as formatted text, so the file stays usable for further analysis.
///
/// # Returns
/// * `Result<Vec<u8>, DashboardError>` - XLSX file content as bytes or an error
#[cfg(feature = "web")]
pub fn to_xlsx(grouped: &GroupedResult) -> crate::error::Result<Vec<u8>> {
    use rust_xlsxwriter::{Format, Workbook, Worksheet};

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name(sheet_title(&grouped.axis_column))?;

    let header = Format::new().set_bold();
    worksheet.write_string_with_format(0, 0, &grouped.axis_column, &header)?;
    for (c, metric) in grouped.metrics.iter().enumerate() {
        worksheet.write_string_with_format(0, (c + 1) as u16, metric.label(), &header)?;
    }

    for (r, group) in grouped.groups.iter().enumerate() {
        let row = (r + 1) as u32;
        worksheet.write_string(row, 0, &group.label)?;
        for (c, total) in group.totals.iter().enumerate() {
            worksheet.write_number(row, (c + 1) as u16, *total as f64)?;
        }
    }

    workbook.push_worksheet(worksheet);
    let buffer = workbook.save_to_buffer()?;

    Ok(buffer)
}

// Worksheet names are limited to 31 characters and may not contain []:*?/\
#[cfg(feature = "web")]
fn sheet_title(name: &str) -> String {
    let clean: String = name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    if clean.trim().is_empty() {
        "Grouped".to_string()
    } else {
        clean
    }
}

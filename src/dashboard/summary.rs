use super::Block;
use crate::aggregate::{GroupKey, parse_lacs};
use crate::axis::find_month_column;
use crate::chart::{BLUE, Bar, BarChart, Chart, GREEN, Rgb};
use crate::format::format_table;
use crate::loader::Sheet;
use crate::metric::Metric;
use crate::table::{CellValue, HeaderMode, Table};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Metrics charted month by month on the Dashboard Summary tab.
pub const SUMMARY_METRICS: [Metric; 4] = [
    Metric::RevenueFromOperations,
    Metric::DirectExpenses,
    Metric::IndirectExpenses,
    Metric::Ebitda,
];

/// Row-label column of the wide layout.
pub const PARTICULARS: &str = "Particulars";

/// Layout detected for the summary sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryLayout {
    /// Metrics are row labels under "Particulars", months are columns.
    Wide { particulars: usize },
    /// A month column, metrics are columns.
    Long { month: usize },
    Unknown,
}

/// Wide layout is tried first; the month column is only looked for when there is no
/// "Particulars" column.
pub fn detect_layout(table: &Table) -> SummaryLayout {
    if let Some(particulars) = table.column_index(PARTICULARS) {
        return SummaryLayout::Wide { particulars };
    }
    match find_month_column(&table.columns) {
        Some(month) => SummaryLayout::Long { month },
        None => SummaryLayout::Unknown,
    }
}

pub fn render(sheet: &Sheet) -> Vec<Block> {
    let mut blocks = vec![Block::subheader("Dashboard Summary Data Table")];

    let grid = match sheet.grid() {
        Ok(grid) => grid,
        Err(message) => {
            blocks.push(Block::warning(format!(
                "Could not read Dashboard Summary sheet: {}",
                message
            )));
            return blocks;
        }
    };

    if let Some(table) = load_table(grid, &mut blocks) {
        blocks.extend(render_charts(&table));
    }
    blocks
}

// Header parse first; a sheet that is empty or has a single column is re-read without a header.
fn load_table(grid: &[Vec<CellValue>], blocks: &mut Vec<Block>) -> Option<Table> {
    let table = Table::from_grid(grid, HeaderMode::FirstRow);
    if table.is_usable() {
        blocks.push(Block::Table(format_table(&table)));
        return Some(table);
    }

    let raw = Table::from_grid(grid, HeaderMode::None);
    if raw.is_empty() || raw.width() == 0 {
        blocks.push(Block::warning("No data found in Dashboard Summary sheet."));
        return None;
    }

    blocks.push(Block::Table(format_table(&raw)));
    Some(raw)
}

/// Month-wise bar charts for whichever layout the table has.
pub fn render_charts(table: &Table) -> Vec<Block> {
    match detect_layout(table) {
        SummaryLayout::Wide { particulars } => wide_charts(table, particulars),
        SummaryLayout::Long { month } => long_charts(table, month),
        SummaryLayout::Unknown => vec![Block::warning(
            "No month column found for line chart. Please ensure a column named 'Month' exists.",
        )],
    }
}

fn missing_metrics_warning() -> Block {
    let names: Vec<&str> = SUMMARY_METRICS.iter().map(|m| m.label()).collect();
    Block::warning(format!(
        "None of the required metrics found for line chart: {}.",
        names.join(", ")
    ))
}

fn wide_charts(table: &Table, particulars: usize) -> Vec<Block> {
    let month_cols: Vec<usize> = (0..table.width()).filter(|c| *c != particulars).collect();
    if month_cols.is_empty() {
        return vec![Block::warning("No month columns found for line chart.")];
    }

    let available: Vec<(Metric, usize)> = SUMMARY_METRICS
        .iter()
        .filter_map(|m| find_row(table, particulars, m.label()).map(|row| (*m, row)))
        .collect();

    let mut blocks = Vec::new();
    if available.is_empty() {
        blocks.push(missing_metrics_warning());
    } else {
        blocks.push(Block::subheader("Month-wise KPI Bar Graphs"));
        for (metric, row) in available {
            blocks.push(Block::subheader(format!(
                "{} - Month-wise Bar Graph",
                metric
            )));
            blocks.push(Block::Chart(Chart::Bar(month_bar_chart(
                format!("Month-wise {}", metric),
                format!("{} (Lacs)", metric),
                wide_series(table, row, &month_cols),
                BLUE,
            ))));
        }
    }

    if let Some(row) = find_row(table, particulars, Metric::NetWorth.label()) {
        blocks.push(Block::subheader("Net Worth as on - Month-wise Bar Chart"));
        blocks.push(Block::Chart(Chart::Bar(month_bar_chart(
            "Month-wise Net Worth as on",
            "Net Worth (Lacs)",
            wide_series(table, row, &month_cols),
            GREEN,
        ))));
    }

    blocks
}

/// First row whose label cell is exactly `label`.
fn find_row(table: &Table, label_col: usize, label: &str) -> Option<usize> {
    table
        .column_values(label_col)
        .position(|cell| cell.as_text() == Some(label))
}

/// One bar per month column, valued in Lacs. Blank or non-numeric cells become gaps.
pub fn wide_series(table: &Table, row: usize, month_cols: &[usize]) -> Vec<Bar> {
    month_cols
        .iter()
        .map(|col| Bar {
            label: table.columns[*col].clone(),
            value: parse_lacs(table.cell(row, *col)),
        })
        .collect()
}

fn long_charts(table: &Table, month_col: usize) -> Vec<Block> {
    let available: Vec<(Metric, usize)> = SUMMARY_METRICS
        .iter()
        .filter_map(|m| table.column_index(m.label()).map(|col| (*m, col)))
        .collect();
    if available.is_empty() {
        return vec![missing_metrics_warning()];
    }

    let months = monthly_totals(table, month_col, &available);
    if months.is_empty() {
        return vec![Block::warning(
            "No data available to plot month-wise KPI bar graphs.",
        )];
    }

    let mut blocks = vec![Block::subheader("Month-wise KPI Bar Graphs")];
    for (pos, (metric, _)) in available.iter().enumerate() {
        let bars = months
            .iter()
            .map(|m| Bar {
                label: m.label.clone(),
                value: Some(m.totals[pos]),
            })
            .collect();
        blocks.push(Block::subheader(format!(
            "{} - Month-wise Bar Graph",
            metric
        )));
        blocks.push(Block::Chart(Chart::Bar(month_bar_chart(
            format!("Month-wise {}", metric),
            format!("{} (Lacs)", metric),
            bars,
            BLUE,
        ))));
    }
    blocks
}

/// Per-month sums in Lacs for a long-format table.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthTotals {
    pub key: CellValue,
    pub label: String,
    pub totals: Vec<f64>,
}

/// Sums each metric per month in Lacs, skipping non-numeric cells and blank months.
/// Months come back in ascending order.
pub fn monthly_totals(
    table: &Table,
    month_col: usize,
    metrics: &[(Metric, usize)],
) -> Vec<MonthTotals> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut months: Vec<MonthTotals> = Vec::new();

    for row in 0..table.rows.len() {
        let key = table.cell(row, month_col);
        if key.is_blank() {
            continue;
        }
        let slot = *index.entry(GroupKey::of(key)).or_insert_with(|| {
            months.push(MonthTotals {
                key: key.clone(),
                label: key.to_string(),
                totals: vec![0.0; metrics.len()],
            });
            months.len() - 1
        });

        for (pos, (_, col)) in metrics.iter().enumerate() {
            if let Some(value) = parse_lacs(table.cell(row, *col)) {
                months[slot].totals[pos] += value;
            }
        }
    }

    months.sort_by(|a, b| compare_keys(&a.key, &b.key));
    months
}

// Numbers, then dates, then booleans, then text; each ordered naturally.
fn compare_keys(a: &CellValue, b: &CellValue) -> Ordering {
    fn rank(cell: &CellValue) -> u8 {
        match cell {
            CellValue::Int(_) | CellValue::Float(_) => 0,
            CellValue::DateTime(_) => 1,
            CellValue::Bool(_) => 2,
            CellValue::Text(_) => 3,
            CellValue::Empty => 4,
        }
    }

    rank(a).cmp(&rank(b)).then_with(|| match (a, b) {
        (CellValue::DateTime(x), CellValue::DateTime(y)) => x.cmp(y),
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        _ => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
    })
}

fn month_bar_chart(
    title: impl Into<String>,
    y_label: impl Into<String>,
    bars: Vec<Bar>,
    color: Rgb,
) -> BarChart {
    BarChart {
        title: title.into(),
        x_label: "Month".to_string(),
        y_label: y_label.into(),
        bars,
        color,
    }
}

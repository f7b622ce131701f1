use chrono::{NaiveDateTime, Timelike};
use std::collections::HashSet;
use std::fmt;

/// A single worksheet value after ingestion.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    DateTime(NaiveDateTime),
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    /// Blank cells are empty cells and text cells holding only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Int(_) | CellValue::Float(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
            CellValue::DateTime(dt) => {
                if dt.num_seconds_from_midnight() == 0 {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
                }
            }
        }
    }
}

/// How the first row of a sheet grid is interpreted when building a [`Table`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderMode {
    /// The first non-blank row names the columns.
    FirstRow,
    /// Columns are numbered `0`, `1`, ... and every row is data.
    None,
}

/// Rows of cells under named columns. Every row has exactly `columns.len()` cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Builds a table, padding or truncating rows to the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Table { columns, rows }
    }

    /// Parses a raw sheet grid into a table. All-blank rows are skipped in both modes.
    pub fn from_grid(grid: &[Vec<CellValue>], header: HeaderMode) -> Self {
        let width = grid.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut rows = grid.iter().filter(|row| !row.iter().all(CellValue::is_blank));

        let columns = match header {
            HeaderMode::FirstRow => match rows.next() {
                Some(header_row) => header_names(header_row, width),
                None => return Table::default(),
            },
            HeaderMode::None => (0..width).map(|i| i.to_string()).collect(),
        };

        Table::new(columns, rows.cloned().collect())
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A table is usable for charting when it has data rows and more than one column.
    pub fn is_usable(&self) -> bool {
        !self.rows.is_empty() && self.columns.len() > 1
    }

    /// Exact, case-sensitive lookup of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().map(move |row| row.get(col).unwrap_or(&EMPTY_CELL))
    }

    /// Removes rows in which every cell is blank.
    pub fn drop_blank_rows(mut self) -> Self {
        self.rows.retain(|row| !row.iter().all(CellValue::is_blank));
        self
    }
}

// Blank headers become "Unnamed: <index>"; repeated names get ".1", ".2", ... suffixes.
fn header_names(header_row: &[CellValue], width: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(width);

    for idx in 0..width {
        let base = match header_row.get(idx) {
            Some(cell) if !cell.is_blank() => cell.to_string(),
            _ => format!("Unnamed: {}", idx),
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}

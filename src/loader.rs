use crate::error::{DashboardError, Result};
use crate::table::{CellValue, HeaderMode, Table};
use calamine::{Data, DataType, Range, Reader, Xlsx, open_workbook};
use log::{info, warn};
use std::io::Cursor;
use std::path::Path;

/// One worksheet as captured at load time.
///
/// A sheet whose range could not be read keeps its name so it still gets a tab; the read
/// error is kept as text and reported when the tab is rendered.
#[derive(Clone, Debug)]
pub struct Sheet {
    pub name: String,
    grid: std::result::Result<Vec<Vec<CellValue>>, String>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, grid: Vec<Vec<CellValue>>) -> Self {
        Sheet {
            name: name.into(),
            grid: Ok(grid),
        }
    }

    pub fn unreadable(name: impl Into<String>, message: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            grid: Err(message.into()),
        }
    }

    /// Raw cell grid, or the message of the error raised while reading the sheet.
    pub fn grid(&self) -> std::result::Result<&[Vec<CellValue>], &str> {
        match &self.grid {
            Ok(grid) => Ok(grid.as_slice()),
            Err(message) => Err(message.as_str()),
        }
    }

    /// Parses the sheet into a table with the given header interpretation.
    pub fn table(&self, header: HeaderMode) -> std::result::Result<Table, &str> {
        self.grid().map(|grid| Table::from_grid(grid, header))
    }
}

/// An uploaded workbook: an ordered, immutable list of named sheets.
#[derive(Clone, Debug)]
pub struct Workbook {
    pub name: String,
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(name: impl Into<String>, sheets: Vec<Sheet>) -> Result<Self> {
        if sheets.is_empty() {
            return Err(DashboardError::EmptyWorkbook);
        }
        Ok(Workbook {
            name: name.into(),
            sheets,
        })
    }

    /// Opens an `.xlsx` workbook held in memory, typically an upload.
    ///
    /// # Examples
    /// ```no_run
    /// use cxo_dashboard::loader::Workbook;
    ///
    /// let bytes = std::fs::read("report.xlsx").unwrap();
    /// let workbook = Workbook::from_bytes("report.xlsx", bytes).unwrap();
    /// println!("{:?}", workbook.sheet_names());
    /// ```
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let mut xlsx: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
        let workbook = read_sheets(name, &mut xlsx)?;
        info!(
            "loaded workbook '{}' with {} sheet(s)",
            workbook.name,
            workbook.sheets.len()
        );
        Ok(workbook)
    }

    /// Opens an `.xlsx` workbook from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") => {}
            Some(ext) => {
                return Err(DashboardError::UnsupportedFile(format!(
                    "unsupported file extension: {}",
                    ext
                )));
            }
            None => {
                return Err(DashboardError::UnsupportedFile(
                    "file has no extension".to_string(),
                ));
            }
        }

        let mut xlsx: Xlsx<_> = open_workbook(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        read_sheets(name, &mut xlsx)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn require_sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheet(name)
            .ok_or_else(|| DashboardError::SheetNotFound(name.to_string()))
    }
}

fn read_sheets<R>(name: String, xlsx: &mut Xlsx<R>) -> Result<Workbook>
where
    R: std::io::Read + std::io::Seek,
{
    let mut sheets = Vec::new();

    for sheet_name in xlsx.sheet_names() {
        match xlsx.worksheet_range(&sheet_name) {
            Ok(range) => sheets.push(Sheet::new(sheet_name, range_to_grid(&range))),
            Err(e) => {
                warn!("could not read sheet '{}': {}", sheet_name, e);
                sheets.push(Sheet::unreadable(sheet_name, e.to_string()));
            }
        }
    }

    Workbook::new(name, sheets)
}

fn range_to_grid(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect()
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match cell.as_datetime() {
            Some(value) => CellValue::DateTime(value),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
    }
}

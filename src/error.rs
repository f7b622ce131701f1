use thiserror::Error;

/// Errors raised while loading workbooks and producing dashboard output.
///
/// Most dashboard failures are not errors at all: a missing column or an unreadable sheet is
/// reported as a warning inside the rendered tab. This enum covers the cases where there is
/// nothing to render, such as an upload that is not a readable workbook.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    #[error("Template error: {0}")]
    Template(String),

    #[cfg(feature = "web")]
    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

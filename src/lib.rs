/*!
# CXO Dashboard

A browser-based executive dashboard for Excel workbooks, built in Rust.

## Overview

A user uploads an `.xlsx` workbook and gets one tab per sheet. Three sheets have dedicated
renderers, recognized by exact name:

- **Profitability** - raw preview, static KPI cards, and grouped breakdowns by Product, Zone,
  BD, AM, Segment or State with pie or bar charts
- **Dashboard Summary** - month-wise bar charts in Lacs for EBITDA, Revenue from Operations,
  Direct and Indirect Expenses, plus Net Worth; both wide (`Particulars` rows) and long
  (`Month` column) layouts are understood
- **P&L Summary** - the sheet as a formatted table

Every other sheet gets an empty tab. Rendering never fails as a whole: missing columns,
empty sheets and unreadable data become warnings in the affected tab.

## Architecture

### Data Layer
- **loader**: Workbook and sheet reading with calamine
- **table**: Header detection and the cell model
- **axis** / **metric**: Grouping axes and metric columns, matched by header text
- **aggregate**: Integer coercion of amounts and per-group sums
- **format**: Thousands separators for display

### Presentation Layer
- **dashboard**: Sheet routing and per-sheet views, producing presentation-neutral blocks
- **chart** / **kpi**: Chart and card models
- **graph**: SVG drawing with plotters
- **page**: HTML pages with handlebars

### Server Layer
- **app**: axum routes, upload handling and per-session workbooks
- **downloader**: CSV and XLSX export of grouped views
- **config**: Server settings from the environment and command line

## REST Endpoints

- `/` - Upload form
- `/upload` - Accepts the workbook (multipart field `workbook`)
- `/dashboard?tab=..&view=..` - One tab of the uploaded workbook
- `/export?tab=Profitability&view=..&format=csv|xlsx` - Grouped view download
- `/api/sheets` - Sheet names and their recognized kind as JSON
- `/reset` - Forgets the uploaded workbook
*/

pub mod aggregate;
pub mod axis;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod downloader;
pub mod error;
pub mod format;
pub mod kpi;
pub mod loader;
pub mod metric;
pub mod table;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod graph;
#[cfg(feature = "web")]
pub mod page;

pub use dashboard::{Block, ProfitabilityView, SheetKind, TabView, render_tab};
pub use error::{DashboardError, Result};
pub use loader::{Sheet, Workbook};

//! Sheet routing and per-sheet rendering.
//!
//! Rendering produces a presentation-neutral [`TabView`]: an ordered list of blocks
//! (headings, tables, warnings, KPI cards, charts). Rendering never fails as a whole;
//! every problem is turned into a warning block scoped to the smallest unit of work.

pub mod pnl;
pub mod profitability;
pub mod summary;

use crate::chart::Chart;
use crate::error::Result;
use crate::format::DisplayTable;
use crate::kpi::KpiCard;
use crate::loader::Workbook;
use log::{debug, warn};
use serde::Serialize;

pub use profitability::{ChartKind, ProfitabilityView, ViewConfig};

/// Sheets with a dedicated renderer, recognized by exact, case-sensitive name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SheetKind {
    Profitability,
    DashboardSummary,
    PnlSummary,
    Other,
}

impl SheetKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Profitability" => SheetKind::Profitability,
            "Dashboard Summary" => SheetKind::DashboardSummary,
            "P&L Summary" => SheetKind::PnlSummary,
            _ => SheetKind::Other,
        }
    }

    pub fn is_recognized(self) -> bool {
        self != SheetKind::Other
    }
}

/// One rendered unit of a tab.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Subheader(String),
    Caption(String),
    Table(DisplayTable),
    Warning(String),
    KpiCards(Vec<KpiCard>),
    Chart(Chart),
}

impl Block {
    pub fn warning(message: impl Into<String>) -> Self {
        Block::Warning(message.into())
    }

    pub fn subheader(text: impl Into<String>) -> Self {
        Block::Subheader(text.into())
    }
}

/// Everything shown inside one sheet tab.
#[derive(Clone, Debug, PartialEq)]
pub struct TabView {
    pub sheet: String,
    pub kind: SheetKind,
    /// Selected sidebar option; only the Profitability tab has a sidebar.
    pub view: Option<ProfitabilityView>,
    pub blocks: Vec<Block>,
}

impl TabView {
    pub fn warnings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Warning(w) => Some(w.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn charts(&self) -> Vec<&Chart> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Chart(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    pub fn tables(&self) -> Vec<&DisplayTable> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .collect()
    }
}

/// Renders the tab for `sheet_name`. Unrecognized sheets produce an empty tab.
///
/// # Errors
/// * `SheetNotFound` if the workbook has no sheet with that name
pub fn render_tab(
    workbook: &Workbook,
    sheet_name: &str,
    view: ProfitabilityView,
) -> Result<TabView> {
    let sheet = workbook.require_sheet(sheet_name)?;
    let kind = SheetKind::from_name(sheet_name);
    debug!("rendering tab '{}' as {:?}", sheet_name, kind);

    let (view, blocks) = match kind {
        SheetKind::Profitability => (Some(view), profitability::render(sheet, view)),
        SheetKind::DashboardSummary => (None, summary::render(sheet)),
        SheetKind::PnlSummary => (None, pnl::render(sheet)),
        SheetKind::Other => (None, Vec::new()),
    };

    let tab = TabView {
        sheet: sheet_name.to_string(),
        kind,
        view,
        blocks,
    };
    for warning in tab.warnings() {
        warn!("[{}] {}", sheet_name, warning);
    }

    Ok(tab)
}

#![cfg(feature = "web")]
use crate::dashboard::{Block, ProfitabilityView, SheetKind, TabView};
use crate::error::{DashboardError, Result};
use crate::format::DisplayTable;
use crate::graph::{GraphOptions, render_chart};
use crate::kpi::KpiCard;
use crate::loader::Workbook;
use handlebars::Handlebars;
use log::warn;
use serde::Serialize;

const PAGE_TITLE: &str = "CXO Dashboard";

#[derive(Serialize)]
struct TabLink {
    name: String,
    href: String,
    active: bool,
}

#[derive(Serialize)]
struct MenuLink {
    label: &'static str,
    href: String,
    selected: bool,
}

#[derive(Serialize)]
struct ExportLink {
    label: &'static str,
    href: String,
}

#[derive(Serialize)]
struct ChartContext {
    title: String,
    svg: String,
}

/// Exactly one field is set per block.
#[derive(Default, Serialize)]
struct BlockContext {
    subheader: Option<String>,
    caption: Option<String>,
    warning: Option<String>,
    table: Option<DisplayTable>,
    cards: Option<Vec<KpiCard>>,
    chart: Option<ChartContext>,
}

#[derive(Default, Serialize)]
struct PageContext {
    title: &'static str,
    workbook: Option<String>,
    error: Option<String>,
    active_tab: Option<String>,
    active_view: Option<&'static str>,
    tabs: Vec<TabLink>,
    menu: Vec<MenuLink>,
    exports: Vec<ExportLink>,
    blocks: Vec<BlockContext>,
}

/// Link to a tab, optionally with a sidebar selection.
pub fn dashboard_href(tab: &str, view: Option<ProfitabilityView>) -> String {
    let mut href = format!("/dashboard?tab={}", urlencoding::encode(tab));
    if let Some(view) = view {
        href.push_str("&view=");
        href.push_str(&urlencoding::encode(view.label()));
    }
    href
}

pub fn export_href(view: ProfitabilityView, format: &str) -> String {
    format!(
        "/export?tab=Profitability&view={}&format={}",
        urlencoding::encode(view.label()),
        format
    )
}

/// Renders complete HTML pages from the embedded handlebars template.
pub struct PageRenderer {
    registry: Handlebars<'static>,
    graph: GraphOptions,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string("dashboard", include_str!("../templates/dashboard.hbs"))
            .map_err(|e| DashboardError::Template(e.to_string()))?;

        Ok(PageRenderer {
            registry,
            graph: GraphOptions::default(),
        })
    }

    /// The upload form, with an optional error from a rejected upload.
    pub fn upload_page(&self, error: Option<&str>) -> Result<String> {
        let context = PageContext {
            title: PAGE_TITLE,
            error: error.map(str::to_string),
            ..Default::default()
        };
        self.render(&context)
    }

    /// One tab of an uploaded workbook, with every chart rendered to inline SVG.
    pub fn dashboard_page(&self, workbook: &Workbook, tab: &TabView) -> Result<String> {
        let tabs = workbook
            .sheet_names()
            .into_iter()
            .map(|name| TabLink {
                name: name.to_string(),
                href: dashboard_href(name, None),
                active: name == tab.sheet,
            })
            .collect();

        let menu = if tab.kind == SheetKind::Profitability {
            ProfitabilityView::ALL
                .into_iter()
                .map(|view| MenuLink {
                    label: view.label(),
                    href: dashboard_href(&tab.sheet, Some(view)),
                    selected: tab.view == Some(view),
                })
                .collect()
        } else {
            Vec::new()
        };

        let exports = match tab.view {
            Some(view) if view.config().is_some() && tab.warnings().is_empty() => vec![
                ExportLink {
                    label: "Download CSV",
                    href: export_href(view, "csv"),
                },
                ExportLink {
                    label: "Download XLSX",
                    href: export_href(view, "xlsx"),
                },
            ],
            _ => Vec::new(),
        };

        let context = PageContext {
            title: PAGE_TITLE,
            workbook: Some(workbook.name.clone()),
            active_tab: Some(tab.sheet.clone()),
            active_view: tab.view.map(|v| v.label()),
            tabs,
            menu,
            exports,
            blocks: tab.blocks.iter().map(|b| self.block_context(b)).collect(),
            ..Default::default()
        };
        self.render(&context)
    }

    fn block_context(&self, block: &Block) -> BlockContext {
        match block {
            Block::Subheader(text) => BlockContext {
                subheader: Some(text.clone()),
                ..Default::default()
            },
            Block::Caption(text) => BlockContext {
                caption: Some(text.clone()),
                ..Default::default()
            },
            Block::Warning(text) => BlockContext {
                warning: Some(text.clone()),
                ..Default::default()
            },
            Block::Table(table) => BlockContext {
                table: Some(table.clone()),
                ..Default::default()
            },
            Block::KpiCards(cards) => BlockContext {
                cards: Some(cards.clone()),
                ..Default::default()
            },
            Block::Chart(chart) => match render_chart(chart, &self.graph) {
                Ok(svg) => BlockContext {
                    chart: Some(ChartContext {
                        title: chart.title().to_string(),
                        svg,
                    }),
                    ..Default::default()
                },
                Err(e) => {
                    warn!("could not render chart '{}': {}", chart.title(), e);
                    BlockContext {
                        warning: Some(format!(
                            "Could not render chart '{}': {}",
                            chart.title(),
                            e
                        )),
                        ..Default::default()
                    }
                }
            },
        }
    }

    fn render(&self, context: &PageContext) -> Result<String> {
        self.registry
            .render("dashboard", context)
            .map_err(|e| DashboardError::Template(e.to_string()))
    }
}

use super::Block;
use crate::aggregate::{GroupedResult, group_by};
use crate::axis::{Axis, resolve_column};
use crate::chart::{BLUE, Chart, GREEN, ORANGE, Rgb, lacs_bar_chart, pie_chart};
use crate::format::{DisplayTable, format_grouped};
use crate::kpi::kpi_cards;
use crate::loader::Sheet;
use crate::metric::Metric;
use crate::table::{HeaderMode, Table};
use serde::Serialize;
use std::fmt;

const FOUR_KPIS: &[Metric] = &[
    Metric::NumberOfTransaction,
    Metric::Gmv,
    Metric::GrossRevenue,
    Metric::NetEarnings,
];

const THREE_KPIS: &[Metric] = &[Metric::Gmv, Metric::GrossRevenue, Metric::NetEarnings];

/// Sidebar options of the Profitability tab.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum ProfitabilityView {
    #[default]
    KpiCard,
    ProductWise,
    ZoneWise,
    BdWise,
    AmWise,
    SegmentWise,
    StateWise,
}

/// How a grouped view is charted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChartKind {
    /// One pie per metric; the legend lists each group's share.
    Pie { legend_title: &'static str },
    /// One bar chart per metric in Lacs; the color cycles through `palette` by metric.
    Bar { palette: &'static [Rgb] },
}

/// Everything that differs between the grouped Profitability views.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    pub axis: Axis,
    pub metrics: &'static [Metric],
    pub chart: ChartKind,
}

impl ProfitabilityView {
    pub const ALL: [ProfitabilityView; 7] = [
        ProfitabilityView::KpiCard,
        ProfitabilityView::ProductWise,
        ProfitabilityView::ZoneWise,
        ProfitabilityView::BdWise,
        ProfitabilityView::AmWise,
        ProfitabilityView::SegmentWise,
        ProfitabilityView::StateWise,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProfitabilityView::KpiCard => "KPI Card",
            ProfitabilityView::ProductWise => "Product Wise",
            ProfitabilityView::ZoneWise => "Zone Wise",
            ProfitabilityView::BdWise => "BD Wise",
            ProfitabilityView::AmWise => "AM Wise",
            ProfitabilityView::SegmentWise => "Segment Wise",
            ProfitabilityView::StateWise => "State Wise",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.label() == label)
    }

    /// Grouping configuration, or `None` for the static KPI card view.
    pub fn config(self) -> Option<ViewConfig> {
        let config = match self {
            ProfitabilityView::KpiCard => return None,
            ProfitabilityView::ProductWise => ViewConfig {
                axis: Axis::Product,
                metrics: FOUR_KPIS,
                chart: ChartKind::Pie {
                    legend_title: "Products",
                },
            },
            ProfitabilityView::ZoneWise => ViewConfig {
                axis: Axis::Zone,
                metrics: FOUR_KPIS,
                chart: ChartKind::Pie {
                    legend_title: "Zones",
                },
            },
            ProfitabilityView::BdWise => ViewConfig {
                axis: Axis::Bd,
                metrics: FOUR_KPIS,
                chart: ChartKind::Bar { palette: &[BLUE] },
            },
            ProfitabilityView::AmWise => ViewConfig {
                axis: Axis::Am,
                metrics: FOUR_KPIS,
                chart: ChartKind::Bar { palette: &[ORANGE] },
            },
            ProfitabilityView::SegmentWise => ViewConfig {
                axis: Axis::Segment,
                metrics: THREE_KPIS,
                chart: ChartKind::Pie {
                    legend_title: "Segments",
                },
            },
            ProfitabilityView::StateWise => ViewConfig {
                axis: Axis::State,
                metrics: THREE_KPIS,
                chart: ChartKind::Bar {
                    palette: &[BLUE, ORANGE, GREEN],
                },
            },
        };
        Some(config)
    }
}

impl fmt::Display for ProfitabilityView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Renders the Profitability tab: column list, raw preview, then the selected view.
pub fn render(sheet: &Sheet, view: ProfitabilityView) -> Vec<Block> {
    let table = match sheet.table(HeaderMode::FirstRow) {
        Ok(table) => table,
        Err(message) => {
            return vec![Block::warning(format!(
                "Could not read Profitability sheet: {}",
                message
            ))];
        }
    };

    let mut blocks = vec![Block::Caption(format!(
        "Columns found in your file: {}",
        table.columns.join(", ")
    ))];

    if table.is_empty() {
        blocks.push(Block::warning("No data found in Profitability sheet."));
        return blocks;
    }

    blocks.push(Block::subheader("Data Preview"));
    blocks.push(Block::Table(DisplayTable::raw(&table)));
    blocks.extend(render_view(&table, view));
    blocks
}

/// Renders one sidebar option against an already parsed table.
pub fn render_view(table: &Table, view: ProfitabilityView) -> Vec<Block> {
    match view.config() {
        None => vec![Block::subheader("KPI Cards"), Block::KpiCards(kpi_cards())],
        Some(config) => render_grouped(table, &config),
    }
}

/// Resolves the view's axis column and groups the table on it.
pub fn group_for_view(table: &Table, config: &ViewConfig) -> Option<GroupedResult> {
    resolve_column(&table.columns, config.axis).map(|col| group_by(table, col, config.metrics))
}

fn render_grouped(table: &Table, config: &ViewConfig) -> Vec<Block> {
    let axis = config.axis;
    let Some(grouped) = group_for_view(table, config) else {
        return vec![Block::warning(format!(
            "No '{}' column found in your data.",
            axis
        ))];
    };

    if grouped.is_empty() {
        return vec![Block::warning(format!(
            "No rows to group by '{}'.",
            grouped.axis_column
        ))];
    }

    let mut blocks = vec![Block::Table(format_grouped(&grouped))];
    let labels = grouped.labels();

    for (idx, metric) in config.metrics.iter().enumerate() {
        // Metrics missing from the sheet are skipped silently.
        let Some(values) = grouped.metric_values(*metric) else {
            continue;
        };

        let chart = match config.chart {
            ChartKind::Pie { legend_title } => Chart::Pie(pie_chart(
                format!("{} wise {} (Pie Chart)", axis, metric),
                legend_title,
                &labels,
                &values,
            )),
            ChartKind::Bar { palette } => Chart::Bar(lacs_bar_chart(
                format!("{} wise {} (in Lacs)", axis, metric),
                grouped.axis_column.clone(),
                format!("{} (Lacs)", metric),
                &labels,
                &values,
                palette[idx % palette.len()],
            )),
        };
        blocks.push(Block::Chart(chart));
    }

    blocks
}

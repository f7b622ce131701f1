use cxo_dashboard::chart::{BLUE, Chart, GREEN, ORANGE};
use cxo_dashboard::dashboard::summary::{SummaryLayout, detect_layout, monthly_totals};
use cxo_dashboard::dashboard::{Block, ProfitabilityView, SheetKind, render_tab};
use cxo_dashboard::error::DashboardError;
use cxo_dashboard::loader::{Sheet, Workbook};
use cxo_dashboard::metric::Metric;
use cxo_dashboard::table::{CellValue, Table};

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn int(v: i64) -> CellValue {
    CellValue::Int(v)
}

fn header(names: &[&str]) -> Vec<CellValue> {
    names.iter().map(|n| text(n)).collect()
}

fn workbook(sheets: Vec<Sheet>) -> Workbook {
    Workbook::new("test.xlsx", sheets).unwrap()
}

fn profitability_sheet() -> Sheet {
    Sheet::new(
        "Profitability",
        vec![
            header(&["Product Name", "Zone", "State", "GMV", "Gross Revenue", "Net Earnings"]),
            vec![text("Wallet"), text("North"), text("Delhi"), int(300_000), int(30_000), int(3_000)],
            vec![text("Card"), text("South"), text("Kerala"), int(100_000), text("10,000"), int(1_000)],
            vec![text("Wallet"), text("North"), text("Punjab"), int(100_000), int(5_000), CellValue::Empty],
        ],
    )
}

#[test]
fn sheets_are_recognized_by_exact_name() {
    assert_eq!(SheetKind::from_name("Profitability"), SheetKind::Profitability);
    assert_eq!(SheetKind::from_name("Dashboard Summary"), SheetKind::DashboardSummary);
    assert_eq!(SheetKind::from_name("P&L Summary"), SheetKind::PnlSummary);
    assert_eq!(SheetKind::from_name("profitability"), SheetKind::Other);
    assert!(!SheetKind::from_name("Notes").is_recognized());
}

#[test]
fn kpi_card_is_the_default_view() {
    let wb = workbook(vec![profitability_sheet()]);
    let tab = render_tab(&wb, "Profitability", ProfitabilityView::default()).unwrap();

    assert_eq!(tab.view, Some(ProfitabilityView::KpiCard));
    assert_eq!(
        tab.blocks[0],
        Block::Caption(
            "Columns found in your file: Product Name, Zone, State, GMV, Gross Revenue, Net Earnings"
                .to_string()
        )
    );
    assert_eq!(tab.blocks[1], Block::subheader("Data Preview"));
    assert_eq!(tab.tables()[0].rows.len(), 3);

    let Some(Block::KpiCards(cards)) = tab.blocks.last() else {
        panic!("expected KPI cards last");
    };
    assert_eq!(cards.len(), 6);
    assert_eq!(cards[0].name, "Number of Transaction");
    assert_eq!(cards[0].display, "315,432");
    assert_eq!(cards[1].display, "2,306,914,235");
    assert!(tab.charts().is_empty());
}

#[test]
fn zone_view_draws_one_pie_per_present_metric() {
    let wb = workbook(vec![profitability_sheet()]);
    let tab = render_tab(&wb, "Profitability", ProfitabilityView::ZoneWise).unwrap();

    assert!(tab.warnings().is_empty());
    let grouped = tab.tables()[1];
    assert_eq!(grouped.columns, vec!["Zone", "GMV", "Gross Revenue", "Net Earnings"]);
    assert_eq!(
        grouped.rows,
        vec![
            vec!["North", "400,000", "35,000", "3,000"],
            vec!["South", "100,000", "10,000", "1,000"],
        ]
    );

    let charts = tab.charts();
    assert_eq!(charts.len(), 3);
    let Chart::Pie(pie) = charts[0] else {
        panic!("zone view draws pies");
    };
    assert_eq!(pie.title, "Zone wise GMV (Pie Chart)");
    assert_eq!(pie.legend_title, "Zones");
    assert_eq!(pie.slices[0].legend_label(), "North: 80.0%");
    assert_eq!(pie.slices[1].legend_label(), "South: 20.0%");
}

#[test]
fn state_view_cycles_bar_colors_by_metric() {
    let wb = workbook(vec![profitability_sheet()]);
    let tab = render_tab(&wb, "Profitability", ProfitabilityView::StateWise).unwrap();

    let colors: Vec<_> = tab
        .charts()
        .into_iter()
        .map(|chart| match chart {
            Chart::Bar(bar) => bar.color,
            Chart::Pie(_) => panic!("state view draws bars"),
        })
        .collect();
    assert_eq!(colors, vec![BLUE, ORANGE, GREEN]);

    let Chart::Bar(gmv) = tab.charts()[0] else {
        unreachable!();
    };
    assert_eq!(gmv.title, "State wise GMV (in Lacs)");
    assert_eq!(gmv.x_label, "State");
    assert_eq!(gmv.y_label, "GMV (Lacs)");
    assert_eq!(gmv.values(), vec![Some(3.0), Some(1.0), Some(1.0)]);
}

#[test]
fn missing_axis_column_is_a_warning() {
    let wb = workbook(vec![profitability_sheet()]);

    for (view, axis) in [
        (ProfitabilityView::BdWise, "BD"),
        (ProfitabilityView::AmWise, "AM"),
        (ProfitabilityView::SegmentWise, "Segment"),
    ] {
        let tab = render_tab(&wb, "Profitability", view).unwrap();
        assert_eq!(
            tab.warnings(),
            vec![format!("No '{}' column found in your data.", axis).as_str()]
        );
        assert!(tab.charts().is_empty());
        // The raw preview is still shown
        assert_eq!(tab.tables().len(), 1);
    }
}

#[test]
fn header_only_profitability_sheet_warns() {
    let sheet = Sheet::new("Profitability", vec![header(&["Zone", "GMV"])]);
    let wb = workbook(vec![sheet]);
    let tab = render_tab(&wb, "Profitability", ProfitabilityView::ZoneWise).unwrap();

    assert_eq!(
        tab.blocks,
        vec![
            Block::Caption("Columns found in your file: Zone, GMV".to_string()),
            Block::warning("No data found in Profitability sheet."),
        ]
    );
}

#[test]
fn unreadable_sheet_keeps_its_tab() {
    let wb = workbook(vec![Sheet::unreadable("Profitability", "corrupt range")]);
    let tab = render_tab(&wb, "Profitability", ProfitabilityView::KpiCard).unwrap();
    assert_eq!(
        tab.warnings(),
        vec!["Could not read Profitability sheet: corrupt range"]
    );
}

#[test]
fn wide_summary_charts_each_metric_row() {
    let sheet = Sheet::new(
        "Dashboard Summary",
        vec![
            header(&["Particulars", "Apr-24", "May-24"]),
            vec![text("EBITDA"), text("1,00,000"), text("2,00,000")],
            vec![text("Direct Expenses"), int(50_000), CellValue::Empty],
        ],
    );
    let wb = workbook(vec![sheet]);
    let tab = render_tab(&wb, "Dashboard Summary", ProfitabilityView::default()).unwrap();

    assert_eq!(tab.view, None);
    assert_eq!(tab.blocks[0], Block::subheader("Dashboard Summary Data Table"));
    assert!(tab.blocks.contains(&Block::subheader("Month-wise KPI Bar Graphs")));
    assert!(tab.blocks.contains(&Block::subheader("EBITDA - Month-wise Bar Graph")));

    let charts = tab.charts();
    assert_eq!(charts.len(), 2);
    // Charts follow the fixed metric order, not the row order
    let Chart::Bar(direct) = charts[0] else {
        panic!("summary charts are bars");
    };
    assert_eq!(direct.title, "Month-wise Direct Expenses");
    assert_eq!(direct.values(), vec![Some(0.5), None]);

    let Chart::Bar(ebitda) = charts[1] else {
        panic!("summary charts are bars");
    };
    assert_eq!(ebitda.title, "Month-wise EBITDA");
    assert_eq!(ebitda.x_label, "Month");
    assert_eq!(ebitda.y_label, "EBITDA (Lacs)");
    assert_eq!(ebitda.values(), vec![Some(1.0), Some(2.0)]);
    assert_eq!(ebitda.bars[0].label, "Apr-24");
    assert_eq!(ebitda.color, BLUE);
}

#[test]
fn net_worth_is_charted_without_other_metrics() {
    let sheet = Sheet::new(
        "Dashboard Summary",
        vec![
            header(&["Particulars", "Apr-24"]),
            vec![text("Net Worth as on"), int(1_250_000)],
        ],
    );
    let wb = workbook(vec![sheet]);
    let tab = render_tab(&wb, "Dashboard Summary", ProfitabilityView::default()).unwrap();

    assert_eq!(tab.warnings().len(), 1);
    assert!(tab.warnings()[0].starts_with("None of the required metrics found for line chart:"));

    let charts = tab.charts();
    assert_eq!(charts.len(), 1);
    let Chart::Bar(net_worth) = charts[0] else {
        panic!("net worth is a bar chart");
    };
    assert_eq!(net_worth.title, "Month-wise Net Worth as on");
    assert_eq!(net_worth.y_label, "Net Worth (Lacs)");
    assert_eq!(net_worth.color, GREEN);
    assert_eq!(net_worth.values(), vec![Some(12.5)]);
}

#[test]
fn long_summary_sums_per_month_in_ascending_order() {
    let table = Table::new(
        vec!["Month".to_string(), "EBITDA".to_string(), "Direct Expenses".to_string()],
        vec![
            vec![int(2), int(100_000), int(50_000)],
            vec![int(1), int(200_000), text("pending")],
            vec![int(2), int(100_000), int(50_000)],
            vec![CellValue::Empty, int(900_000), int(900_000)],
        ],
    );
    assert_eq!(detect_layout(&table), SummaryLayout::Long { month: 0 });

    let months = monthly_totals(
        &table,
        0,
        &[(Metric::DirectExpenses, 2), (Metric::Ebitda, 1)],
    );
    let labels: Vec<&str> = months.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "2"]);
    assert_eq!(months[0].totals, vec![0.0, 2.0]);
    assert_eq!(months[1].totals, vec![1.0, 2.0]);
}

#[test]
fn summary_without_month_column_warns() {
    let sheet = Sheet::new(
        "Dashboard Summary",
        vec![header(&["Year", "Value"]), vec![int(2024), int(5)]],
    );
    let wb = workbook(vec![sheet]);
    let tab = render_tab(&wb, "Dashboard Summary", ProfitabilityView::default()).unwrap();

    assert_eq!(
        tab.warnings(),
        vec!["No month column found for line chart. Please ensure a column named 'Month' exists."]
    );
    assert_eq!(tab.tables().len(), 1);
}

#[test]
fn empty_summary_sheet_warns() {
    let wb = workbook(vec![Sheet::new("Dashboard Summary", Vec::new())]);
    let tab = render_tab(&wb, "Dashboard Summary", ProfitabilityView::default()).unwrap();
    assert_eq!(
        tab.blocks,
        vec![
            Block::subheader("Dashboard Summary Data Table"),
            Block::warning("No data found in Dashboard Summary sheet."),
        ]
    );
}

#[test]
fn single_column_summary_is_read_without_header() {
    let sheet = Sheet::new(
        "Dashboard Summary",
        vec![vec![text("Particulars")], vec![text("EBITDA")]],
    );
    let wb = workbook(vec![sheet]);
    let tab = render_tab(&wb, "Dashboard Summary", ProfitabilityView::default()).unwrap();

    let table = tab.tables()[0];
    assert_eq!(table.columns, vec!["0"]);
    assert_eq!(table.rows.len(), 2);
}

#[test]
fn pnl_summary_drops_blank_rows() {
    let sheet = Sheet::new(
        "P&L Summary",
        vec![
            header(&["Particulars", "FY24"]),
            vec![CellValue::Empty, text("  ")],
            vec![text("Revenue"), int(1_234_567)],
        ],
    );
    let wb = workbook(vec![sheet, Sheet::new("Notes", vec![vec![text("x")]])]);

    let tab = render_tab(&wb, "P&L Summary", ProfitabilityView::default()).unwrap();
    assert_eq!(tab.blocks[0], Block::subheader("P&L Summary Data Table"));
    assert_eq!(tab.tables()[0].rows, vec![vec!["Revenue", "1,234,567"]]);

    let notes = render_tab(&wb, "Notes", ProfitabilityView::default()).unwrap();
    assert_eq!(notes.kind, SheetKind::Other);
    assert!(notes.blocks.is_empty());
}

#[test]
fn empty_pnl_summary_warns() {
    let wb = workbook(vec![Sheet::new("P&L Summary", vec![header(&["Particulars"])])]);
    let tab = render_tab(&wb, "P&L Summary", ProfitabilityView::default()).unwrap();
    assert_eq!(tab.warnings(), vec!["No data found in P&L Summary sheet."]);
}

#[test]
fn unknown_sheet_and_empty_workbook_are_errors() {
    let wb = workbook(vec![profitability_sheet()]);
    assert!(matches!(
        render_tab(&wb, "Missing", ProfitabilityView::default()),
        Err(DashboardError::SheetNotFound(name)) if name == "Missing"
    ));
    assert!(matches!(
        Workbook::new("empty.xlsx", Vec::new()),
        Err(DashboardError::EmptyWorkbook)
    ));
}

#[test]
fn view_labels_round_trip() {
    for view in ProfitabilityView::ALL {
        assert_eq!(ProfitabilityView::from_label(view.label()), Some(view));
    }
    assert_eq!(ProfitabilityView::from_label("Zone wise"), None);
    assert!(ProfitabilityView::KpiCard.config().is_none());
    assert_eq!(
        ProfitabilityView::SegmentWise.config().map(|c| c.metrics.len()),
        Some(3)
    );
}

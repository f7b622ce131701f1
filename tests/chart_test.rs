use cxo_dashboard::chart::{
    BLUE, Chart, ORANGE, TAB20, lacs_bar_chart, palette_color, percentages, pie_chart,
};

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn percentages_sum_to_one_hundred() {
    let shares = percentages(&[300, 100, 600]);
    assert_eq!(shares, vec![30.0, 10.0, 60.0]);

    let shares = percentages(&[1, 1, 1]);
    let total: f64 = shares.iter().sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn zero_total_gives_zero_shares() {
    assert_eq!(percentages(&[0, 0]), vec![0.0, 0.0]);
    assert!(percentages(&[]).is_empty());

    let pie = pie_chart("t", "Zones", &labels(&["North", "South"]), &[0, 0]);
    assert_eq!(pie.slices[0].legend_label(), "North: 0.0%");
    assert_eq!(pie.slices[1].legend_label(), "South: 0.0%");
}

#[test]
fn pie_legend_shows_one_decimal() {
    let pie = pie_chart(
        "Zone wise GMV (Pie Chart)",
        "Zones",
        &labels(&["North", "South", "East"]),
        &[2, 1, 0],
    );
    assert_eq!(pie.legend_title, "Zones");
    assert_eq!(pie.slices[0].legend_label(), "North: 66.7%");
    assert_eq!(pie.slices[1].legend_label(), "South: 33.3%");
    assert_eq!(pie.slices[2].legend_label(), "East: 0.0%");
}

#[test]
fn palette_cycles_after_twenty_groups() {
    assert_eq!(palette_color(0), TAB20[0]);
    assert_eq!(palette_color(20), TAB20[0]);
    assert_eq!(palette_color(23), TAB20[3]);

    let names: Vec<String> = (0..22).map(|i| format!("P{}", i)).collect();
    let values = vec![1; 22];
    let pie = pie_chart("t", "Products", &names, &values);
    assert_eq!(pie.slices[21].color, TAB20[1]);
    assert_eq!(BLUE.hex(), "#1f77b4");
    assert_eq!(ORANGE.hex(), "#ff7f0e");
}

#[test]
fn bar_values_are_in_lacs() {
    let bar = lacs_bar_chart(
        "BD wise GMV (in Lacs)",
        "BD Name",
        "GMV (Lacs)",
        &labels(&["Asha", "Ravi"]),
        &[250_000, 50_000],
        BLUE,
    );
    assert_eq!(bar.values(), vec![Some(2.5), Some(0.5)]);
    assert_eq!(Chart::Bar(bar).title(), "BD wise GMV (in Lacs)");
}

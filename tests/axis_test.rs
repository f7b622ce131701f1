use cxo_dashboard::axis::{Axis, find_month_column, resolve_column};
use cxo_dashboard::metric::Metric;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn first_matching_header_wins() {
    let cols = headers(&["Product Code", "Product Name", "GMV"]);
    assert_eq!(resolve_column(&cols, Axis::Product), Some(0));
}

#[test]
fn matching_is_case_sensitive_containment() {
    let cols = headers(&["product", "Sales Zone", "BD Name", "AM Name", "State"]);
    assert_eq!(resolve_column(&cols, Axis::Product), None);
    assert_eq!(resolve_column(&cols, Axis::Zone), Some(1));
    assert_eq!(resolve_column(&cols, Axis::Bd), Some(2));
    assert_eq!(resolve_column(&cols, Axis::Am), Some(3));
    assert_eq!(resolve_column(&cols, Axis::State), Some(4));
    assert_eq!(resolve_column(&cols, Axis::Segment), None);
}

#[test]
fn month_column_ignores_case_and_spaces() {
    assert_eq!(find_month_column(&headers(&["Year", "MONTH"])), Some(1));
    assert_eq!(find_month_column(&headers(&["Mon th Name", "EBITDA"])), Some(0));
    assert_eq!(find_month_column(&headers(&["Period", "EBITDA"])), None);
}

#[test]
fn metric_labels_round_trip() {
    for metric in Metric::ALL {
        assert_eq!(Metric::from_label(metric.label()), Some(metric));
    }
    assert_eq!(Metric::from_label("ebitda"), None);
    assert_eq!(Metric::Ebitda.to_string(), "EBITDA");
    assert_eq!(Axis::Bd.to_string(), "BD");
}

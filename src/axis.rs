use serde::Serialize;
use std::fmt;

/// Semantic grouping dimensions detected from column headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    Product,
    Zone,
    Bd,
    Am,
    Segment,
    State,
    Month,
}

impl Axis {
    pub const ALL: [Axis; 7] = [
        Axis::Product,
        Axis::Zone,
        Axis::Bd,
        Axis::Am,
        Axis::Segment,
        Axis::State,
        Axis::Month,
    ];

    /// The text searched for in column headers.
    pub fn label(self) -> &'static str {
        match self {
            Axis::Product => "Product",
            Axis::Zone => "Zone",
            Axis::Bd => "BD",
            Axis::Am => "AM",
            Axis::Segment => "Segment",
            Axis::State => "State",
            Axis::Month => "Month",
        }
    }

    /// Case-sensitive substring containment of the axis label.
    pub fn matches(self, header: &str) -> bool {
        header.contains(self.label())
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns the index of the first header containing the axis label, in declared order.
///
/// Several headers may match ("Product", "Product Code"); only the first one is used.
///
/// # Examples
/// ```
/// use cxo_dashboard::axis::{Axis, resolve_column};
///
/// let headers = vec!["Sr".to_string(), "Product Name".to_string(), "GMV".to_string()];
/// assert_eq!(resolve_column(&headers, Axis::Product), Some(1));
/// assert_eq!(resolve_column(&headers, Axis::Zone), None);
/// ```
pub fn resolve_column(headers: &[String], axis: Axis) -> Option<usize> {
    headers.iter().position(|h| axis.matches(h))
}

/// Finds the month column of a long-format summary sheet.
///
/// Unlike [`resolve_column`], the match ignores case and spaces, so "MONTH", "month name"
/// and "Mon th" all qualify.
pub fn find_month_column(headers: &[String]) -> Option<usize> {
    headers.iter().position(|h| {
        let clean: String = h
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| *c != ' ')
            .collect();
        clean.contains("month")
    })
}

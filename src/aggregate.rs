use crate::metric::Metric;
use crate::table::{CellValue, Table};
use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref AMOUNT_REGEX: Regex = Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").unwrap();
}

/// Divisor for displaying amounts in Lacs (1 Lac = 100,000).
pub const LACS: f64 = 100_000.0;

/// Identity of a grouping value.
///
/// Values of different types stay apart, so the number `1` and the text `"1"` form two groups.
/// Integral floats are the same key as the equal integer, and all blank cells share one key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Blank,
    Number(i64),
    Fraction(u64),
    Text(String),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl GroupKey {
    pub fn of(cell: &CellValue) -> Self {
        match cell {
            CellValue::Empty => GroupKey::Blank,
            CellValue::Text(s) if s.trim().is_empty() => GroupKey::Blank,
            CellValue::Int(i) => GroupKey::Number(*i),
            CellValue::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                GroupKey::Number(*f as i64)
            }
            CellValue::Float(f) => GroupKey::Fraction(f.to_bits()),
            CellValue::Text(s) => GroupKey::Text(s.clone()),
            CellValue::Bool(b) => GroupKey::Bool(*b),
            CellValue::DateTime(dt) => GroupKey::DateTime(*dt),
        }
    }
}

/// One distinct value of the grouping column with its per-metric sums.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub key: CellValue,
    pub label: String,
    pub totals: Vec<i64>,
}

/// A table reduced by one grouping column.
///
/// `metrics` lists only the requested metrics that were present in the source table, and
/// every group's `totals` is parallel to it. Groups appear in first-seen order and are told
/// apart by [`GroupKey`], so two groups may share a display label.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedResult {
    pub axis_column: String,
    pub metrics: Vec<Metric>,
    pub groups: Vec<Group>,
}

impl GroupedResult {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.label.clone()).collect()
    }

    /// Per-group sums of one metric, or `None` when the metric was not in the source table.
    pub fn metric_values(&self, metric: Metric) -> Option<Vec<i64>> {
        let pos = self.metrics.iter().position(|m| *m == metric)?;
        Some(self.groups.iter().map(|g| g.totals[pos]).collect())
    }

    pub fn metric_total(&self, metric: Metric) -> Option<i64> {
        self.metric_values(metric)
            .map(|values| values.into_iter().fold(0i64, |acc, v| acc.saturating_add(v)))
    }
}

/// Groups rows by the value in `key_col` and sums each requested metric per group.
///
/// Metrics without an exactly-named column are left out of the result. Metric cells are
/// coerced with [`parse_amount`], so text, blanks and garbage never abort the aggregation.
///
/// # Examples
/// ```
/// use cxo_dashboard::aggregate::group_by;
/// use cxo_dashboard::metric::Metric;
/// use cxo_dashboard::table::{CellValue, Table};
///
/// let table = Table::new(
///     vec!["Product Name".into(), "GMV".into()],
///     vec![
///         vec![CellValue::Text("A".into()), CellValue::Int(100)],
///         vec![CellValue::Text("B".into()), CellValue::Int(200)],
///         vec![CellValue::Text("A".into()), CellValue::Int(50)],
///     ],
/// );
/// let grouped = group_by(&table, 0, &[Metric::Gmv]);
/// assert_eq!(grouped.labels(), vec!["A", "B"]);
/// assert_eq!(grouped.metric_values(Metric::Gmv), Some(vec![150, 200]));
/// ```
pub fn group_by(table: &Table, key_col: usize, metrics: &[Metric]) -> GroupedResult {
    let present: Vec<(Metric, usize)> = metrics
        .iter()
        .filter_map(|m| table.column_index(m.label()).map(|col| (*m, col)))
        .collect();

    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for (row_idx, row) in table.rows.iter().enumerate() {
        let key = table.cell(row_idx, key_col).clone();
        let label = if key.is_blank() {
            String::new()
        } else {
            key.to_string()
        };

        let slot = *index.entry(GroupKey::of(&key)).or_insert_with(|| {
            groups.push(Group {
                key,
                label,
                totals: vec![0; present.len()],
            });
            groups.len() - 1
        });

        for (pos, (_, col)) in present.iter().enumerate() {
            let value = row.get(*col).map(parse_amount).unwrap_or(0);
            let total = &mut groups[slot].totals[pos];
            *total = total.saturating_add(value);
        }
    }

    GroupedResult {
        axis_column: table.columns.get(key_col).cloned().unwrap_or_default(),
        metrics: present.into_iter().map(|(m, _)| m).collect(),
        groups,
    }
}

/// Coerces a metric cell to an integer amount.
///
/// Floats are truncated, text is parsed after stripping thousands separators, and anything
/// else (blanks, booleans, dates, non-numeric text) counts as zero.
pub fn parse_amount(cell: &CellValue) -> i64 {
    match cell {
        CellValue::Int(i) => *i,
        CellValue::Float(f) if f.is_finite() => f.trunc() as i64,
        CellValue::Text(s) => parse_amount_text(s).unwrap_or(0),
        _ => 0,
    }
}

/// Parses text such as `"1,00,000"` or `"2,306,914,235"` into an integer.
pub fn parse_amount_text(text: &str) -> Option<i64> {
    let clean = strip_separators(text);
    if !AMOUNT_REGEX.is_match(&clean) {
        return None;
    }
    clean
        .parse::<i64>()
        .ok()
        .or_else(|| clean.parse::<f64>().ok().map(|f| f.trunc() as i64))
}

/// Converts a cell to Lacs for plotting, or `None` when it holds no number.
pub fn parse_lacs(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Int(i) => Some(*i as f64 / LACS),
        CellValue::Float(f) if f.is_finite() => Some(f / LACS),
        CellValue::Text(s) => {
            let clean = strip_separators(s);
            if AMOUNT_REGEX.is_match(&clean) {
                clean.parse::<f64>().ok().map(|v| v / LACS)
            } else {
                None
            }
        }
        _ => None,
    }
}

pub fn to_lacs(amount: i64) -> f64 {
    amount as f64 / LACS
}

fn strip_separators(text: &str) -> String {
    text.chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect()
}

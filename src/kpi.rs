use crate::format::format_thousands;
use crate::metric::Metric;
use serde::Serialize;

/// Placeholder KPI values shown on the "KPI Card" view.
///
/// These are a fixed demo snapshot. They are not computed from the uploaded workbook.
pub const KPI_SNAPSHOT: [(Metric, i64); 6] = [
    (Metric::NumberOfTransaction, 315_432),
    (Metric::Gmv, 2_306_914_235),
    (Metric::GrossRevenue, 4_081_767),
    (Metric::BankPgCharges, 755_049),
    (Metric::ReferralCharges, 1_255_277),
    (Metric::NetEarnings, 2_071_441),
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KpiCard {
    pub name: String,
    pub value: i64,
    pub display: String,
}

impl KpiCard {
    pub fn new(metric: Metric, value: i64) -> Self {
        KpiCard {
            name: metric.label().to_string(),
            value,
            display: format_thousands(value),
        }
    }
}

/// One card per snapshot entry, in snapshot order.
pub fn kpi_cards() -> Vec<KpiCard> {
    KPI_SNAPSHOT
        .iter()
        .map(|(metric, value)| KpiCard::new(*metric, *value))
        .collect()
}

use serde::Serialize;
use std::fmt;

/// Business metrics recognized by exact column name (or exact row label in wide summaries).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    NumberOfTransaction,
    Gmv,
    GrossRevenue,
    BankPgCharges,
    ReferralCharges,
    NetEarnings,
    RevenueFromOperations,
    DirectExpenses,
    IndirectExpenses,
    Ebitda,
    NetWorth,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::NumberOfTransaction,
        Metric::Gmv,
        Metric::GrossRevenue,
        Metric::BankPgCharges,
        Metric::ReferralCharges,
        Metric::NetEarnings,
        Metric::RevenueFromOperations,
        Metric::DirectExpenses,
        Metric::IndirectExpenses,
        Metric::Ebitda,
        Metric::NetWorth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::NumberOfTransaction => "Number of Transaction",
            Metric::Gmv => "GMV",
            Metric::GrossRevenue => "Gross Revenue",
            Metric::BankPgCharges => "Bank & PG Charges",
            Metric::ReferralCharges => "Referral Charges",
            Metric::NetEarnings => "Net Earnings",
            Metric::RevenueFromOperations => "Revenue from Operations (A+B+C)",
            Metric::DirectExpenses => "Direct Expenses",
            Metric::IndirectExpenses => "Indirect Expenses",
            Metric::Ebitda => "EBITDA",
            Metric::NetWorth => "Net Worth as on",
        }
    }

    pub fn from_label(label: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.label() == label)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

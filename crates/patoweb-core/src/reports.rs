//! Report structures for the dashboard and JSON API

use serde::{Deserialize, Serialize};

/// Headline figures for the KPI cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Current balance: sum of cash effects over all entries
    pub balance: f64,
    /// Outstanding receivables: pending inflows
    pub pending_total: f64,
    /// Effective savings-goal target (parameter or fallback)
    pub goal_target: f64,
    /// Goal progress, integer percent clamped to 0..=100
    pub goal_progress: u8,
    /// Total ledger entries in the snapshot
    pub entry_count: usize,
    /// Entries on the pending-dues board
    pub pending_count: usize,
}

/// One point of the balance-evolution series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Month label as it appears in the ledger
    pub month_label: String,
    /// Net cash effect of that month
    pub period_balance: f64,
    /// Running balance up to and including that month
    pub cumulative_balance: f64,
}

/// One card on the pending-dues board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtorCard {
    pub name: String,
    pub category: String,
    pub month_label: String,
    pub amount: f64,
    pub note: Option<String>,
    /// Board column, assigned round-robin by row position
    pub column: usize,
}

/// One slice of the category breakdown chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
    pub count: usize,
}

/// Inflow/outflow totals for one month of the history chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthFlow {
    pub month_label: String,
    pub inflow: f64,
    pub outflow: f64,
}

//! Core ledger aggregation and business logic
//!
//! Everything the dashboard shows is computed here from an immutable
//! snapshot of the two source tables. The aggregation functions are pure;
//! the `Ledger` wraps them with the snapshot cache and the loader seam.

pub mod cache;
pub mod error;
pub mod models;
pub mod money;
pub mod months;
pub mod reports;
pub mod session;

use std::sync::RwLock;

use chrono::Utc;
use patoweb_config::Config;
use patoweb_loader::LoaderRef;

pub use cache::{is_stale, CacheEntry, Snapshot};
pub use error::{CoreError, ErrorCode, ErrorDetails};
pub use models::{EntryKind, EntryStatus, FlowEntry, Parameter};
pub use money::{normalize, normalize_text, parse_brl, RawAmount};
pub use months::month_ordinal;
pub use reports::{CategorySlice, DebtorCard, MonthFlow, MonthlyPoint, Summary};
pub use session::{Session, SESSION_COOKIE};

/// Parameter key holding the savings-goal target
pub const GOAL_PARAMETER: &str = "Meta_Reserva";

// ==================== Aggregation Functions ====================

/// Current balance: sum of cash effects over all entries
///
/// Summation order does not matter beyond float rounding; pending and
/// unrecognized rows contribute zero.
pub fn balance(entries: &[FlowEntry]) -> f64 {
    entries.iter().map(|e| e.cash_effect()).sum()
}

/// Outstanding receivables: sum of pending inflow magnitudes
pub fn pending_total(entries: &[FlowEntry]) -> f64 {
    entries
        .iter()
        .filter(|e| e.is_pending_receivable())
        .map(|e| e.amount)
        .sum()
}

/// Savings-goal target from the parameters table, if present and parseable
pub fn goal_target(parameters: &[Parameter]) -> Option<f64> {
    parameters
        .iter()
        .find(|p| p.key == GOAL_PARAMETER)
        .and_then(|p| parse_brl(&p.value))
}

/// Goal progress as an integer percent clamped to 0..=100
///
/// A zero or negative goal yields 0 rather than a division by zero.
pub fn goal_progress(balance: f64, goal: f64) -> u8 {
    if goal <= 0.0 {
        return 0;
    }
    (balance / goal * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Headline figures for the KPI cards
pub fn summarize(entries: &[FlowEntry], parameters: &[Parameter], fallback_goal: f64) -> Summary {
    let balance = balance(entries);
    let goal = goal_target(parameters).unwrap_or(fallback_goal);
    Summary {
        balance,
        pending_total: pending_total(entries),
        goal_target: goal,
        goal_progress: goal_progress(balance, goal),
        entry_count: entries.len(),
        pending_count: entries.iter().filter(|e| e.is_pending_receivable()).count(),
    }
}

/// Balance-evolution series for the trend chart
///
/// Groups entries with a non-zero cash effect by month label (first-seen
/// order), stable-sorts the groups by month ordinal (unrecognized labels
/// sort first) and accumulates the running balance.
pub fn monthly_series(entries: &[FlowEntry]) -> Vec<MonthlyPoint> {
    let mut groups: Vec<(String, f64)> = Vec::new();
    for entry in entries {
        let effect = entry.cash_effect();
        if effect == 0.0 {
            continue;
        }
        match groups.iter_mut().find(|(label, _)| *label == entry.month_ref) {
            Some(group) => group.1 += effect,
            None => groups.push((entry.month_ref.clone(), effect)),
        }
    }

    let mut keyed: Vec<(u32, String, f64)> = groups
        .into_iter()
        .map(|(label, value)| (month_ordinal(&label), label, value))
        .collect();
    // sort_by_key is stable: equal ordinals keep first-seen order
    keyed.sort_by_key(|(ordinal, _, _)| *ordinal);

    let mut cumulative = 0.0;
    keyed
        .into_iter()
        .map(|(_, month_label, period_balance)| {
            cumulative += period_balance;
            MonthlyPoint {
                month_label,
                period_balance,
                cumulative_balance: cumulative,
            }
        })
        .collect()
}

/// Category breakdown of the inflow side, for the origin-of-money chart
///
/// All inflow rows count regardless of status: a pledged due is still an
/// origin of money. Sorted by amount descending.
pub fn category_breakdown(entries: &[FlowEntry]) -> Vec<CategorySlice> {
    let mut groups: Vec<(String, f64, usize)> = Vec::new();
    for entry in entries.iter().filter(|e| e.kind == EntryKind::Inflow) {
        match groups.iter_mut().find(|(label, _, _)| *label == entry.category) {
            Some(group) => {
                group.1 += entry.amount;
                group.2 += 1;
            }
            None => groups.push((entry.category.clone(), entry.amount, 1)),
        }
    }

    let total: f64 = groups.iter().map(|(_, amount, _)| amount).sum();
    let mut slices: Vec<CategorySlice> = groups
        .into_iter()
        .map(|(category, amount, count)| CategorySlice {
            category,
            amount,
            percentage: if total > 0.0 {
                amount / total * 100.0
            } else {
                0.0
            },
            count,
        })
        .collect();
    slices.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(std::cmp::Ordering::Equal));
    slices
}

/// Per-month inflow/outflow totals for the history chart
///
/// Covers all recognized rows, paid or pending, ordered like the monthly
/// series.
pub fn monthly_history(entries: &[FlowEntry]) -> Vec<MonthFlow> {
    let mut groups: Vec<(String, f64, f64)> = Vec::new();
    for entry in entries {
        let (inflow, outflow) = match entry.kind {
            EntryKind::Inflow => (entry.amount, 0.0),
            EntryKind::Outflow => (0.0, entry.amount),
            EntryKind::Unknown => continue,
        };
        match groups.iter_mut().find(|(label, _, _)| *label == entry.month_ref) {
            Some(group) => {
                group.1 += inflow;
                group.2 += outflow;
            }
            None => groups.push((entry.month_ref.clone(), inflow, outflow)),
        }
    }

    let mut keyed: Vec<(u32, String, f64, f64)> = groups
        .into_iter()
        .map(|(label, inflow, outflow)| (month_ordinal(&label), label, inflow, outflow))
        .collect();
    keyed.sort_by_key(|(ordinal, _, _, _)| *ordinal);

    keyed
        .into_iter()
        .map(|(_, month_label, inflow, outflow)| MonthFlow {
            month_label,
            inflow,
            outflow,
        })
        .collect()
}

/// Pending-dues board: pending receivables in original table order,
/// assigned round-robin to `columns` board columns
pub fn debtor_board(entries: &[FlowEntry], columns: usize) -> Vec<DebtorCard> {
    let columns = columns.max(1);
    entries
        .iter()
        .filter(|e| e.is_pending_receivable())
        .enumerate()
        .map(|(position, entry)| DebtorCard {
            name: entry.name.clone(),
            category: entry.category.clone(),
            month_label: entry.month_ref.clone(),
            amount: entry.amount,
            note: entry.note.clone(),
            column: position % columns,
        })
        .collect()
}

// ==================== Ledger ====================

/// The loaded ledger: snapshot cache plus the loader seam
///
/// All reads go through `snapshot()`, which hands out an immutable clone;
/// handlers never observe a half-refreshed state. Lock poisoning is
/// recovered from, not propagated: the guarded value is always a whole
/// `Option<CacheEntry>`.
pub struct Ledger {
    config: Config,
    loader: LoaderRef,
    cache: RwLock<Option<CacheEntry>>,
}

impl Ledger {
    /// Create a new ledger with config and loader
    pub fn new(config: Config, loader: LoaderRef) -> Self {
        Self {
            config,
            loader,
            cache: RwLock::new(None),
        }
    }

    /// Force a fetch of both source tables
    ///
    /// On failure the cache is cleared: a failed fetch yields "no data" for
    /// the views that follow, not a silently stale snapshot.
    pub async fn load(&self) -> Result<(), CoreError> {
        let flow = self.loader.load_flow(self.config.flow_path()).await;
        let parameters = self
            .loader
            .load_parameters(self.config.parameters_path())
            .await;

        match (flow, parameters) {
            (Ok(flow), Ok(parameters)) => {
                let snapshot = Snapshot {
                    entries: flow.iter().map(FlowEntry::from_record).collect(),
                    parameters: parameters.iter().map(Parameter::from_record).collect(),
                };
                log::info!(
                    "Snapshot refreshed: {} entries, {} parameters",
                    snapshot.entries.len(),
                    snapshot.parameters.len()
                );
                let mut guard = self.cache.write().unwrap_or_else(|e| e.into_inner());
                *guard = Some(CacheEntry::new(snapshot));
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                log::error!("Snapshot refresh failed: {}", e);
                let mut guard = self.cache.write().unwrap_or_else(|e| e.into_inner());
                *guard = None;
                Err(CoreError::SourceUnavailable {
                    message: e.to_string(),
                })
            }
        }
    }

    /// Fetch the source tables only when the cached snapshot is absent or
    /// older than the configured TTL
    pub async fn refresh_if_stale(&self) -> Result<(), CoreError> {
        let needs_refresh = {
            let guard = self.cache.read().unwrap_or_else(|e| e.into_inner());
            match guard.as_ref() {
                Some(entry) => is_stale(
                    Utc::now(),
                    entry.fetched_at,
                    self.config.data.cache_ttl_secs,
                ),
                None => true,
            }
        };

        if needs_refresh {
            self.load().await
        } else {
            Ok(())
        }
    }

    /// Current snapshot, or `NotLoaded` when there is no data
    pub fn snapshot(&self) -> Result<Snapshot, CoreError> {
        let guard = self.cache.read().unwrap_or_else(|e| e.into_inner());
        guard
            .as_ref()
            .map(|entry| entry.snapshot.clone())
            .ok_or(CoreError::NotLoaded)
    }

    /// Whether a snapshot is available
    pub fn is_loaded(&self) -> bool {
        self.cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Headline figures for the KPI cards
    pub fn summary(&self) -> Result<Summary, CoreError> {
        let snapshot = self.snapshot()?;
        Ok(summarize(
            &snapshot.entries,
            &snapshot.parameters,
            self.config.goal.fallback_target,
        ))
    }

    /// Balance-evolution series
    pub fn monthly_series(&self) -> Result<Vec<MonthlyPoint>, CoreError> {
        Ok(monthly_series(&self.snapshot()?.entries))
    }

    /// Category breakdown of inflows
    pub fn category_breakdown(&self) -> Result<Vec<CategorySlice>, CoreError> {
        Ok(category_breakdown(&self.snapshot()?.entries))
    }

    /// Per-month inflow/outflow history
    pub fn monthly_history(&self) -> Result<Vec<MonthFlow>, CoreError> {
        Ok(monthly_history(&self.snapshot()?.entries))
    }

    /// Pending-dues board
    pub fn debtor_board(&self) -> Result<Vec<DebtorCard>, CoreError> {
        Ok(debtor_board(
            &self.snapshot()?.entries,
            self.config.display.pending_columns,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use patoweb_loader::{FlowRecord, LoadError, ParameterRecord, TableLoader};
    use std::path::PathBuf;
    use std::sync::Arc;

    const EPS: f64 = 1e-9;

    fn entry(month: &str, name: &str, tipo: &str, status: &str, valor: &str) -> FlowEntry {
        FlowEntry::from_record(&FlowRecord {
            mes_ref: month.to_string(),
            nome: name.to_string(),
            categoria: "Mensalidade".to_string(),
            valor: valor.to_string(),
            tipo: tipo.to_string(),
            status: status.to_string(),
            obs: None,
        })
    }

    fn goal_param(value: &str) -> Parameter {
        Parameter {
            key: GOAL_PARAMETER.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_balance_and_pending_scenario() {
        // Entrada 100 pago, Saída 30 pago, Entrada 50 pendente
        let entries = vec![
            entry("Jan/2024", "Carlos", "Entrada", "Pago", "100,00"),
            entry("Jan/2024", "Campo", "Saída", "Pago", "30,00"),
            entry("Jan/2024", "Rafa", "Entrada", "Pendente", "50,00"),
        ];
        assert!((balance(&entries) - 70.0).abs() < EPS);
        assert!((pending_total(&entries) - 50.0).abs() < EPS);
    }

    #[test]
    fn test_balance_is_order_independent() {
        let mut entries = vec![
            entry("Jan/2024", "A", "Entrada", "Pago", "10,10"),
            entry("Fev/2024", "B", "Saída", "Pago", "3,33"),
            entry("Mar/2024", "C", "Entrada", "Pago", "7,77"),
            entry("Mar/2024", "D", "Entrada", "Pendente", "99,99"),
        ];
        let forward = balance(&entries);
        entries.reverse();
        let backward = balance(&entries);
        assert!((forward - backward).abs() < 1e-6);
    }

    #[test]
    fn test_empty_table() {
        let entries: Vec<FlowEntry> = Vec::new();
        let summary = summarize(&entries, &[], 800.0);
        assert_eq!(summary.balance, 0.0);
        assert_eq!(summary.pending_total, 0.0);
        assert_eq!(summary.goal_progress, 0);
        assert_eq!(summary.goal_target, 800.0);
        assert!(monthly_series(&entries).is_empty());
        assert!(debtor_board(&entries, 3).is_empty());
    }

    #[test]
    fn test_goal_fallback_when_parameter_missing() {
        // No Meta_Reserva row: balance 400 against the 800 fallback -> 50%
        let entries = vec![entry("Jan/2024", "Caixa", "Entrada", "Pago", "400,00")];
        let summary = summarize(&entries, &[], 800.0);
        assert_eq!(summary.goal_target, 800.0);
        assert_eq!(summary.goal_progress, 50);
    }

    #[test]
    fn test_goal_from_parameter_table() {
        let parameters = vec![
            Parameter {
                key: "Outro".to_string(),
                value: "1".to_string(),
            },
            goal_param("R$ 1.000,00"),
        ];
        assert_eq!(goal_target(&parameters), Some(1000.0));
    }

    #[test]
    fn test_goal_progress_clamped() {
        assert_eq!(goal_progress(1600.0, 800.0), 100);
        assert_eq!(goal_progress(-50.0, 800.0), 0);
        assert_eq!(goal_progress(0.0, 800.0), 0);
        assert_eq!(goal_progress(400.0, 0.0), 0);
        assert_eq!(goal_progress(400.0, -10.0), 0);
    }

    #[test]
    fn test_malformed_goal_parameter_uses_fallback() {
        let entries = vec![entry("Jan/2024", "Caixa", "Entrada", "Pago", "400,00")];
        let parameters = vec![goal_param("indefinido")];
        let summary = summarize(&entries, &parameters, 800.0);
        assert_eq!(summary.goal_target, 800.0);
        assert_eq!(summary.goal_progress, 50);
    }

    #[test]
    fn test_monthly_series_sparse_months() {
        // Jan and Mar present, Fev absent: order Jan then Mar, cumulative
        // carries across the gap
        let entries = vec![
            entry("Mar/2024", "C", "Entrada", "Pago", "20,00"),
            entry("Jan/2024", "A", "Entrada", "Pago", "100,00"),
            entry("Jan/2024", "B", "Saída", "Pago", "30,00"),
        ];
        let series = monthly_series(&entries);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].month_label, "Jan/2024");
        assert!((series[0].period_balance - 70.0).abs() < EPS);
        assert_eq!(series[1].month_label, "Mar/2024");
        assert!((series[1].cumulative_balance - 90.0).abs() < EPS);
    }

    #[test]
    fn test_monthly_series_excludes_zero_effect_rows() {
        let entries = vec![
            entry("Jan/2024", "A", "Entrada", "Pendente", "50,00"),
            entry("Fev/2024", "B", "Entrada", "Pago", "10,00"),
        ];
        let series = monthly_series(&entries);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].month_label, "Fev/2024");
    }

    #[test]
    fn test_monthly_series_unrecognized_label_sorts_first() {
        let entries = vec![
            entry("Fev/2024", "A", "Entrada", "Pago", "10,00"),
            entry("Pré-temporada", "B", "Entrada", "Pago", "5,00"),
        ];
        let series = monthly_series(&entries);
        assert_eq!(series[0].month_label, "Pré-temporada");
        assert_eq!(series[1].month_label, "Fev/2024");
    }

    #[test]
    fn test_monthly_series_cumulative_matches_balance() {
        let entries = vec![
            entry("Jan/2024", "A", "Entrada", "Pago", "100,00"),
            entry("Fev/2024", "B", "Saída", "Pago", "42,50"),
            entry("Mar/2024", "C", "Entrada", "Pago", "17,25"),
            entry("Mar/2024", "D", "Entrada", "Pendente", "99,00"),
        ];
        let series = monthly_series(&entries);
        let last = series.last().unwrap();
        assert!((last.cumulative_balance - balance(&entries)).abs() < 1e-6);
    }

    #[test]
    fn test_category_breakdown_inflows_only() {
        let mut entries = vec![
            entry("Jan/2024", "A", "Entrada", "Pago", "60,00"),
            entry("Jan/2024", "B", "Entrada", "Pendente", "40,00"),
            entry("Jan/2024", "C", "Saída", "Pago", "30,00"),
        ];
        entries[1].category = "Churrasco".to_string();
        let slices = category_breakdown(&entries);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].category, "Mensalidade");
        assert!((slices[0].amount - 60.0).abs() < EPS);
        assert!((slices[0].percentage - 60.0).abs() < EPS);
        assert_eq!(slices[1].count, 1);
    }

    #[test]
    fn test_monthly_history_totals() {
        let entries = vec![
            entry("Jan/2024", "A", "Entrada", "Pago", "100,00"),
            entry("Jan/2024", "B", "Saída", "Pago", "30,00"),
            entry("Fev/2024", "C", "Entrada", "Pendente", "50,00"),
        ];
        let history = monthly_history(&entries);
        assert_eq!(history.len(), 2);
        assert!((history[0].inflow - 100.0).abs() < EPS);
        assert!((history[0].outflow - 30.0).abs() < EPS);
        assert!((history[1].inflow - 50.0).abs() < EPS);
    }

    #[test]
    fn test_debtor_board_round_robin() {
        let entries = vec![
            entry("Jan/2024", "A", "Entrada", "Pendente", "10,00"),
            entry("Jan/2024", "X", "Saída", "Pago", "99,00"),
            entry("Jan/2024", "B", "Entrada", "Pendente", "20,00"),
            entry("Fev/2024", "C", "Entrada", "Pendente", "30,00"),
            entry("Fev/2024", "D", "Entrada", "Pendente", "40,00"),
        ];
        let board = debtor_board(&entries, 3);
        assert_eq!(board.len(), 4);
        // Original table order preserved, columns assigned round-robin
        assert_eq!(board[0].name, "A");
        assert_eq!(board[0].column, 0);
        assert_eq!(board[1].column, 1);
        assert_eq!(board[2].column, 2);
        assert_eq!(board[3].name, "D");
        assert_eq!(board[3].column, 0);
    }

    // ==================== Ledger Tests ====================

    struct StubLoader {
        fail: bool,
    }

    #[async_trait]
    impl TableLoader for StubLoader {
        async fn load_flow(&self, _path: PathBuf) -> Result<Vec<FlowRecord>, LoadError> {
            if self.fail {
                return Err(LoadError::TableError {
                    table: "Fluxo_Caixa".to_string(),
                    message: "arquivo ausente".to_string(),
                });
            }
            Ok(vec![FlowRecord {
                mes_ref: "Jan/2024".to_string(),
                nome: "Carlos".to_string(),
                categoria: "Mensalidade".to_string(),
                valor: "R$ 100,00".to_string(),
                tipo: "Entrada".to_string(),
                status: "Pago".to_string(),
                obs: None,
            }])
        }

        async fn load_parameters(&self, _path: PathBuf) -> Result<Vec<ParameterRecord>, LoadError> {
            if self.fail {
                return Err(LoadError::TableError {
                    table: "Parametros".to_string(),
                    message: "arquivo ausente".to_string(),
                });
            }
            Ok(vec![ParameterRecord {
                parametro: GOAL_PARAMETER.to_string(),
                valor: "200".to_string(),
            }])
        }
    }

    #[tokio::test]
    async fn test_ledger_load_and_summary() {
        let ledger = Ledger::new(Config::default(), Arc::new(StubLoader { fail: false }));
        assert!(!ledger.is_loaded());
        assert!(matches!(ledger.summary(), Err(CoreError::NotLoaded)));

        ledger.load().await.unwrap();
        let summary = ledger.summary().unwrap();
        assert!((summary.balance - 100.0).abs() < EPS);
        assert_eq!(summary.goal_target, 200.0);
        assert_eq!(summary.goal_progress, 50);
        assert_eq!(summary.entry_count, 1);
    }

    #[tokio::test]
    async fn test_ledger_failed_load_yields_no_data() {
        let ledger = Ledger::new(Config::default(), Arc::new(StubLoader { fail: true }));
        let result = ledger.load().await;
        assert!(matches!(result, Err(CoreError::SourceUnavailable { .. })));
        assert!(!ledger.is_loaded());
        assert!(ledger.snapshot().is_err());
    }

    #[tokio::test]
    async fn test_ledger_recovers_from_poisoned_cache_lock() {
        let ledger = Arc::new(Ledger::new(
            Config::default(),
            Arc::new(StubLoader { fail: false }),
        ));
        ledger.load().await.unwrap();

        let poisoner = Arc::clone(&ledger);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.cache.write().unwrap();
            panic!("poisoning the cache lock");
        })
        .join();

        assert!(ledger.is_loaded());
        let summary = ledger.summary().unwrap();
        assert!((summary.balance - 100.0).abs() < EPS);
    }

    #[tokio::test]
    async fn test_ledger_refresh_if_stale_skips_fresh_snapshot() {
        let ledger = Ledger::new(Config::default(), Arc::new(StubLoader { fail: false }));
        ledger.refresh_if_stale().await.unwrap();
        let first = ledger.snapshot().unwrap();
        // Within the TTL window the snapshot is reused as-is
        ledger.refresh_if_stale().await.unwrap();
        let second = ledger.snapshot().unwrap();
        assert_eq!(first.entries.len(), second.entries.len());
    }
}

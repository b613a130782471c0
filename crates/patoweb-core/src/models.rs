//! Domain model for the ledger
//!
//! Raw CSV records become typed entries here: the amount is normalized to a
//! magnitude and Tipo/Status collapse into closed enums. Anything outside
//! the known vocabulary maps to `Unknown` and contributes nothing to the
//! balance.

use patoweb_loader::{FlowRecord, ParameterRecord};
use patoweb_utils::fold_accents;
use serde::{Deserialize, Serialize};

use crate::money::normalize_text;

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// "Entrada" - money coming in
    Inflow,
    /// "Saída" - money going out
    Outflow,
    /// Unrecognized Tipo; never affects the balance
    Unknown,
}

impl EntryKind {
    /// Classify a Tipo label: case-insensitive, accent-folded exact match
    pub fn classify(tipo: &str) -> Self {
        let key = fold_accents(tipo.trim()).to_lowercase();
        match key.as_str() {
            "entrada" => EntryKind::Inflow,
            "saida" => EntryKind::Outflow,
            _ => EntryKind::Unknown,
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Inflow => write!(f, "Entrada"),
            EntryKind::Outflow => write!(f, "Saída"),
            EntryKind::Unknown => write!(f, "?"),
        }
    }
}

/// Settlement status of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// "Pago" - settled
    Paid,
    /// "Pendente" - outstanding
    Pending,
    /// Unrecognized Status; never affects the balance
    Unknown,
}

impl EntryStatus {
    /// Classify a Status label: case-insensitive, accent-folded exact match
    pub fn classify(status: &str) -> Self {
        let key = fold_accents(status.trim()).to_lowercase();
        match key.as_str() {
            "pago" => EntryStatus::Paid,
            "pendente" => EntryStatus::Pending,
            _ => EntryStatus::Unknown,
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Paid => write!(f, "Pago"),
            EntryStatus::Pending => write!(f, "Pendente"),
            EntryStatus::Unknown => write!(f, "?"),
        }
    }
}

/// One typed ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEntry {
    /// Reporting month label, e.g. "Janeiro/2024"
    pub month_ref: String,
    /// Person associated with the entry
    pub name: String,
    /// Free-text category
    pub category: String,
    /// Normalized non-negative magnitude; sign comes from `kind`
    pub amount: f64,
    /// Inflow / outflow classification
    pub kind: EntryKind,
    /// Paid / pending classification
    pub status: EntryStatus,
    /// Optional free-text note
    pub note: Option<String>,
}

impl FlowEntry {
    /// Build a typed entry from a raw CSV record
    pub fn from_record(record: &FlowRecord) -> Self {
        Self {
            month_ref: record.mes_ref.clone(),
            name: record.nome.clone(),
            category: record.categoria.clone(),
            amount: normalize_text(&record.valor),
            kind: EntryKind::classify(&record.tipo),
            status: EntryStatus::classify(&record.status),
            note: record.obs.clone().filter(|s| !s.trim().is_empty()),
        }
    }

    /// Signed contribution of this entry to the running balance
    ///
    /// Only paid entries count: `+amount` for inflows, `-amount` for
    /// outflows, `0` for everything else.
    pub fn cash_effect(&self) -> f64 {
        if self.status != EntryStatus::Paid {
            return 0.0;
        }
        match self.kind {
            EntryKind::Inflow => self.amount,
            EntryKind::Outflow => -self.amount,
            EntryKind::Unknown => 0.0,
        }
    }

    /// True for an inflow that has not been settled yet
    pub fn is_pending_receivable(&self) -> bool {
        self.status == EntryStatus::Pending && self.kind == EntryKind::Inflow
    }
}

/// One key/value row of the parameters table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter key, e.g. "Meta_Reserva"
    pub key: String,
    /// Parameter value as stored
    pub value: String,
}

impl Parameter {
    /// Build a typed parameter from a raw CSV record
    pub fn from_record(record: &ParameterRecord) -> Self {
        Self {
            key: record.parametro.clone(),
            value: record.valor.clone(),
        }
    }
}

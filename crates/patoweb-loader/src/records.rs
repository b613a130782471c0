//! Raw record types as they appear in the CSV tables
//!
//! Fields are kept as text here; interpretation (currency normalization,
//! Tipo/Status classification) happens in patoweb-core.

use serde::{Deserialize, Serialize};

/// One row of the cash-flow table (Fluxo_Caixa)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowRecord {
    /// Reporting month label, e.g. "Janeiro/2024" or "Jan/2024"
    #[serde(rename = "Mes_Ref")]
    pub mes_ref: String,
    /// Person associated with the entry
    #[serde(rename = "Nome")]
    pub nome: String,
    /// Free-text category, e.g. "Mensalidade"
    #[serde(rename = "Categoria")]
    pub categoria: String,
    /// Monetary amount as stored: locale-formatted text ("R$ 1.234,56")
    /// or a plain number
    #[serde(rename = "Valor")]
    pub valor: String,
    /// "Entrada" or "Saída"
    #[serde(rename = "Tipo")]
    pub tipo: String,
    /// "Pago" or "Pendente"
    #[serde(rename = "Status")]
    pub status: String,
    /// Optional free-text note
    #[serde(rename = "Obs", default)]
    pub obs: Option<String>,
}

/// One row of the parameters table (Parametros)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterRecord {
    /// Parameter key, e.g. "Meta_Reserva"
    #[serde(rename = "Parametro")]
    pub parametro: String,
    /// Parameter value as stored
    #[serde(rename = "Valor")]
    pub valor: String,
}

//! CSV reading for the cash-flow and parameters tables
//!
//! Both readers follow the same best-effort policy: a row that fails to
//! deserialize is skipped with a warning, the rest of the table survives.
//! An unreadable table or a header row missing required columns is an
//! error for the whole table.

use crate::error::LoadError;
use crate::records::{FlowRecord, ParameterRecord};

/// Columns the cash-flow table must carry (Obs is optional)
const FLOW_COLUMNS: &[&str] = &["Mes_Ref", "Nome", "Categoria", "Valor", "Tipo", "Status"];

/// Columns the parameters table must carry
const PARAMETER_COLUMNS: &[&str] = &["Parametro", "Valor"];

/// Parse the cash-flow table from CSV text
pub fn parse_flow(content: &str) -> Result<Vec<FlowRecord>, LoadError> {
    parse_table(content, "Fluxo_Caixa", FLOW_COLUMNS)
}

/// Parse the parameters table from CSV text
pub fn parse_parameters(content: &str) -> Result<Vec<ParameterRecord>, LoadError> {
    parse_table(content, "Parametros", PARAMETER_COLUMNS)
}

fn parse_table<T: serde::de::DeserializeOwned>(
    content: &str,
    table: &str,
    required: &[&str],
) -> Result<Vec<T>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    // A missing or unreadable header is fatal for the whole table
    let headers = reader
        .headers()
        .map_err(|e| LoadError::TableError {
            table: table.to_string(),
            message: e.to_string(),
        })?
        .clone();

    // So is a header row that does not name the required columns; without
    // this check a renamed spreadsheet reads as an empty table
    let missing: Vec<&str> = required
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::TableError {
            table: table.to_string(),
            message: format!("missing required column(s): {}", missing.join(", ")),
        });
    }

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(record) => rows.push(record),
            Err(e) => {
                log::warn!("Skipping row {} of {}: {}", index + 2, table, e);
            }
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flow_simple() {
        let input = "Mes_Ref,Nome,Categoria,Valor,Tipo,Status,Obs\n\
Jan/2024,Carlos,Mensalidade,\"R$ 50,00\",Entrada,Pago,\n\
Jan/2024,Campo,Aluguel,\"R$ 30,00\",Saída,Pago,quadra coberta";
        let rows = parse_flow(input).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].nome, "Carlos");
        assert_eq!(rows[0].valor, "R$ 50,00");
        assert_eq!(rows[1].tipo, "Saída");
        assert_eq!(rows[1].obs.as_deref(), Some("quadra coberta"));
    }

    #[test]
    fn test_parse_flow_missing_obs_column() {
        let input = "Mes_Ref,Nome,Categoria,Valor,Tipo,Status\n\
Fev/2024,Rafa,Mensalidade,\"50,00\",Entrada,Pendente";
        let rows = parse_flow(input).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].obs.is_none());
    }

    #[test]
    fn test_parse_flow_skips_short_row() {
        let input = "Mes_Ref,Nome,Categoria,Valor,Tipo,Status,Obs\n\
Jan/2024,Carlos,Mensalidade,\"50,00\",Entrada,Pago,\n\
apenas-um-campo";
        let rows = parse_flow(input).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_parse_flow_rejects_wrong_header() {
        let input = "ColA,ColB\nJan/2024,Carlos";
        let err = parse_flow(input).unwrap_err();
        match err {
            LoadError::TableError { table, message } => {
                assert_eq!(table, "Fluxo_Caixa");
                assert!(message.contains("Mes_Ref"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_parameters_rejects_wrong_header() {
        let input = "Chave,Conteudo\nMeta_Reserva,800";
        assert!(parse_parameters(input).is_err());
    }

    #[test]
    fn test_parse_parameters() {
        let input = "Parametro,Valor\nMeta_Reserva,\"R$ 800,00\"\nOutro,123";
        let rows = parse_parameters(input).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].parametro, "Meta_Reserva");
        assert_eq!(rows[0].valor, "R$ 800,00");
    }

    #[test]
    fn test_parse_empty_table() {
        let rows = parse_flow("Mes_Ref,Nome,Categoria,Valor,Tipo,Status,Obs\n").unwrap();
        assert!(rows.is_empty());
    }
}

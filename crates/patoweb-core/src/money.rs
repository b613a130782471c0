//! Currency normalization
//!
//! Ledger values arrive either as numbers or as Brazilian locale text
//! ("R$ 1.234,56"). Normalization produces a plain f64 magnitude; the sign
//! of an entry comes from its Tipo, never from the stored value.

use serde::{Deserialize, Serialize};

/// A raw monetary value as found in the source tables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// Already numeric
    Number(f64),
    /// Locale-formatted text
    Text(String),
}

/// Parse Brazilian locale currency text into a number
///
/// Accepts an optional leading "R$", thousands separators (`.`) and a `,`
/// decimal separator. Returns `None` when the remainder is not a number;
/// callers decide what the fallback is.
pub fn parse_brl(text: &str) -> Option<f64> {
    let mut s = text.trim();
    if let Some(prefix) = s.get(..2) {
        if prefix.eq_ignore_ascii_case("r$") {
            s = s[2..].trim_start();
        }
    }
    if s.is_empty() {
        return None;
    }

    let cleaned: String = s.chars().filter(|&c| c != '.').collect();
    let cleaned = cleaned.replace(',', ".");
    cleaned.parse::<f64>().ok()
}

/// Normalize a raw value to a non-negative f64 magnitude
///
/// Malformed text degrades to `0.0`; this is the documented best-effort
/// policy and must stay local to the one bad field.
pub fn normalize(raw: &RawAmount) -> f64 {
    let value = match raw {
        RawAmount::Number(n) => *n,
        RawAmount::Text(t) => parse_brl(t).unwrap_or(0.0),
    };
    value.abs()
}

/// Normalize currency text directly (the common CSV case)
pub fn normalize_text(text: &str) -> f64 {
    parse_brl(text).unwrap_or(0.0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_brl_formats() {
        assert_eq!(parse_brl("R$ 1.234,56"), Some(1234.56));
        assert_eq!(parse_brl("1.234,56"), Some(1234.56));
        assert_eq!(parse_brl("50,00"), Some(50.0));
        assert_eq!(parse_brl("  r$ 70 "), Some(70.0));
        assert_eq!(parse_brl("800"), Some(800.0));
    }

    #[test]
    fn test_parse_brl_failures() {
        assert_eq!(parse_brl(""), None);
        assert_eq!(parse_brl("abc"), None);
        assert_eq!(parse_brl("R$ "), None);
    }

    #[test]
    fn test_normalize_defaults_to_zero() {
        assert_eq!(normalize(&RawAmount::Text("".to_string())), 0.0);
        assert_eq!(normalize(&RawAmount::Text("abc".to_string())), 0.0);
        assert_eq!(normalize_text("n/a"), 0.0);
    }

    #[test]
    fn test_normalize_numeric_passthrough() {
        assert_eq!(normalize(&RawAmount::Number(42.5)), 42.5);
    }

    #[test]
    fn test_normalize_strips_sign() {
        // Sign comes from Tipo, not from the stored value
        assert_eq!(normalize(&RawAmount::Number(-30.0)), 30.0);
        assert_eq!(normalize_text("-50,00"), 50.0);
    }
}

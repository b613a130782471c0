//! Utility functions and helpers

/// Format a monetary value as Brazilian currency, e.g. `1234.5` -> `"R$ 1.234,50"`
pub fn format_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            grouped.push('.');
            count = 0;
        }
        grouped.push(c);
        count += 1;
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-R$ {},{:02}", grouped, frac)
    } else {
        format!("R$ {},{:02}", grouped, frac)
    }
}

/// Escape HTML special characters in user-supplied text
pub fn sanitize_html(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Fold Portuguese accented characters to their ASCII equivalents
///
/// Covers the characters that appear in month names and the ledger's
/// Tipo/Status vocabulary (e.g. "Saída" -> "Saida", "Março" -> "Marco").
pub fn fold_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' => 'A',
            'é' | 'ê' => 'e',
            'É' | 'Ê' => 'E',
            'í' => 'i',
            'Í' => 'I',
            'ó' | 'ô' | 'õ' => 'o',
            'Ó' | 'Ô' | 'Õ' => 'O',
            'ú' => 'u',
            'Ú' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            _ => c,
        })
        .collect()
}

/// Generate a short hash (8 characters) from content
pub fn short_hash(content: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let hash = hasher.finish();

    format!("{:016x}", hash)[..8].to_string()
}

//! Month label ordering
//!
//! Month references in the ledger look like "Janeiro/2024" or "Jan/2024".
//! The text before the `/` maps to a sort ordinal 1..=12; unrecognized
//! labels map to 0 and sort first.

use patoweb_utils::fold_accents;

/// Sort ordinal for a month reference label
///
/// Recognizes Portuguese month names, full and 3-letter forms, with or
/// without accents and in any case.
pub fn month_ordinal(label: &str) -> u32 {
    let prefix = label.split('/').next().unwrap_or(label).trim();
    let key = fold_accents(prefix).to_lowercase();

    match key.as_str() {
        "janeiro" | "jan" => 1,
        "fevereiro" | "fev" => 2,
        "marco" | "mar" => 3,
        "abril" | "abr" => 4,
        "maio" | "mai" => 5,
        "junho" | "jun" => 6,
        "julho" | "jul" => 7,
        "agosto" | "ago" => 8,
        "setembro" | "set" => 9,
        "outubro" | "out" => 10,
        "novembro" | "nov" => 11,
        "dezembro" | "dez" => 12,
        _ => 0,
    }
}

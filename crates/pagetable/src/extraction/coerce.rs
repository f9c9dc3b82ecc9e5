//! Per-column type inference for cell text.
//!
//! A column becomes `Bool`, `Int` or `Float` only when every non-missing
//! cell fits; otherwise it stays text, numeric-looking cells included.

use crate::table::CellValue;

/// Cell texts read as missing.
pub const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_VALUES: &[&str] = &["True", "TRUE", "true"];
const FALSE_VALUES: &[&str] = &["False", "FALSE", "false"];

pub fn is_na(s: &str) -> bool {
    NA_VALUES.contains(&s)
}

fn parse_bool(s: &str) -> Option<bool> {
    if TRUE_VALUES.contains(&s) {
        Some(true)
    } else if FALSE_VALUES.contains(&s) {
        Some(false)
    } else {
        None
    }
}

/// Drop `,` thousands separators. A leading or trailing comma disqualifies.
fn strip_thousands(s: &str) -> Option<String> {
    if s.starts_with(',') || s.ends_with(',') {
        return None;
    }
    Some(s.replace(',', ""))
}

pub fn parse_int(s: &str) -> Option<i64> {
    strip_thousands(s)?.parse::<i64>().ok()
}

/// Finite decimal numbers only: `inf`, `nan`, overflowing exponents and
/// other words are rejected.
pub fn parse_float(s: &str) -> Option<f64> {
    let cleaned = strip_thousands(s)?;
    let plain = cleaned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !plain || !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|f| f.is_finite())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Bool,
    Int,
    Float,
    Text,
}

fn column_kind(present: &[&str]) -> Kind {
    if present.is_empty() {
        Kind::Text
    } else if present.iter().all(|s| parse_bool(s).is_some()) {
        Kind::Bool
    } else if present.iter().all(|s| parse_int(s).is_some()) {
        Kind::Int
    } else if present.iter().all(|s| parse_float(s).is_some()) {
        Kind::Float
    } else {
        Kind::Text
    }
}

/// Type one column. `None` marks a padded (absent) cell and always becomes `Null`.
pub fn infer_column(cells: &[Option<&str>]) -> Vec<CellValue> {
    let present: Vec<&str> = cells.iter().flatten().copied().filter(|s| !is_na(s)).collect();
    let kind = column_kind(&present);

    cells
        .iter()
        .map(|cell| match cell {
            None => CellValue::Null,
            Some(s) if is_na(s) => CellValue::Null,
            Some(s) => match kind {
                Kind::Bool => parse_bool(s).map(CellValue::Bool).unwrap_or(CellValue::Null),
                Kind::Int => parse_int(s).map(CellValue::Int).unwrap_or(CellValue::Null),
                Kind::Float => parse_float(s).map(CellValue::Float).unwrap_or(CellValue::Null),
                Kind::Text => CellValue::Text((*s).to_string()),
            },
        })
        .collect()
}

//! Per-field coercion rules. Every function here is total: bad input
//! falls back to a default instead of failing.

use crate::domain::model::Cell;

/// Outcome of a coercion, remembering whether the fallback was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coerced<T> {
    Parsed(T),
    Defaulted(T),
}

impl<T> Coerced<T> {
    pub fn is_defaulted(&self) -> bool {
        matches!(self, Coerced::Defaulted(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Coerced::Parsed(value) | Coerced::Defaulted(value) => value,
        }
    }
}

pub fn parse_or_default<T>(parsed: Option<T>, fallback: T) -> Coerced<T> {
    match parsed {
        Some(value) => Coerced::Parsed(value),
        None => Coerced::Defaulted(fallback),
    }
}

/// Splits `"<apellido>, <nombre>"` on the first comma.
/// Returns `(apellido, nombre)`; `nombre` is empty when there is no comma.
pub fn split_name(cell: &Cell) -> (String, String) {
    if cell.is_missing() {
        return (String::new(), String::new());
    }

    let text = cell.to_text();
    let text = text.trim();
    match text.split_once(',') {
        Some((apellido, nombre)) => (apellido.trim().to_string(), nombre.trim().to_string()),
        None => (text.to_string(), String::new()),
    }
}

fn whole_number(value: f64) -> Option<u64> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    // 2^64 is the first value that no longer fits.
    if truncated < 0.0 || truncated >= 18_446_744_073_709_551_616.0 {
        return None;
    }
    Some(truncated as u64)
}

fn dni_number(cell: &Cell) -> Option<u64> {
    match cell {
        Cell::Empty => None,
        Cell::Int(i) => u64::try_from(*i).ok(),
        Cell::Number(n) => whole_number(*n),
        Cell::Bool(b) => Some(u64::from(*b)),
        Cell::Text(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
        }
    }
}

/// National ID as a plain digit string. Anything that does not read as a
/// non-negative number becomes `"0"`.
pub fn coerce_dni(cell: &Cell) -> Coerced<String> {
    match parse_or_default(dni_number(cell), 0) {
        Coerced::Parsed(n) => Coerced::Parsed(n.to_string()),
        Coerced::Defaulted(n) => Coerced::Defaulted(n.to_string()),
    }
}

pub fn normalize_email(cell: &Cell) -> String {
    if cell.is_missing() {
        return String::new();
    }
    cell.to_text().trim().to_lowercase()
}

/// Keeps the digits, drops leading zeros and makes sure a non-empty
/// result starts with `1`.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.trim_start_matches('0');

    if digits.is_empty() || digits.starts_with('1') {
        digits.to_string()
    } else {
        format!("1{}", digits)
    }
}

pub fn passthrough_phone(cell: &Cell) -> String {
    cell.to_text().trim().to_string()
}

use crate::domain::model::Table;
use crate::utils::error::{ConvertError, Result};

pub const NAME_COLUMN: &str = "Nombre y apellido";
pub const DNI_COLUMN: &str = "DNI";

/// Checked in order; the first exact match wins.
pub const EMAIL_COLUMNS: [&str; 2] = ["Email", "email"];

/// Substrings matched against lower-cased headers.
pub const PHONE_COLUMN_HINTS: [&str; 4] = ["telefono", "teléfono", "celular", "phone"];

pub const PASSTHROUGH_PHONE_COLUMN: &str = "telefono";

pub fn require_column(table: &Table, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| ConvertError::SchemaError {
            column: name.to_string(),
        })
}

pub fn find_email_column(headers: &[String]) -> Option<usize> {
    EMAIL_COLUMNS
        .iter()
        .find_map(|candidate| headers.iter().position(|h| h == candidate))
}

/// First header, in sheet order, whose lower-cased name contains one of
/// the phone hints.
pub fn find_phone_column(headers: &[String]) -> Option<usize> {
    headers.iter().position(|header| {
        let lowered = header.to_lowercase();
        PHONE_COLUMN_HINTS
            .iter()
            .any(|hint| lowered.contains(hint))
    })
}

pub fn find_passthrough_phone_column(headers: &[String]) -> Option<usize> {
    headers.iter().position(|h| h == PASSTHROUGH_PHONE_COLUMN)
}

use crate::domain::model::{Cell, Table};
use crate::utils::error::{ConvertError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::collections::HashMap;
use std::io::Cursor;

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Int(*i),
            Data::Bool(b) => Cell::Bool(*b),
            other => Cell::Text(other.to_string()),
        }
    }
}

/// Reads the first worksheet of an `.xlsx`/`.xls`/`.xlsm`/`.ods` workbook.
/// The first row of the used range is the header row.
pub fn load_table(bytes: &[u8]) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ConvertError::EmptyWorkbookError)??;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => normalize_headers(header_row.iter().map(Cell::from).collect()),
        None => Vec::new(),
    };
    let rows: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();

    tracing::debug!(
        "Loaded sheet with {} columns and {} data rows",
        headers.len(),
        rows.len()
    );
    Ok(Table::new(headers, rows))
}

/// Blank header cells become `Unnamed: <index>` and repeated names get a
/// `.1`, `.2`, ... suffix so every column stays addressable by name.
pub fn normalize_headers(cells: Vec<Cell>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::with_capacity(cells.len());

    for (index, cell) in cells.iter().enumerate() {
        let name = if cell.is_missing() {
            format!("Unnamed: {}", index)
        } else {
            cell.to_text()
        };

        let unique = match seen.get(&name).copied() {
            None => name.clone(),
            Some(mut next) => {
                let mut candidate = format!("{}.{}", name, next);
                while seen.contains_key(&candidate) {
                    next += 1;
                    candidate = format!("{}.{}", name, next);
                }
                seen.insert(name.clone(), next + 1);
                candidate
            }
        };

        seen.entry(unique.clone()).or_insert(1);
        headers.push(unique);
    }

    headers
}

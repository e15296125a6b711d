use crate::core::coerce;
use crate::core::columns;
use crate::domain::model::{
    ContactRecord, EmptyRowPolicy, NormalizeOptions, NormalizeStats, OutputTable, PhonePolicy,
    Table,
};
use crate::utils::error::Result;

/// Maps an uploaded table onto the fixed five-column contact layout.
///
/// Fails with `SchemaError` before touching any row when `Nombre y apellido`
/// or `DNI` is missing. Everything else is defaulted per cell.
pub fn normalize(table: &Table, options: &NormalizeOptions) -> Result<OutputTable> {
    let name_idx = columns::require_column(table, columns::NAME_COLUMN)?;
    let dni_idx = columns::require_column(table, columns::DNI_COLUMN)?;

    let email_idx = columns::find_email_column(&table.headers);
    let phone_idx = match options.phone_policy {
        PhonePolicy::DetectAndNormalize => columns::find_phone_column(&table.headers),
        PhonePolicy::PassthroughOnly => columns::find_passthrough_phone_column(&table.headers),
    };

    let mut stats = NormalizeStats {
        rows_in: table.row_count(),
        email_column: email_idx.map(|i| table.headers[i].clone()),
        phone_column: phone_idx.map(|i| table.headers[i].clone()),
        ..NormalizeStats::default()
    };

    match &stats.phone_column {
        Some(column) => tracing::debug!("Using '{}' as phone column", column),
        None => tracing::debug!("No phone column found, telefono left empty"),
    }

    let mut records = Vec::with_capacity(table.row_count());
    for (row_number, row) in table.rows.iter().enumerate() {
        let (apellido, nombre) = coerce::split_name(table.cell(row, name_idx));

        let dni_cell = table.cell(row, dni_idx);
        let dni = coerce::coerce_dni(dni_cell);
        if dni.is_defaulted() {
            stats.defaulted_dni += 1;
            tracing::debug!("Row {}: DNI {:?} defaulted to 0", row_number + 1, dni_cell);
        }
        let dni = dni.into_inner();

        let email = email_idx
            .map(|i| coerce::normalize_email(table.cell(row, i)))
            .unwrap_or_default();

        let telefono = match (options.phone_policy, phone_idx) {
            (_, None) => String::new(),
            (PhonePolicy::DetectAndNormalize, Some(i)) => {
                coerce::normalize_phone(&table.cell(row, i).to_text())
            }
            (PhonePolicy::PassthroughOnly, Some(i)) => coerce::passthrough_phone(table.cell(row, i)),
        };

        let dni_empty = match options.empty_row_policy {
            EmptyRowPolicy::PostDefault => dni.is_empty(),
            EmptyRowPolicy::PreDefault => dni_cell.is_missing(),
        };
        if nombre.is_empty() && apellido.is_empty() && dni_empty {
            stats.dropped_rows += 1;
            tracing::debug!("Row {}: no name and no DNI, dropped", row_number + 1);
            continue;
        }

        records.push(ContactRecord {
            nombre,
            apellido,
            dni,
            email,
            telefono,
        });
    }

    stats.rows_out = records.len();
    tracing::info!(
        "🔧 Normalized {} of {} rows ({} dropped, {} DNI defaulted)",
        stats.rows_out,
        stats.rows_in,
        stats.dropped_rows,
        stats.defaulted_dni
    );

    Ok(OutputTable { records, stats })
}

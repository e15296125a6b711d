use crate::domain::model::{ContactRecord, OutputFormat, RenderedFile, OUTPUT_COLUMNS};
use crate::utils::error::{ConvertError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub fn render(records: &[ContactRecord], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => write_delimited(records, b','),
        OutputFormat::Tsv => write_delimited(records, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(records)?),
    }
}

/// Header row first, then one line per record; fields holding the
/// delimiter, a quote or a newline are quoted.
fn write_delimited(records: &[ContactRecord], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        writer.write_record(record.fields())?;
    }

    writer
        .into_inner()
        .map_err(|e| ConvertError::IoError(e.into_error()))
}

pub fn bundle_zip(files: &[RenderedFile]) -> Result<Vec<u8>> {
    tracing::debug!("Creating ZIP file with {} files", files.len());

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for file in files {
        zip.start_file::<_, ()>(file.filename.as_str(), FileOptions::default())?;
        zip.write_all(&file.data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

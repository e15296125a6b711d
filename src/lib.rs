pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::toml_config::TomlConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::core::{etl::ConvertEngine, normalize::normalize, pipeline::SpreadsheetPipeline};
pub use crate::domain::model::{
    ContactRecord, EmptyRowPolicy, NormalizeOptions, OutputFormat, OutputTable, PhonePolicy, Table,
};
pub use crate::utils::error::{ConvertError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub normalize: NormalizeOptions,
    pub format: OutputFormat,
}

/// Workbook bytes in, export bytes out (CSV unless `options.format` says
/// otherwise). Nothing is produced when a required column is missing.
pub fn convert(file_bytes: &[u8], options: &ConvertOptions) -> Result<Vec<u8>> {
    let table = crate::adapters::loader::load_table(file_bytes)?;
    let output = normalize(&table, &options.normalize)?;
    crate::adapters::sink::render(&output.records, options.format)
}

pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{EmptyRowPolicy, NormalizeOptions, OutputFormat, PhonePolicy};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate, INPUT_EXTENSIONS, MAX_PREVIEW_ROWS};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// File stem used for every export unless overridden.
pub const DEFAULT_OUTPUT_NAME: &str = "datos_fotografo";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "contact-normalizer")]
#[command(about = "Convert a contacts spreadsheet into a nombre,apellido,dni,email,telefono export")]
pub struct CliConfig {
    /// Workbook to convert (.xlsx, .xls, .xlsm or .ods)
    #[arg(required_unless_present = "config")]
    pub input: Option<String>,

    #[arg(long, help = "TOML configuration file; replaces the output and normalization flags")]
    pub config: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_NAME, help = "File stem of the exports")]
    pub output_name: String,

    #[arg(long = "format", value_enum, value_delimiter = ',', default_value = "csv")]
    pub formats: Vec<OutputFormat>,

    #[arg(long, help = "Bundle every export into this zip archive")]
    pub zip: Option<String>,

    #[arg(long, value_enum, default_value_t = PhonePolicy::DetectAndNormalize)]
    pub phone_policy: PhonePolicy,

    #[arg(long, value_enum, default_value_t = EmptyRowPolicy::PostDefault)]
    pub empty_row_policy: EmptyRowPolicy,

    #[arg(long, default_value = "0", help = "Print the first N normalized rows")]
    pub preview: usize,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        self.input.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    fn output_filename(&self, format: OutputFormat) -> String {
        format!("{}.{}", self.output_name, format.extension())
    }

    fn compression_filename(&self) -> Option<&str> {
        self.zip.as_deref()
    }

    fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            phone_policy: self.phone_policy,
            empty_row_policy: self.empty_row_policy,
        }
    }

    fn preview_rows(&self) -> usize {
        self.preview
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let input = validation::validate_required_field("input", &self.input)?;
        validation::validate_path("input", input)?;
        validation::validate_file_extension("input", input, &INPUT_EXTENSIONS)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_file_name("output_name", &self.output_name)?;
        validation::validate_non_empty_list("format", &self.formats)?;
        if let Some(zip) = &self.zip {
            validation::validate_file_name("zip", zip)?;
        }
        validation::validate_range("preview", self.preview, 0, MAX_PREVIEW_ROWS)?;
        Ok(())
    }
}

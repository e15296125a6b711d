use crate::config::DEFAULT_OUTPUT_NAME;
use crate::core::ConfigProvider;
use crate::domain::model::{NormalizeOptions, OutputFormat};
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{self, Validate, INPUT_EXTENSIONS, MAX_PREVIEW_ROWS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub normalize: NormalizeOptions,
    pub load: LoadConfig,
    pub preview: Option<PreviewConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<OutputFormat>,
    pub filenames: Option<FilenameConfig>,
    pub compression: Option<CompressionConfig>,
}

fn default_output_formats() -> Vec<OutputFormat> {
    vec![OutputFormat::Csv]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub csv: Option<String>,
    pub tsv: Option<String>,
    pub json: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    pub rows: usize,
}

impl TomlConfig {
    /// Loads a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConvertError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ConvertError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables
    /// are left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConvertError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Input given on the command line wins over `source.path`.
    pub fn with_input(mut self, input: Option<&str>) -> Self {
        if let Some(path) = input {
            self.source.path = path.to_string();
        }
        self
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("source.path", &self.source.path)?;
        validation::validate_file_extension("source.path", &self.source.path, &INPUT_EXTENSIONS)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_non_empty_list("load.output_formats", &self.load.output_formats)?;

        for format in &self.load.output_formats {
            validation::validate_file_name("load.filenames", &self.output_filename(*format))?;
        }

        if let Some(compression) = &self.load.compression {
            if compression.enabled {
                validation::validate_file_name("load.compression.filename", &compression.filename)?;
            }
        }

        validation::validate_range("preview.rows", self.preview_rows(), 0, MAX_PREVIEW_ROWS)?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.load.output_formats
    }

    fn output_filename(&self, format: OutputFormat) -> String {
        let configured = self.load.filenames.as_ref().and_then(|names| match format {
            OutputFormat::Csv => names.csv.clone(),
            OutputFormat::Tsv => names.tsv.clone(),
            OutputFormat::Json => names.json.clone(),
        });
        configured.unwrap_or_else(|| format!("{}.{}", DEFAULT_OUTPUT_NAME, format.extension()))
    }

    fn compression_filename(&self) -> Option<&str> {
        self.load
            .compression
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.filename.as_str())
    }

    fn normalize_options(&self) -> NormalizeOptions {
        self.normalize
    }

    fn preview_rows(&self) -> usize {
        self.preview.as_ref().map(|p| p.rows).unwrap_or(0)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

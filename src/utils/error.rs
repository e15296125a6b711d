use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Missing required column '{column}'")]
    SchemaError { column: String },

    #[error("Spreadsheet could not be read: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("Workbook contains no worksheets")]
    EmptyWorkbookError,

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Schema,
    Input,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::SchemaError { .. } => ErrorCategory::Schema,
            ConvertError::SpreadsheetError(_) | ConvertError::EmptyWorkbookError => {
                ErrorCategory::Input
            }
            ConvertError::ZipError(_)
            | ConvertError::CsvError(_)
            | ConvertError::IoError(_)
            | ConvertError::SerializationError(_) => ErrorCategory::Output,
            ConvertError::ConfigError { .. }
            | ConvertError::ConfigValidationError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Schema | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ConvertError::SchemaError { column } => format!(
                "Add a header cell named exactly '{}' to the first sheet and upload the file again",
                column
            ),
            ConvertError::SpreadsheetError(_) | ConvertError::EmptyWorkbookError => {
                "Check that the file is a valid .xlsx or .xls workbook and re-upload it".to_string()
            }
            ConvertError::IoError(_) => {
                "Check that the paths exist and are readable/writable".to_string()
            }
            ConvertError::ZipError(_)
            | ConvertError::CsvError(_)
            | ConvertError::SerializationError(_) => {
                "Retry the export; if it keeps failing, report the input file".to_string()
            }
            ConvertError::ConfigError { .. }
            | ConvertError::ConfigValidationError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::MissingConfigError { .. } => {
                "Review the command line flags or the TOML configuration file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::SchemaError { column } => {
                format!("Column '{}' was not found in the spreadsheet", column)
            }
            ConvertError::SpreadsheetError(e) => {
                format!("The uploaded file could not be processed: {}", e)
            }
            ConvertError::EmptyWorkbookError => "The uploaded workbook has no sheets".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

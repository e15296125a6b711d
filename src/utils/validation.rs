use crate::utils::error::{ConvertError, Result};
use std::collections::HashSet;

/// Workbook extensions the input loader can open.
pub const INPUT_EXTENSIONS: [&str; 4] = ["xlsx", "xls", "xlsm", "ods"];

pub const MAX_PREVIEW_ROWS: usize = 1000;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) => {
            if allowed_set.contains(extension.to_ascii_lowercase().as_str()) {
                Ok(())
            } else {
                Err(ConvertError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.to_string(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                })
            }
        }
        None => Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

/// Plain file name: no directory components.
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Must be a file name without directories".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ConvertError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(ConvertError::ConfigValidationError {
            field: field_name.to_string(),
            message: "At least one value is required".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "./output").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("input", "alumnos.xlsx", &INPUT_EXTENSIONS).is_ok());
        assert!(validate_file_extension("input", "ALUMNOS.XLS", &INPUT_EXTENSIONS).is_ok());
        assert!(validate_file_extension("input", "alumnos.csv", &INPUT_EXTENSIONS).is_err());
        assert!(validate_file_extension("input", "alumnos", &INPUT_EXTENSIONS).is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("output_name", "datos_fotografo").is_ok());
        assert!(validate_file_name("output_name", "../datos").is_err());
        assert!(validate_file_name("output_name", "  ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("preview", 10, 0, MAX_PREVIEW_ROWS).is_ok());
        assert!(validate_range("preview", 5000, 0, MAX_PREVIEW_ROWS).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("x".to_string());
        let absent: Option<String> = None;
        assert!(validate_required_field("source.path", &present).is_ok());
        assert!(matches!(
            validate_required_field("source.path", &absent),
            Err(ConvertError::MissingConfigError { .. })
        ));
    }
}

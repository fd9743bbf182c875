//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::FieldConfig;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Schema validation failed: {0}")]
    SchemaError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SchemaError(_) => 62,
            ValidationError::SemanticError(_) => 63,
            ValidationError::MissingField(_) => 64,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate a field configuration semantically.
///
/// Checks the schema version, rejects empty field names, and requires every
/// category name to resolve. All unknown category names are reported in a
/// single error.
pub fn validate_fields(config: &FieldConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    if config.fields.keys().any(|name| name.is_empty()) {
        return Err(ValidationError::SemanticError(
            "field names must not be empty".to_string(),
        ));
    }

    let unknown: Vec<String> = config
        .fields
        .iter()
        .filter(|(_, type_name)| dm_mask::SensitiveType::by_name_ignore_case(type_name).is_none())
        .map(|(field, type_name)| format!("{}={}", field, type_name))
        .collect();

    if !unknown.is_empty() {
        let known: Vec<&str> = dm_mask::SensitiveType::VARIANTS
            .iter()
            .map(|t| t.name())
            .collect();
        return Err(ValidationError::InvalidValue {
            field: "fields".to_string(),
            message: format!(
                "unknown sensitive type(s) {} (expected one of {})",
                unknown.join(", "),
                known.join(", ")
            ),
        });
    }

    Ok(())
}

//! Sensitive field file (fields.json).
//!
//! Maps field names to sensitive type names:
//!
//! ```json
//! {
//!   "schema_version": "1.0.0",
//!   "mode": "replace",
//!   "fields": { "name": "CHINESE_NAME", "mobile": "mobile_phone" }
//! }
//! ```
//!
//! Type names are matched ignoring case.

use crate::validate::{validate_fields, ValidationError, ValidationResult};
use dm_mask::{SensitiveInfoRegistry, SensitiveType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// How a field file is applied to an existing registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Drop existing entries first.
    #[default]
    Replace,
    /// Keep existing entries; file entries win on conflict.
    Merge,
}

impl std::fmt::Display for LoadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadMode::Replace => write!(f, "replace"),
            LoadMode::Merge => write!(f, "merge"),
        }
    }
}

/// Sensitive field configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// How to apply the fields to a registry.
    #[serde(default)]
    pub mode: LoadMode,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Field name → sensitive type name.
    pub fields: BTreeMap<String, String>,
}

fn default_schema_version() -> String {
    crate::CONFIG_SCHEMA_VERSION.to_string()
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            mode: LoadMode::default(),
            description: None,
            fields: BTreeMap::new(),
        }
    }
}

impl FieldConfig {
    /// Load a field configuration from a JSON file.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse_json(&content)
    }

    /// Parse a field configuration from a JSON string.
    pub fn parse_json(json: &str) -> ValidationResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))?;

        let object = value.as_object().ok_or_else(|| {
            ValidationError::SchemaError("top-level value must be an object".to_string())
        })?;
        if !object.contains_key("fields") {
            return Err(ValidationError::MissingField("fields".to_string()));
        }

        serde_json::from_value(value)
            .map_err(|e| ValidationError::ParseError(format!("Invalid field config: {}", e)))
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Build a config from already-typed fields.
    pub fn from_types<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, SensitiveType)>,
        K: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, t)| (k.into(), t.name().to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// Validate and resolve every type name.
    pub fn resolve_types(&self) -> ValidationResult<HashMap<String, SensitiveType>> {
        validate_fields(self)?;

        let mut resolved = HashMap::with_capacity(self.fields.len());
        for (field, type_name) in &self.fields {
            let sensitive_type = SensitiveType::by_name_ignore_case(type_name).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: field.clone(),
                    message: format!("unknown sensitive type {}", type_name),
                }
            })?;
            resolved.insert(field.clone(), sensitive_type);
        }
        Ok(resolved)
    }

    /// Apply this configuration to `registry` according to [`LoadMode`].
    ///
    /// Nothing is written unless every entry resolves. Returns the number of
    /// fields applied.
    pub fn apply_to(&self, registry: &SensitiveInfoRegistry) -> ValidationResult<usize> {
        let resolved = self.resolve_types()?;
        let count = resolved.len();
        match self.mode {
            LoadMode::Replace => registry.replace_all(resolved),
            LoadMode::Merge => registry.put_all(resolved),
        }
        Ok(count)
    }

    /// Number of fields per sensitive type name (canonical spelling).
    pub fn type_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for type_name in self.fields.values() {
            let key = SensitiveType::by_name_ignore_case(type_name)
                .map(|t| t.name().to_string())
                .unwrap_or_else(|| type_name.clone());
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }
}

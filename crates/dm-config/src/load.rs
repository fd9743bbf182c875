//! One-step loading of a fields file into a registry.

use crate::resolve::resolve_config;
use crate::validate::{ValidationError, ValidationResult};
use crate::{ConfigSnapshot, FieldConfig};
use dm_mask::SensitiveInfoRegistry;
use std::path::Path;
use tracing::{info, warn};

/// Resolve, parse, validate and apply the fields file to `registry`.
///
/// When no file is found the registry is left untouched and a defaults-only
/// snapshot is returned. On any error the registry is also left untouched.
pub fn load_registry(
    cli_fields: Option<&Path>,
    registry: &SensitiveInfoRegistry,
) -> ValidationResult<ConfigSnapshot> {
    let paths = resolve_config(cli_fields);

    let Some(path) = paths.fields.as_deref() else {
        warn!("No fields config found; registry left unchanged");
        return Ok(ConfigSnapshot::defaults_only());
    };

    let content = std::fs::read_to_string(path).map_err(|e| {
        ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let config = FieldConfig::parse_json(&content)?;
    let applied = config.apply_to(registry)?;

    info!(
        path = %path.display(),
        source = %paths.fields_source,
        mode = %config.mode,
        fields = applied,
        "Loaded sensitive fields"
    );

    Ok(ConfigSnapshot::new(&config, &paths, &content))
}

//! Configuration snapshots for auditing what a registry was loaded from.
//!
//! A snapshot captures the exact field configuration applied to a registry,
//! so masked output can later be traced back to the rules that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::resolve::{ConfigPaths, ConfigSource};
use crate::{FieldConfig, LoadMode};

/// A frozen snapshot of configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Schema version of the configuration.
    pub schema_version: String,

    /// SHA-256 hash of the fields JSON content.
    #[serde(default)]
    pub fields_hash: Option<String>,

    /// Path where fields were loaded from.
    #[serde(default)]
    pub fields_path: Option<String>,

    /// Source of fields configuration.
    pub fields_source: String,

    /// How the fields were applied.
    pub mode: LoadMode,

    /// Number of fields applied.
    pub field_count: usize,

    /// Number of fields per sensitive type.
    #[serde(default)]
    pub type_counts: BTreeMap<String, usize>,
}

impl ConfigSnapshot {
    /// Create a new snapshot from a loaded configuration.
    pub fn new(config: &FieldConfig, paths: &ConfigPaths, fields_json: &str) -> Self {
        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: config.schema_version.clone(),
            fields_hash: Some(hash_content(fields_json)),
            fields_path: paths.fields.as_ref().map(|p| p.display().to_string()),
            fields_source: paths.fields_source.to_string(),
            mode: config.mode,
            field_count: config.fields.len(),
            type_counts: config.type_counts(),
        }
    }

    /// Create a snapshot with only defaults (no config file loaded).
    pub fn defaults_only() -> Self {
        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            fields_hash: None,
            fields_path: None,
            fields_source: ConfigSource::BuiltinDefault.to_string(),
            mode: LoadMode::default(),
            field_count: 0,
            type_counts: BTreeMap::new(),
        }
    }

    /// Serialize snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Hash used for comparison; `none` when nothing was loaded.
    fn content_hash(&self) -> &str {
        self.fields_hash.as_deref().unwrap_or("none")
    }

    /// Check if this snapshot matches another (same config content).
    pub fn matches(&self, other: &ConfigSnapshot) -> bool {
        self.content_hash() == other.content_hash()
    }

    /// Get a short identifier for this snapshot (first 12 chars of hash).
    pub fn short_id(&self) -> &str {
        let hash = self.content_hash();
        &hash[..12.min(hash.len())]
    }
}

/// Hash content with SHA-256 and return hex string.
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

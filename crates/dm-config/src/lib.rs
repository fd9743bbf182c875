//! Sensitive field configuration for datamask.
//!
//! This crate provides:
//! - Typed Rust structs for fields.json
//! - Config resolution (CLI → env → XDG → system → defaults)
//! - Semantic validation of category names
//! - Config snapshots recording what was loaded into a registry

pub mod fields;
pub mod load;
pub mod resolve;
pub mod snapshot;
pub mod validate;

pub use fields::{FieldConfig, LoadMode};
pub use load::load_registry;
pub use resolve::{resolve_config, ConfigPaths, ConfigSource};
pub use snapshot::ConfigSnapshot;
pub use validate::{validate_fields, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

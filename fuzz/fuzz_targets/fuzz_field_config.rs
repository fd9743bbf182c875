//! Fuzz target for fields.json configuration parsing.
//!
//! Tests that parsing and resolving a field configuration handles arbitrary
//! input without panicking, and that a failed resolve never touches the
//! registry.

#![no_main]

use dm_config::FieldConfig;
use dm_mask::SensitiveInfoRegistry;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(config) = FieldConfig::parse_json(json) {
        let registry = SensitiveInfoRegistry::new();
        if config.apply_to(&registry).is_err() {
            assert!(registry.is_empty());
        }
    }
});

//! Fuzz target for the single-pass value masker.
//!
//! Tests that `mask` handles arbitrary (often malformed) JSON-like text
//! without panicking, and that text without quotes is copied unchanged.

#![no_main]

use dm_mask::{mask, SensitiveInfoRegistry, SensitiveType};
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

static REGISTRY: Lazy<SensitiveInfoRegistry> = Lazy::new(|| {
    SensitiveInfoRegistry::from_fields(
        SensitiveType::VARIANTS
            .iter()
            .map(|t| (t.name().to_lowercase(), *t)),
    )
});

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let out = mask(text, &*REGISTRY);
    if !text.contains('"') {
        assert_eq!(out, text);
    }
});

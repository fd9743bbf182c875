//! Sensitive field masking for JSON-like text.
//!
//! This crate masks the values of registered fields inside serialized records
//! (log lines, request/response bodies, audit payloads) without parsing them
//! into a tree. Everything that is not a masked value is copied through
//! byte-for-byte: braces, keys, whitespace, unregistered values and nesting.
//!
//! # Key Features
//!
//! - **Single pass**: a flat state machine walks the input once, with no
//!   recursion and no parse stack, so nesting depth never grows the call stack.
//! - **Field-driven**: each `"key":value` pair is looked up in a
//!   [`FieldTypeRegistry`]; only registered keys are masked.
//! - **Fixed rule set**: every [`SensitiveType`] maps to exactly one masking
//!   rule with fixed prefix/suffix arithmetic.
//! - **Best effort**: malformed input never fails; it degrades to partial or
//!   pass-through output.
//!
//! # Example
//!
//! ```
//! use dm_mask::{mask, SensitiveInfoRegistry, SensitiveType};
//!
//! let registry = SensitiveInfoRegistry::new();
//! registry.put("mobile", SensitiveType::MobilePhone);
//!
//! let masked = mask(r#"{"mobile":"13800138000","age":30}"#, &registry);
//! assert_eq!(masked, r#"{"mobile":"138******8000","age":30}"#);
//! ```

pub mod convert;
pub mod error;
pub mod registry;
pub mod replacer;
pub mod sensitive_type;

pub use convert::{convert_msg, FULL_MASK};
pub use error::{MaskError, Result};
pub use registry::{global, FieldTypeRegistry, SensitiveInfoRegistry};
pub use replacer::{mask, mask_opt};
pub use sensitive_type::SensitiveType;

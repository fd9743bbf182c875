//! Error types for the masking engine.
//!
//! Masking itself never fails; errors only arise at the configuration
//! boundary, when a category is named by string.

use thiserror::Error;

/// Result type for masking operations.
pub type Result<T> = std::result::Result<T, MaskError>;

/// Errors that can occur around the masking engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// A category name did not match any known sensitive type.
    #[error("unknown sensitive type: {0}")]
    UnknownSensitiveType(String),
}

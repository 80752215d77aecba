//! Error types for the sessionseek crate.

use thiserror::Error;

/// Errors reported by strict lookups and constraint validation.
///
/// Comparison and filtering never fail; these only surface when a caller
/// explicitly asks for a checked result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionSeekError {
    /// A property exists but holds a different kind of value.
    #[error("type mismatch for '{key}': expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// No property with the given name exists in the store.
    #[error("property '{0}' not found")]
    KeyNotFound(String),

    /// Comparator is not valid for the given value kind.
    #[error("comparator '{op}' is not supported for {kind} values")]
    UnsupportedOperation {
        op: &'static str,
        kind: &'static str,
    },

    /// Comparator text could not be parsed.
    #[error("invalid comparator: {0}")]
    InvalidComparator(String),
}

/// Result type for sessionseek operations.
pub type Result<T> = std::result::Result<T, SessionSeekError>;

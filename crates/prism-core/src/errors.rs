//! Cross-cutting error types for Prism.
//!
//! Domain-specific errors (e.g., `PipelineError`, `RegistryError`) are defined
//! in their respective crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Prism crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A textual value did not name a known variant of an enum.
    #[error("Unknown {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    /// A range was constructed with `min > max`.
    #[error("Invalid range for {field}: min {min} is greater than max {max}")]
    InvalidRange {
        field: &'static str,
        min: String,
        max: String,
    },

    /// A known field was used as a sort key but has no total order.
    #[error("Field '{0}' cannot be used as a sort key")]
    NotSortable(String),

    /// Data failed validation (format, constraints, uniqueness).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The entry file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry data could not be parsed.
    #[error("Malformed entry data: {0}")]
    Parse(#[from] serde_json::Error),
}

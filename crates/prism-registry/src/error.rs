//! Registry error types.

use prism_core::enums::ViewCategory;
use thiserror::Error;

/// Errors from the view registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No descriptor is registered under the requested key.
    #[error("No {category} view registered with id {id}")]
    NotFound { category: ViewCategory, id: u32 },
}

use std::time::Duration;

use prism_core::enums::ViewCategory;

/// Why a variant implementation could not be obtained.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("no implementation for {category} view {id}")]
    Missing { category: ViewCategory, id: u32 },

    #[error("load did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("loader panicked: {0}")]
    Panicked(String),

    #[error("load failed: {0}")]
    Failed(String),
}

/// Why a mounted variant failed to produce output.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("render failed: {0}")]
    Failed(String),

    #[error("render panicked: {0}")]
    Panicked(String),
}

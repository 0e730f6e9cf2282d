//! Initial view selection.

use prism_core::enums::ViewCategory;
use serde::{Deserialize, Serialize};

const fn default_category() -> ViewCategory {
    ViewCategory::Entry
}

const fn default_variant() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewConfig {
    /// Category mounted when no persisted state exists.
    #[serde(default = "default_category")]
    pub category: ViewCategory,

    /// Variant id mounted when no persisted state exists.
    #[serde(default = "default_variant")]
    pub variant: u32,

    /// Whether the picker lists experimental variants.
    #[serde(default)]
    pub include_experimental: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            category: default_category(),
            variant: default_variant(),
            include_experimental: false,
        }
    }
}

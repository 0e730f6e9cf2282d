use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ViewCategory;

/// Registry metadata describing a rendering strategy without loading it.
///
/// `id` is unique within a `category` only; the registry keys descriptors by
/// `(category, id)`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewDescriptor {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub category: ViewCategory,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub is_experimental: bool,
}

impl ViewDescriptor {
    #[must_use]
    pub fn new(
        category: ViewCategory,
        id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            category,
            tags: BTreeSet::new(),
            is_experimental: false,
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn experimental(mut self) -> Self {
        self.is_experimental = true;
        self
    }

    /// Registry key.
    #[must_use]
    pub const fn key(&self) -> (ViewCategory, u32) {
        (self.category, self.id)
    }
}

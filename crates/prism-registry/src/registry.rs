//! Central view registry.
//!
//! Descriptors are keyed by `(category, id)`. Registration is idempotent and
//! follows a last-write-wins policy on collisions; a collision with a
//! *different* descriptor is logged so accidental duplicate ids are visible.

use std::collections::{BTreeMap, BTreeSet};

use prism_core::entities::ViewDescriptor;
use prism_core::enums::ViewCategory;

use crate::error::RegistryError;

/// What a call to [`ViewRegistry::register`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The key was new.
    Inserted,
    /// An identical descriptor was already present; nothing changed.
    Unchanged,
    /// A different descriptor held the key and was overwritten.
    Replaced,
}

/// Catalog of all view descriptors.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    descriptors: BTreeMap<(ViewCategory, u32), ViewDescriptor>,
    bootstrapped: BTreeSet<ViewCategory>,
}

impl ViewRegistry {
    /// An empty registry. Use [`Self::bootstrap`] for one populated with
    /// every built-in category.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with all three categories registered.
    #[must_use]
    pub fn bootstrap() -> Self {
        let mut registry = Self::new();
        crate::catalog::ensure_all_views_registered(&mut registry);
        registry
    }

    /// Insert or replace the descriptor at `(category, id)`.
    pub fn register(&mut self, descriptor: ViewDescriptor) -> RegistrationOutcome {
        let key = descriptor.key();
        match self.descriptors.get(&key) {
            Some(existing) if *existing == descriptor => RegistrationOutcome::Unchanged,
            Some(existing) => {
                tracing::warn!(
                    category = %key.0,
                    id = key.1,
                    previous = %existing.name,
                    replacement = %descriptor.name,
                    "view id collision; later registration wins"
                );
                self.descriptors.insert(key, descriptor);
                RegistrationOutcome::Replaced
            }
            None => {
                self.descriptors.insert(key, descriptor);
                RegistrationOutcome::Inserted
            }
        }
    }

    /// Snapshot of a category's descriptors, sorted by id ascending.
    #[must_use]
    pub fn list_by_category(&self, category: ViewCategory) -> Vec<ViewDescriptor> {
        self.descriptors
            .range((category, u32::MIN)..=(category, u32::MAX))
            .map(|(_, descriptor)| descriptor.clone())
            .collect()
    }

    /// Like [`Self::list_by_category`] but optionally hides experimental views.
    #[must_use]
    pub fn list_visible(
        &self,
        category: ViewCategory,
        include_experimental: bool,
    ) -> Vec<ViewDescriptor> {
        let mut views = self.list_by_category(category);
        if !include_experimental {
            views.retain(|d| !d.is_experimental);
        }
        views
    }

    /// Get a descriptor. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, category: ViewCategory, id: u32) -> Option<&ViewDescriptor> {
        self.descriptors.get(&(category, id))
    }

    /// Get a descriptor or a `NotFound` error.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if no descriptor holds the key.
    pub fn require(&self, category: ViewCategory, id: u32) -> Result<&ViewDescriptor, RegistryError> {
        self.get(category, id)
            .ok_or(RegistryError::NotFound { category, id })
    }

    /// All descriptors carrying `tag`, in key order.
    #[must_use]
    pub fn find_by_tag(&self, tag: &str) -> Vec<ViewDescriptor> {
        self.descriptors
            .values()
            .filter(|d| d.tags.contains(tag))
            .cloned()
            .collect()
    }

    /// Lowest registered id in a category, used as the default pick.
    #[must_use]
    pub fn first_id(&self, category: ViewCategory) -> Option<u32> {
        self.descriptors
            .range((category, u32::MIN)..=(category, u32::MAX))
            .next()
            .map(|((_, id), _)| *id)
    }

    /// Number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    #[must_use]
    pub fn is_bootstrapped(&self, category: ViewCategory) -> bool {
        self.bootstrapped.contains(&category)
    }

    /// Record that a category's bootstrap step ran. Returns `false` if it had
    /// already run.
    pub(crate) fn mark_bootstrapped(&mut self, category: ViewCategory) -> bool {
        self.bootstrapped.insert(category)
    }
}

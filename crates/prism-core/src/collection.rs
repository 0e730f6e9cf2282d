//! Read-only handle over the entry store.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::entities::PracticeEntry;
use crate::errors::CoreError;
use crate::query::MAX_ACCURACY;

/// Shared, immutable, ordered collection of practice entries.
///
/// Cloning is cheap. Two handles are the *same* collection only when they
/// point at the same allocation; the derivation memo relies on that identity
/// rather than on a deep comparison.
#[derive(Debug, Clone)]
pub struct EntryCollection {
    entries: Arc<[PracticeEntry]>,
}

impl EntryCollection {
    /// Wrap entries after checking id uniqueness and accuracy bounds.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` on a duplicate id or an accuracy above 100.
    pub fn new(entries: Vec<PracticeEntry>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate entry id '{}'",
                    entry.id
                )));
            }
            if entry.accuracy > MAX_ACCURACY {
                return Err(CoreError::Validation(format!(
                    "entry '{}' has accuracy {} (max {MAX_ACCURACY})",
                    entry.id, entry.accuracy
                )));
            }
        }
        Ok(Self {
            entries: entries.into(),
        })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
        }
    }

    /// Parse a JSON array of entries.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Parse` for malformed JSON and `CoreError::Validation`
    /// for constraint violations.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let entries: Vec<PracticeEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Read and parse a JSON entry file.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Io` if the file cannot be read, plus any error from
    /// [`Self::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PracticeEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PracticeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Identity comparison: true only for handles to the same allocation.
    #[must_use]
    pub fn same_source(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PracticeEntry> {
        self.entries.iter()
    }
}

impl Default for EntryCollection {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a EntryCollection {
    type Item = &'a PracticeEntry;
    type IntoIter = std::slice::Iter<'a, PracticeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

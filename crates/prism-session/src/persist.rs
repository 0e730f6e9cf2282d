//! Persisted view state.
//!
//! The session writes a snapshot after every committed change and reads one
//! back once at startup. Saving is fire-and-forget: a failed save is logged
//! and the session carries on.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use prism_core::enums::ViewCategory;
use prism_core::query::{FilterCriteria, SortConfig};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PersistError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub category: ViewCategory,
    pub variant_id: u32,
    #[serde(default)]
    pub selected_id: Option<String>,
    pub filters: FilterCriteria,
    pub sort: SortConfig,
}

pub trait StateStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if stored state exists but cannot be read.
    fn load(&self) -> Result<Option<PersistedState>, PersistError>;

    /// # Errors
    ///
    /// Returns `PersistError` if the state cannot be written.
    fn save(&self, state: &PersistedState) -> Result<(), PersistError>;
}

/// JSON file on disk, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<PersistedState>, PersistError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, state: &PersistedState) -> Result<(), PersistError> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| PersistError::NoParent(self.path.clone()))?;
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_vec_pretty(state)?)?;
        fs::rename(&staging, &self.path)?;
        tracing::debug!(path = %self.path.display(), "saved view state");
        Ok(())
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    slot: Mutex<Option<PersistedState>>,
}

impl MemoryStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state(state: PersistedState) -> Self {
        Self {
            slot: Mutex::new(Some(state)),
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<PersistedState> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<Option<PersistedState>, PersistError> {
        Ok(self.current())
    }

    fn save(&self, state: &PersistedState) -> Result<(), PersistError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(state.clone());
        Ok(())
    }
}

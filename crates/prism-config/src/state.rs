//! Persisted view-state location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateConfig {
    /// Whether view state is restored on start and saved on change.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// State file path. Empty means the platform state directory.
    #[serde(default)]
    pub path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: String::new(),
        }
    }
}

impl StateConfig {
    /// Resolve the state file, falling back to `<state dir>/prism/state.json`.
    ///
    /// Returns `None` when persistence is disabled or no platform directory exists.
    #[must_use]
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        if !self.path.trim().is_empty() {
            return Some(PathBuf::from(&self.path));
        }
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|p| p.join("prism").join("state.json"))
    }
}

//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    50
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Path to the JSON entry file. Empty means it must be given on the command line.
    #[serde(default)]
    pub entries_path: String,

    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Log level used when neither `PRISM_LOG` nor `--quiet`/`--verbose` is set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            entries_path: String::new(),
            default_limit: default_limit(),
            log_level: default_log_level(),
        }
    }
}

impl GeneralConfig {
    #[must_use]
    pub fn has_entries_path(&self) -> bool {
        !self.entries_path.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(!config.has_entries_path());
        assert_eq!(config.default_limit, 50);
        assert_eq!(config.log_level, "warn");
    }
}

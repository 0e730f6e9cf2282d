//! Variant dispatcher tuning.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_load_timeout_ms() -> u64 {
    2_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatchConfig {
    /// How long a variant may take to load before the slot falls back.
    /// Zero disables the timeout.
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            load_timeout_ms: default_load_timeout_ms(),
        }
    }
}

impl DispatchConfig {
    #[must_use]
    pub const fn load_timeout(&self) -> Option<Duration> {
        if self.load_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.load_timeout_ms))
        }
    }
}

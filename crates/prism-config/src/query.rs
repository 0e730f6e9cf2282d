//! Default sort configuration.

use prism_core::query::{SortConfig, SortKey};
use prism_core::enums::SortDirection;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_sort_key() -> String {
    SortKey::default().as_str().to_string()
}

fn default_sort_direction() -> String {
    SortDirection::default().as_str().to_string()
}

/// Kept as strings so a bad value surfaces as `ConfigError::InvalidValue`
/// from [`QueryConfig::sort_config`] rather than as an opaque extraction error.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    #[serde(default = "default_sort_key")]
    pub sort_key: String,

    #[serde(default = "default_sort_direction")]
    pub sort_direction: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            sort_key: default_sort_key(),
            sort_direction: default_sort_direction(),
        }
    }
}

impl QueryConfig {
    /// Parse the configured sort.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unknown or non-sortable key
    /// or an unknown direction.
    pub fn sort_config(&self) -> Result<SortConfig, ConfigError> {
        let key = self
            .sort_key
            .parse::<SortKey>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "query.sort_key".into(),
                reason: e.to_string(),
            })?;
        let direction =
            self.sort_direction
                .parse::<SortDirection>()
                .map_err(|e| ConfigError::InvalidValue {
                    field: "query.sort_direction".into(),
                    reason: e.to_string(),
                })?;
        Ok(SortConfig::new(key, direction))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_sort_is_date_descending() {
        let sort = QueryConfig::default().sort_config().unwrap();
        assert_eq!(sort, SortConfig::new(SortKey::DateCompleted, SortDirection::Desc));
    }

    #[test]
    fn non_sortable_key_is_invalid_value() {
        let config = QueryConfig {
            sort_key: "subject".into(),
            ..QueryConfig::default()
        };
        let err = config.sort_config().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "query.sort_key"));
    }
}

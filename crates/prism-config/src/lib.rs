//! # prism-config
//!
//! Layered configuration loading for Prism using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PRISM_*` prefix, `__` as separator)
//! 2. Project-level `.prism/config.toml`
//! 3. User-level `~/.config/prism/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PRISM_VIEW__CATEGORY` -> `view.category`,
//! `PRISM_QUERY__SORT_KEY` -> `query.sort_key`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use prism_config::PrismConfig;
//!
//! let config = PrismConfig::load_with_dotenv().expect("config");
//! let sort = config.query.sort_config().expect("valid sort");
//! println!("default sort: {sort}");
//! ```

mod dispatch;
mod error;
mod general;
mod query;
mod state;
mod view;

pub use dispatch::DispatchConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use query::QueryConfig;
pub use state::StateConfig;
pub use view::ViewConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PrismConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl PrismConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` on extraction failure and
    /// `ConfigError::InvalidValue` when validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".prism/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PRISM_").split("__"))
    }

    /// Check values that serde alone cannot reject.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.query.sort_config()?;
        if self.view.variant == 0 {
            return Err(ConfigError::InvalidValue {
                field: "view.variant".into(),
                reason: "variant ids start at 1".into(),
            });
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("prism").join("config.toml"))
    }
}

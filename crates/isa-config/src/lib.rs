//! # isa-config
//!
//! Layered configuration loading for isaslice using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ISASLICE_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.isaslice/config.toml`
//! 4. User-level `~/.config/isaslice/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ISASLICE_QUERY__STRICT_FACTORS` -> `query.strict_factors`,
//! `ISASLICE_TABLES__ASSAY_GLOB` -> `tables.assay_glob`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use isa_config::IsaConfig;
//!
//! let config = IsaConfig::load_with_dotenv(None).expect("config");
//! if config.query.strict_factors {
//!     println!("unknown factor names are errors");
//! }
//! ```

mod error;
mod output;
mod query;
mod tables;

pub use error::ConfigError;
pub use output::OutputConfig;
pub use query::QueryConfig;
pub use tables::TablesConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IsaConfig {
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub tables: TablesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl IsaConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, merging an explicit TOML file above the project file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a source cannot be parsed or a value is invalid.
    pub fn load_from(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(extra).extract()?;
        config.tables.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Variables from `.env` never override ones already set in the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load_from(extra)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".isaslice/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file
        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("ISASLICE_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("isaslice").join("config.toml"))
    }
}

//! # gomock-config
//!
//! Layered configuration loading for gomock using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GOMOCK_*` prefix, `__` as separator)
//! 2. Project-level `gomock.toml` in the current directory
//! 3. User-level `~/.config/gomock/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags are applied on top by the binary.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GOMOCK_GENERATE__QUALIFY` -> `generate.qualify` and
//! `GOMOCK_DISCOVERY__ENABLED` -> `discovery.enabled`.
//!
//! # Usage
//!
//! ```no_run
//! use gomock_config::GomockConfig;
//!
//! let config = GomockConfig::load().expect("config");
//! if config.discovery.enabled {
//!     println!("discovery on");
//! }
//! ```

mod discovery;
mod error;
mod generate;

pub use discovery::DiscoveryConfig;
pub use error::ConfigError;
pub use generate::GenerateConfig;

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Name of the project-level config file.
pub const PROJECT_CONFIG_FILE: &str = "gomock.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GomockConfig {
    #[serde(default)]
    pub generate: GenerateConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl GomockConfig {
    /// Load and validate configuration from all sources.
    ///
    /// # Errors
    /// Returns `ConfigError::Figment` if a source cannot be read or has the
    /// wrong shape, and `ConfigError::InvalidValue` if validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extract and validate a config from an already built figment.
    ///
    /// # Errors
    /// Same as [`GomockConfig::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("GOMOCK_").split("__"))
    }

    /// # Errors
    /// Returns `ConfigError::InvalidValue` for the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generate.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gomock").join("config.toml"))
    }
}

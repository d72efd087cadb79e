//! # ops-config
//!
//! Layered configuration loading for Opsdeck using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`OPSDECK_*` prefix, `__` as separator)
//! 2. Project-level `.opsdeck/config.toml`
//! 3. User-level `~/.config/opsdeck/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `OPSDECK_API__BASE_URL` -> `api.base_url`,
//! `OPSDECK_AUTH__CALLBACK_ADDR` -> `auth.callback_addr`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ops_config::OpsConfig;
//!
//! let config = OpsConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.api.normalized_base_url());
//! ```

mod api;
mod auth;
mod error;
mod general;
mod session;

pub use api::ApiConfig;
pub use auth::AuthConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use session::SessionConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OpsConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl OpsConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source fails to parse or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory
    /// (or the workspace root when run under cargo).
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".opsdeck/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // OPSDECK_API__BASE_URL -> api.base_url
        figment.merge(Env::prefixed("OPSDECK_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("opsdeck").join("config.toml"))
    }

    fn load_dotenv() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

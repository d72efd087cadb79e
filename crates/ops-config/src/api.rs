//! Backend API configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    String::from("http://localhost:3000")
}

fn default_organization_header() -> String {
    String::from("X-Organization-Id")
}

fn default_user_agent() -> String {
    format!("opsdeck/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Backend base URL, without a trailing slash (e.g. `https://api.example.com`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Header carrying the active organization scope.
    #[serde(default = "default_organization_header")]
    pub organization_header: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            organization_header: default_organization_header(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Check if the API config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    /// Base URL with any trailing `/` removed.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Check that the base URL is an absolute http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when empty and
    /// `ConfigError::InvalidValue` when the scheme is missing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "api".into(),
            });
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("expected an http:// or https:// URL, got '{}'", self.base_url),
            });
        }
        if self.organization_header.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.organization_header".into(),
                reason: "header name must not be empty".into(),
            });
        }
        Ok(())
    }
}

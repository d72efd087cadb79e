//! Browser login configuration.

use serde::{Deserialize, Serialize};

fn default_callback_addr() -> String {
    String::from("127.0.0.1:5173")
}

fn default_callback_path() -> String {
    String::from("/auth/callback")
}

const fn default_callback_timeout_secs() -> u64 {
    120
}

fn default_keyring_service() -> String {
    String::from("opsdeck-cli")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Loopback address the login callback listener binds to. Must match the
    /// redirect URI registered with the identity provider.
    #[serde(default = "default_callback_addr")]
    pub callback_addr: String,

    /// Path the identity provider redirects to with `?code=`.
    #[serde(default = "default_callback_path")]
    pub callback_path: String,

    #[serde(default = "default_callback_timeout_secs")]
    pub callback_timeout_secs: u64,

    /// OS keychain service name for the access token.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            callback_addr: default_callback_addr(),
            callback_path: default_callback_path(),
            callback_timeout_secs: default_callback_timeout_secs(),
            keyring_service: default_keyring_service(),
        }
    }
}

impl AuthConfig {
    #[must_use]
    pub const fn callback_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.callback_timeout_secs)
    }
}

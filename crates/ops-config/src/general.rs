//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default page size for listings.
const fn default_per_page() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default page size for `submissions list`.
    #[serde(default = "default_per_page")]
    pub default_per_page: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
        }
    }
}

//! Session storage location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Directory holding the credentials fallback file and the organization
    /// scope. Empty means `~/.opsdeck`.
    #[serde(default)]
    pub dir: String,
}

impl SessionConfig {
    /// Resolve the session directory. `None` if no home directory is known
    /// and no explicit directory is configured.
    #[must_use]
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        if self.dir.is_empty() {
            dirs::home_dir().map(|home| home.join(".opsdeck"))
        } else {
            Some(PathBuf::from(&self.dir))
        }
    }
}

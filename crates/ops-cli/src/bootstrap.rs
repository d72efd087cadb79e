//! Composition root: configuration, credential store, and API client.

use std::sync::Arc;

use anyhow::Context;
use ops_api::ApiClient;
use ops_auth::{DurableStore, Session};
use ops_config::OpsConfig;

pub fn load_config() -> anyhow::Result<OpsConfig> {
    let config = OpsConfig::load_with_dotenv().context("failed to load opsdeck configuration")?;
    if !config.api.is_configured() {
        anyhow::bail!("api.base_url is empty; set OPSDECK_API__BASE_URL or [api] base_url");
    }
    Ok(config)
}

pub fn build_client(config: &OpsConfig) -> anyhow::Result<ApiClient> {
    let dir = config
        .session
        .resolved_dir()
        .context("cannot locate a home directory; set OPSDECK_SESSION__DIR")?;
    tracing::debug!(dir = %dir.display(), "session directory");

    let store = if config.auth.keyring_service.is_empty() {
        DurableStore::file_only(dir)
    } else {
        DurableStore::new(config.auth.keyring_service.clone(), dir)
    };
    let session = Arc::new(Session::load(Arc::new(store)));
    ApiClient::new(&config.api, session).context("failed to build API client")
}

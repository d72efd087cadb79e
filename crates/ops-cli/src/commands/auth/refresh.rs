use ops_api::ApiClient;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthRefreshResponse {
    refreshed: bool,
    expires_at: Option<String>,
}

pub async fn handle(client: &ApiClient, flags: &GlobalFlags) -> anyhow::Result<()> {
    let token = client.refresh().await?;
    output(
        &AuthRefreshResponse {
            refreshed: true,
            expires_at: super::expires_at(Some(token.as_str())),
        },
        flags.format,
    )
}

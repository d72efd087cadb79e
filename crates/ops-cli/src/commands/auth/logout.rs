use ops_api::ApiClient;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
    organization: Option<String>,
}

pub fn handle(client: &ApiClient, flags: &GlobalFlags) -> anyhow::Result<()> {
    client.logout()?;
    output(
        &AuthLogoutResponse {
            cleared: true,
            organization: client.session().snapshot().scope,
        },
        flags.format,
    )
}

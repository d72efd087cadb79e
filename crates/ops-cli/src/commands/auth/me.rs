use ops_api::ApiClient;

use crate::cli::GlobalFlags;
use crate::output::output;

pub async fn handle(client: &ApiClient, flags: &GlobalFlags) -> anyhow::Result<()> {
    let profile = client.me().await?;
    output(&profile, flags.format)
}

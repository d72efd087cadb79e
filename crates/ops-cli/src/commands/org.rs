use ops_api::ApiClient;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrgCommands;
use crate::output::output;

#[derive(Serialize)]
struct OrgResetResponse {
    reset: bool,
}

/// Handle `opsctl org <subcommand>`.
pub async fn handle(
    action: &OrgCommands,
    client: &ApiClient,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        OrgCommands::List => output(&client.list_organizations().await?, flags.format),
        OrgCommands::Current => output(&client.current_organization().await?, flags.format),
        OrgCommands::Switch(args) => {
            output(&client.switch_organization(&args.id).await?, flags.format)
        }
        OrgCommands::Reset => {
            client.reset_organization()?;
            output(&OrgResetResponse { reset: true }, flags.format)
        }
    }
}

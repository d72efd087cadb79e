mod login;
mod logout;
mod me;
mod refresh;
mod status;

use ops_api::ApiClient;
use ops_config::OpsConfig;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `opsctl auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    client: &ApiClient,
    config: &OpsConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, client, config, flags).await,
        AuthCommands::Logout => logout::handle(client, flags),
        AuthCommands::Status => status::handle(client, flags).await,
        AuthCommands::Refresh => refresh::handle(client, flags).await,
        AuthCommands::Me => me::handle(client, flags).await,
    }
}

/// RFC 3339 expiry of `token`, when it is a readable JWT.
fn expires_at(token: Option<&str>) -> Option<String> {
    token
        .and_then(|token| ops_auth::token::decode_expiry(token).ok())
        .map(|expiry| expiry.to_rfc3339())
}

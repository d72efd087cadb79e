use ops_api::ApiClient;
use ops_config::OpsConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    client: &ApiClient,
    config: &OpsConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, client, config, flags).await,
        Commands::Org { action } => commands::org::handle(&action, client, flags).await,
        Commands::Forms { action } => commands::forms::handle(&action, client, flags).await,
        Commands::Submissions { action } => {
            commands::submissions::handle(&action, client, config, flags).await
        }
        Commands::Schema { action } => commands::schema::handle(&action, flags),
    }
}

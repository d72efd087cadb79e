use ops_api::ApiClient;
use ops_config::OpsConfig;
use ops_core::Pagination;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SubmissionsCommands;
use crate::output::output;

/// Handle `opsctl submissions <subcommand>`.
pub async fn handle(
    action: &SubmissionsCommands,
    client: &ApiClient,
    config: &OpsConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SubmissionsCommands::List(args) => {
            let per_page = args.per_page.unwrap_or(config.general.default_per_page);
            let pagination = Pagination::new(args.page, per_page)?;
            let page = client.list_submissions(pagination).await?;
            tracing::debug!(total = page.total, returned = page.submissions.len(), "submissions page");
            output(&page, flags.format)
        }
    }
}

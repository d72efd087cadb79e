use std::path::Path;

use anyhow::Context;
use ops_api::ApiClient;
use ops_core::entities::{FormDraft, FormSchema, FormUpdate};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FormsCommands;
use crate::output::output;

/// Handle `opsctl forms <subcommand>`.
pub async fn handle(
    action: &FormsCommands,
    client: &ApiClient,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        FormsCommands::List => output(&client.list_forms().await?, flags.format),
        FormsCommands::Get(args) => output(&client.get_form(&args.id).await?, flags.format),
        FormsCommands::Create(args) => {
            let draft = FormDraft {
                supplier_id: args.supplier_id.clone(),
                form_key: args.form_key.clone(),
                schema: read_schema(&args.file)?,
            };
            output(&client.create_form(&draft).await?, flags.format)
        }
        FormsCommands::Update(args) => {
            let update = FormUpdate {
                schema: read_schema(&args.file)?,
            };
            output(&client.update_form(&args.id, &update).await?, flags.format)
        }
    }
}

fn read_schema(path: &Path) -> anyhow::Result<FormSchema> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid form schema", path.display()))
}

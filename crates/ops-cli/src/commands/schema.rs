use anyhow::Context;
use ops_schema::SchemaRegistry;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SchemaCommands;
use crate::output::output;

#[derive(Serialize)]
struct SchemaListResponse {
    count: usize,
    schemas: Vec<&'static str>,
}

/// Handle `opsctl schema`. Needs neither config nor credentials.
pub fn handle(action: &SchemaCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::global();
    match action {
        SchemaCommands::List => output(
            &SchemaListResponse {
                count: registry.schema_count(),
                schemas: registry.list(),
            },
            flags.format,
        ),
        SchemaCommands::Show { name } => {
            let schema = registry.get(name).with_context(|| {
                format!(
                    "unknown schema '{name}' (known: {})",
                    registry.list().join(", ")
                )
            })?;
            output(schema, flags.format)
        }
    }
}

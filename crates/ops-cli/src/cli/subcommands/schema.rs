use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum SchemaCommands {
    /// List registered response schema names.
    List,
    /// Print one response schema as JSON Schema.
    Show { name: String },
}

use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Clone, Debug, Subcommand)]
pub enum FormsCommands {
    /// List forms visible in the current organization.
    List,
    /// Get a form by id.
    Get(FormGetArgs),
    /// Create a form from a schema file.
    Create(FormCreateArgs),
    /// Replace a form's schema.
    Update(FormUpdateArgs),
}

#[derive(Clone, Debug, Args)]
pub struct FormGetArgs {
    pub id: String,
}

#[derive(Clone, Debug, Args)]
pub struct FormCreateArgs {
    /// Supplier organization that owns the form.
    #[arg(long)]
    pub supplier_id: String,
    /// JSON file holding the form schema.
    #[arg(long)]
    pub file: PathBuf,
    /// Stable key for embedding; generated by the backend if omitted.
    #[arg(long)]
    pub form_key: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct FormUpdateArgs {
    pub id: String,
    /// JSON file holding the new form schema.
    #[arg(long)]
    pub file: PathBuf,
}

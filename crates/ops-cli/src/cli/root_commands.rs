use clap::Subcommand;

use crate::cli::subcommands::{
    AuthCommands, FormsCommands, OrgCommands, SchemaCommands, SubmissionsCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, and inspect the session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Organization scope for subsequent requests.
    Org {
        #[command(subcommand)]
        action: OrgCommands,
    },
    /// Embeddable lead-capture forms.
    Forms {
        #[command(subcommand)]
        action: FormsCommands,
    },
    /// Leads captured by published forms.
    Submissions {
        #[command(subcommand)]
        action: SubmissionsCommands,
    },
    /// Response schemas the client validates against.
    Schema {
        #[command(subcommand)]
        action: SchemaCommands,
    },
}

use clap::{Args, Subcommand};

#[derive(Clone, Debug, Subcommand)]
pub enum OrgCommands {
    /// List organizations you belong to.
    List,
    /// Show the organization requests are scoped to.
    Current,
    /// Scope subsequent requests to another organization.
    Switch(OrgSwitchArgs),
    /// Clear the stored organization scope.
    Reset,
}

#[derive(Clone, Debug, Args)]
pub struct OrgSwitchArgs {
    /// Organization id.
    pub id: String,
}

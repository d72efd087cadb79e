use clap::{Args, Subcommand};

#[derive(Clone, Debug, Subcommand)]
pub enum SubmissionsCommands {
    /// List captured submissions, newest first.
    List(SubmissionsListArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SubmissionsListArgs {
    /// Page number, starting at 1.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
    /// Page size (defaults to general.default_per_page).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub per_page: Option<u32>,
}

use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in through the browser (or exchange a code with --code).
    Login(AuthLoginArgs),
    /// Forget the stored access token.
    Logout,
    /// Show whether the stored session is usable.
    Status,
    /// Trade the refresh cookie for a new access token.
    Refresh,
    /// Print the signed-in user's profile.
    Me,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Authorization code to exchange directly, skipping the browser.
    #[arg(long)]
    pub code: Option<String>,
    /// Print the sign-in URL instead of opening a browser. Has no effect
    /// with `--code`.
    #[arg(long)]
    pub no_browser: bool,
}

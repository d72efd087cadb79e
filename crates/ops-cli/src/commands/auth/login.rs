use anyhow::Context;
use ops_api::ApiClient;
use ops_config::OpsConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user_id: String,
    email: String,
    name: String,
    token_source: Option<String>,
    expires_at: Option<String>,
}

pub async fn handle(
    args: &AuthLoginArgs,
    client: &ApiClient,
    config: &OpsConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let code = match &args.code {
        Some(code) => code.clone(),
        None => browser_code(client, config, !args.no_browser).await?,
    };

    let token = client
        .exchange_code(&code)
        .await
        .context("failed to exchange authorization code")?;
    let profile = client.me().await.context("signed in, but loading the profile failed")?;

    output(
        &AuthLoginResponse {
            authenticated: true,
            name: profile.display_name(),
            user_id: profile.id,
            email: profile.email,
            token_source: client.session().token_source().map(|source| source.to_string()),
            expires_at: super::expires_at(Some(token.as_str())),
        },
        flags.format,
    )
}

async fn browser_code(
    client: &ApiClient,
    config: &OpsConfig,
    launch_browser: bool,
) -> anyhow::Result<String> {
    let auth_url = client
        .authentication_url()
        .await
        .context("failed to fetch the sign-in URL")?;

    let spinner = Progress::spinner("Waiting for sign-in to complete in the browser...");
    let result = ops_auth::browser_flow::login(
        &auth_url,
        &config.auth.callback_addr,
        &config.auth.callback_path,
        config.auth.callback_timeout(),
        launch_browser,
    )
    .await;

    match result {
        Ok(code) => {
            spinner.finish_clear();
            Ok(code)
        }
        Err(error) => {
            spinner.finish_err("sign-in did not complete");
            Err(error.into())
        }
    }
}

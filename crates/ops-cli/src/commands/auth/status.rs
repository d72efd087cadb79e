use ops_api::{ApiClient, SessionStatus};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user_id: Option<String>,
    email: Option<String>,
    organization: Option<String>,
    token_source: Option<String>,
    expires_at: Option<String>,
    /// `None` when the token is absent or opaque.
    expired: Option<bool>,
    note: Option<String>,
}

pub async fn handle(client: &ApiClient, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = ops_api::bootstrap::bootstrap(client).await;

    // Read after bootstrap: a silent refresh may have replaced the token.
    let credentials = client.session().snapshot();
    let mut response = AuthStatusResponse {
        authenticated: false,
        user_id: None,
        email: None,
        organization: credentials.scope.clone(),
        token_source: client.session().token_source().map(|source| source.to_string()),
        expires_at: super::expires_at(credentials.token.as_deref()),
        expired: credentials
            .token
            .as_deref()
            .and_then(ops_auth::token::is_expired),
        note: None,
    };

    match status {
        Ok(SessionStatus::Authenticated(profile)) => {
            response.authenticated = true;
            response.user_id = Some(profile.id);
            response.email = Some(profile.email);
        }
        Ok(SessionStatus::LoginRequired { reason }) => {
            response.note = Some(reason);
        }
        Err(error) => {
            tracing::warn!(%error, "could not verify session");
            response.note = Some(error.to_string());
        }
    }

    output(&response, flags.format)
}

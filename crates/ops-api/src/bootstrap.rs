//! Startup check of the stored session.
//!
//! Strategy: with no stored token, try a silent refresh (the refresh cookie
//! may still be valid). Then load the profile; an expired token is refreshed
//! once by the normal request path. Anything that needs the user to sign in
//! again yields [`SessionStatus::LoginRequired`] instead of an error.

use ops_core::entities::UserProfile;

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Authenticated(UserProfile),
    LoginRequired { reason: String },
}

impl SessionStatus {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Resolve the session into a signed-in user or a login prompt.
///
/// # Errors
///
/// Returns failures that a new login would not fix (network errors,
/// malformed responses, server errors).
pub async fn bootstrap(client: &ApiClient) -> Result<SessionStatus, ApiError> {
    if !client.session().is_authenticated() {
        tracing::debug!("no stored token; attempting silent refresh");
        if let Err(error) = client.refresh().await {
            return login_required_or(error);
        }
    }

    match client.me().await {
        Ok(profile) => Ok(SessionStatus::Authenticated(profile)),
        Err(error) => login_required_or(error),
    }
}

fn login_required_or(error: ApiError) -> Result<SessionStatus, ApiError> {
    if error.requires_login() {
        tracing::debug!(%error, "session cannot be resumed");
        Ok(SessionStatus::LoginRequired {
            reason: error.to_string(),
        })
    } else {
        Err(error)
    }
}

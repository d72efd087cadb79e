use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not signed in; run `opsctl auth login`")]
    NotAuthenticated,

    /// Reading or writing the credentials or organization file failed.
    #[error("session storage: {0}")]
    Storage(String),

    /// The loopback login callback failed, timed out or was denied.
    #[error("login callback: {0}")]
    Callback(String),

    /// The access token is not a JWT with a usable `exp` claim.
    #[error("malformed access token: {0}")]
    MalformedToken(String),
}

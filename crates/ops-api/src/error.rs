use thiserror::Error;

/// Substring (case-insensitive) that marks a 401 as a recoverable expired session.
const EXPIRED_MARKER: &str = "expired";

/// Every way an API call can fail.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure before a response was received.
    #[error("{message}")]
    Transport { message: String },

    /// The response body was not valid JSON.
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    /// Non-success HTTP status.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        /// `message` field of the error body, if the server sent one.
        server_message: Option<String>,
    },

    /// The credential refresh failed; the session cannot be recovered silently.
    #[error("{message}")]
    Refresh { status: Option<u16>, message: String },

    /// The payload did not match the declared response schema.
    #[error("Invalid response: {expected}")]
    InvalidResponse {
        expected: String,
        errors: Vec<String>,
    },

    /// The requested organization is not one of the user's memberships.
    #[error("not a member of organization '{0}'")]
    UnknownOrganization(String),

    #[error(transparent)]
    Session(#[from] ops_auth::AuthError),

    #[error(transparent)]
    Config(#[from] ops_config::ConfigError),
}

impl ApiError {
    /// HTTP status associated with the failure, where there is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Refresh { status, .. } => *status,
            _ => None,
        }
    }

    /// A `401` whose error body says the session expired.
    #[must_use]
    pub fn is_expired_session(&self) -> bool {
        match self {
            Self::Status {
                status: 401,
                server_message: Some(message),
                ..
            } => message.to_lowercase().contains(EXPIRED_MARKER),
            _ => false,
        }
    }

    /// The caller should send the user through `opsctl auth login`.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(
            self,
            Self::Refresh { .. }
                | Self::Status { status: 401, .. }
                | Self::Session(ops_auth::AuthError::NotAuthenticated)
        )
    }

    pub(crate) fn transport(error: &reqwest::Error) -> Self {
        Self::Transport {
            message: error.to_string(),
        }
    }
}

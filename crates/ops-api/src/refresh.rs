use ops_core::responses::TokenResponse;
use ops_schema::names;
use reqwest::header::CONTENT_TYPE;

use crate::client::{ApiClient, parse_body};
use crate::decode::{Shape, decode};
use crate::error::ApiError;

const REFRESH_ENDPOINT: &str = "/auth/refresh";

const REFRESH_SHAPE: Shape = Shape {
    schema: names::TOKEN,
    expected: "missing access token on refresh",
};

impl ApiClient {
    /// Exchange the ambient refresh cookie for a new access token.
    ///
    /// Sends no bearer header. On success the token is persisted and becomes
    /// current; on any failure the stored token is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Refresh` for a non-success status or a body without
    /// a string `accessToken`, `ApiError::Transport` for network failures and
    /// `ApiError::Session` if the new token cannot be persisted.
    pub async fn refresh(&self) -> Result<String, ApiError> {
        let response = self
            .http()
            .post(self.url(REFRESH_ENDPOINT))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "token refresh rejected");
            return Err(ApiError::Refresh {
                status: Some(status.as_u16()),
                message: "Failed to refresh tokens".into(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        let token: TokenResponse = parse_body(&text)
            .and_then(|value| decode(value, REFRESH_SHAPE))
            .map_err(|error| ApiError::Refresh {
                status: None,
                message: match error {
                    ApiError::Decode { .. } => {
                        format!("Invalid response: {}", REFRESH_SHAPE.expected)
                    }
                    other => other.to_string(),
                },
            })?;

        self.session().set_token(&token.access_token)?;
        tracing::info!("access token refreshed");
        Ok(token.access_token)
    }
}

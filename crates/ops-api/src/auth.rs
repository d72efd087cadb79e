use ops_core::entities::UserProfile;
use ops_core::responses::{AuthUrlResponse, TokenResponse};
use ops_schema::names;
use serde_json::json;

use crate::client::ApiClient;
use crate::decode::{Shape, decode};
use crate::error::ApiError;

const EXCHANGE_SHAPE: Shape = Shape {
    schema: names::TOKEN,
    expected: "missing access token on exchange",
};

const AUTH_URL_SHAPE: Shape = Shape {
    schema: names::AUTH_URL,
    expected: "missing authentication url",
};

const USER_SHAPE: Shape = Shape {
    schema: names::USER_PROFILE,
    expected: "missing user data",
};

impl ApiClient {
    /// Trade an authorization code from the login redirect for an access
    /// token, and make that token current.
    ///
    /// # Errors
    ///
    /// Returns the request failure, `ApiError::InvalidResponse` if the body has
    /// no string `accessToken`, or `ApiError::Session` if persisting fails.
    pub async fn exchange_code(&self, code: &str) -> Result<String, ApiError> {
        let value = self.post("/auth/exchange", &json!({ "code": code })).await?;
        let token: TokenResponse = decode(value, EXCHANGE_SHAPE)?;
        self.session().set_token(&token.access_token)?;
        tracing::info!("authorization code exchanged");
        Ok(token.access_token)
    }

    /// URL of the hosted sign-in page.
    ///
    /// # Errors
    ///
    /// Returns the request failure or `ApiError::InvalidResponse`.
    pub async fn authentication_url(&self) -> Result<String, ApiError> {
        let value = self.get("/auth/url").await?;
        let body: AuthUrlResponse = decode(value, AUTH_URL_SHAPE)?;
        Ok(body.url)
    }

    /// Profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns the request failure or `ApiError::InvalidResponse`.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let value = self.get("/auth/me").await?;
        decode(value, USER_SHAPE)
    }

    /// Forget the access token and the refresh cookie locally. The
    /// organization scope is kept.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Session` if stored credentials cannot be removed.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session().clear_token()?;
        self.cookies().clear()?;
        tracing::info!("logged out");
        Ok(())
    }
}

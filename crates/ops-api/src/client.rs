use std::fmt;
use std::sync::Arc;

use ops_auth::{Credentials, Session};
use ops_config::ApiConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

use crate::cookies::PersistentJar;
use crate::error::ApiError;

/// Verbs the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    const fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical request. Re-issued unchanged on the expired-session retry.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path (and query) appended verbatim to the base URL.
    pub endpoint: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// HTTP client bound to one backend and one [`Session`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    organization_header: String,
    session: Arc<Session>,
    cookies: Arc<PersistentJar>,
}

impl ApiClient {
    /// Build a client from configuration. Cookies are kept in a jar persisted
    /// through the session store, so the refresh cookie set by
    /// `/auth/exchange` is replayed on `/auth/refresh` in later processes too.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` for an invalid `[api]` section and
    /// `ApiError::Transport` if the HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig, session: Arc<Session>) -> Result<Self, ApiError> {
        config.validate()?;
        let cookies = Arc::new(PersistentJar::load(Arc::clone(&session)));
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::transport(&e))?;

        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
            organization_header: config.organization_header.clone(),
            session,
            cookies,
        })
    }

    /// Client for `base_url` with default headers and settings.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn with_base_url(base_url: &str, session: Arc<Session>) -> Result<Self, ApiError> {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        Self::new(&config, session)
    }

    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    pub(crate) const fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn cookies(&self) -> &PersistentJar {
        &self.cookies
    }

    /// Perform `request`, recovering once from an expired session.
    ///
    /// The first attempt uses the current credentials. Only if it fails with
    /// a `401` whose message mentions expiry is the token refreshed and the
    /// request attempted a second time; that second result is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns the failure of the last attempt, or the refresh failure.
    pub async fn request(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        match self.attempt(request, &self.session.snapshot()).await {
            Err(error) if error.is_expired_session() => {
                tracing::info!(
                    method = %request.method,
                    endpoint = %request.endpoint,
                    "session expired; refreshing access token"
                );
                self.refresh().await?;
                self.attempt(request, &self.session.snapshot()).await
            }
            outcome => outcome,
        }
    }

    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(&ApiRequest::new(HttpMethod::Get, endpoint))
            .await
    }

    /// # Errors
    ///
    /// See [`Self::request`]; also `ApiError::Decode` if `body` cannot be
    /// serialized.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::new(HttpMethod::Post, endpoint).with_body(to_body(body)?);
        self.request(&request).await
    }

    /// # Errors
    ///
    /// See [`Self::post`].
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::new(HttpMethod::Put, endpoint).with_body(to_body(body)?);
        self.request(&request).await
    }

    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn delete(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(&ApiRequest::new(HttpMethod::Delete, endpoint))
            .await
    }

    /// Build the outgoing request from an explicit credentials snapshot.
    pub(crate) fn build(
        &self,
        request: &ApiRequest,
        credentials: &Credentials,
    ) -> Result<reqwest::Request, ApiError> {
        let mut builder = self
            .http
            .request(request.method.to_reqwest(), self.url(&request.endpoint))
            .header(CONTENT_TYPE, "application/json")
            .header(
                self.organization_header.as_str(),
                credentials.scope_header(),
            );
        if let Some(bearer) = credentials.bearer() {
            builder = builder.header(AUTHORIZATION, bearer);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }
        builder.build().map_err(|e| ApiError::transport(&e))
    }

    /// One attempt, no recovery.
    async fn attempt(
        &self,
        request: &ApiRequest,
        credentials: &Credentials,
    ) -> Result<Value, ApiError> {
        let outgoing = self.build(request, credentials)?;
        let response = self
            .http
            .execute(outgoing)
            .await
            .map_err(|e| ApiError::transport(&e))?;

        let status = response.status();
        tracing::debug!(
            method = %request.method,
            endpoint = %request.endpoint,
            status = status.as_u16(),
            "request completed"
        );

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::transport(&e))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: format!(
                    "Failed to {} data: {}",
                    request.method,
                    status.canonical_reason().unwrap_or("")
                ),
                server_message: error_message(&text),
            });
        }

        parse_body(&text)
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode {
        message: format!("request body: {e}"),
    })
}

/// Decode a success body. An empty body (e.g. `204`) decodes to `null`.
pub(crate) fn parse_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode {
        message: e.to_string(),
    })
}

/// `message` field of a JSON error body.
pub(crate) fn error_message(text: &str) -> Option<String> {
    serde_json::from_str::<Value>(text)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

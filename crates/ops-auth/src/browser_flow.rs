//! Loopback browser login.
//!
//! 1. Bind `tiny_http` on the configured callback address (before the browser
//!    is opened, so the redirect can't race the listener)
//! 2. Open the identity provider URL returned by `GET /auth/url`
//! 3. Wait for `<callback_path>?code=...` (in `spawn_blocking`, `recv` blocks)
//!
//! Exchanging the code for a token is the API client's job.

use std::time::{Duration, Instant};

use crate::error::AuthError;

/// What a request to the loopback listener means for the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Code(String),
    Denied(String),
    /// Not the callback (favicon, preflight) or a callback without a code.
    Ignore,
}

/// Classify a request target such as `/auth/callback?code=abc&state=xyz`.
///
/// # Errors
///
/// Returns `AuthError::Callback` if a query value is not valid
/// percent-encoding.
pub fn parse_callback(target: &str, callback_path: &str) -> Result<CallbackOutcome, AuthError> {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    if path != callback_path {
        return Ok(CallbackOutcome::Ignore);
    }

    let mut code = None;
    let mut error = None;
    let mut description = None;
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let decoded = urlencoding::decode(&value.replace('+', " "))
            .map_err(|e| AuthError::Callback(format!("URL decode: {e}")))?
            .into_owned();
        match key {
            "code" if !decoded.is_empty() => code = Some(decoded),
            "error" => error = Some(decoded),
            "error_description" => description = Some(decoded),
            _ => {}
        }
    }

    if let Some(error) = error {
        let reason = description.map_or_else(|| error.clone(), |d| format!("{error}: {d}"));
        return Ok(CallbackOutcome::Denied(reason));
    }
    Ok(code.map_or(CallbackOutcome::Ignore, CallbackOutcome::Code))
}

/// Bound loopback listener waiting for the identity provider redirect.
pub struct CallbackListener {
    server: tiny_http::Server,
    path: String,
}

impl CallbackListener {
    /// Bind the listener. Use port `0` to let the OS pick one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Callback` if the address cannot be bound.
    pub fn bind(addr: &str, callback_path: &str) -> Result<Self, AuthError> {
        let server = tiny_http::Server::http(addr)
            .map_err(|e| AuthError::Callback(format!("failed to bind {addr}: {e}")))?;
        Ok(Self {
            server,
            path: callback_path.to_string(),
        })
    }

    /// Port the listener is bound to.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.server.server_addr().to_ip().map(|addr| addr.port())
    }

    /// Wait for the authorization code.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Callback` on timeout, when the provider
    /// redirects with `error=`, or if the listener fails.
    pub async fn wait_for_code(self, timeout: Duration) -> Result<String, AuthError> {
        tokio::task::spawn_blocking(move || self.block_for_code(timeout))
            .await
            .map_err(|e| AuthError::Callback(format!("spawn_blocking join: {e}")))?
    }

    fn block_for_code(&self, timeout: Duration) -> Result<String, AuthError> {
        let deadline = Instant::now() + timeout;
        let timed_out = || {
            AuthError::Callback(format!(
                "browser callback timed out after {}s",
                timeout.as_secs()
            ))
        };

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(timed_out());
            }

            let request = match self.server.recv_timeout(remaining) {
                Ok(Some(request)) => request,
                Ok(None) => return Err(timed_out()),
                Err(e) => return Err(AuthError::Callback(format!("recv error: {e}"))),
            };

            match parse_callback(request.url(), &self.path) {
                Ok(CallbackOutcome::Code(code)) => {
                    let _ = request.respond(html(
                        "<h1>Signed in</h1><p>You can close this tab and return to the terminal.</p>",
                    ));
                    return Ok(code);
                }
                Ok(CallbackOutcome::Denied(reason)) => {
                    let _ = request.respond(html(
                        "<h1>Sign-in failed</h1><p>Check the terminal for details.</p>",
                    ));
                    return Err(AuthError::Callback(format!(
                        "identity provider returned an error: {reason}"
                    )));
                }
                Ok(CallbackOutcome::Ignore) => {
                    let _ = request.respond(tiny_http::Response::from_string("").with_status_code(204));
                }
                Err(error) => {
                    let _ = request.respond(html("<h1>Sign-in failed</h1><p>Malformed callback.</p>"));
                    return Err(error);
                }
            }
        }
    }
}

fn html(body: &str) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let response =
        tiny_http::Response::from_string(format!("<html><body>{body}</body></html>"));
    match tiny_http::Header::from_bytes("Content-Type", "text/html; charset=utf-8") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

/// Open `url` in the default browser, printing it for manual use if that fails.
pub fn open_browser(url: &str) {
    eprintln!("Opening browser to: {url}");
    if let Err(error) = open::that(url) {
        tracing::warn!(%error, "failed to open browser");
        eprintln!("Open the URL above manually, then return here.");
    }
}

/// Run the full browser leg: bind, open `auth_url`, wait for the code.
///
/// # Errors
///
/// See [`CallbackListener::bind`] and [`CallbackListener::wait_for_code`].
pub async fn login(
    auth_url: &str,
    callback_addr: &str,
    callback_path: &str,
    timeout: Duration,
    launch_browser: bool,
) -> Result<String, AuthError> {
    let listener = CallbackListener::bind(callback_addr, callback_path)?;
    if launch_browser {
        open_browser(auth_url);
    } else {
        eprintln!("Open this URL to sign in: {auth_url}");
    }
    listener.wait_for_code(timeout).await
}

//! Cookie jar that outlives the process.
//!
//! `/auth/exchange` sets the refresh cookie that `/auth/refresh` later relies
//! on. Every `Set-Cookie` the client receives is applied to an in-memory
//! [`Jar`] and also written through the [`Session`] store, so a client built
//! in a later process replays it.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use ops_auth::{AuthError, Session};
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SavedCookie {
    /// Request URL the cookie arrived on. Replaying against it restores the
    /// default domain and path.
    url: String,
    /// Raw `Set-Cookie` value.
    header: String,
    /// Unix seconds when the cookie was received.
    saved_at: i64,
}

pub(crate) struct PersistentJar {
    jar: RwLock<Arc<Jar>>,
    saved: Mutex<Vec<SavedCookie>>,
    session: Arc<Session>,
}

impl fmt::Debug for PersistentJar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentJar")
            .field("cookies", &lock(&self.saved).len())
            .finish_non_exhaustive()
    }
}

impl PersistentJar {
    /// Rebuild the jar from whatever the session store holds. Unreadable
    /// state and cookies whose `Max-Age` has run out are dropped.
    pub(crate) fn load(session: Arc<Session>) -> Self {
        let saved: Vec<SavedCookie> = session
            .cookies()
            .and_then(|text| match serde_json::from_str(&text) {
                Ok(saved) => Some(saved),
                Err(error) => {
                    tracing::warn!(%error, "ignoring unreadable cookie jar");
                    None
                }
            })
            .unwrap_or_default();

        let now = now();
        let jar = Jar::default();
        let live: Vec<SavedCookie> = saved
            .into_iter()
            .filter(|cookie| {
                let Ok(url) = Url::parse(&cookie.url) else {
                    return false;
                };
                match rebase_max_age(&cookie.header, now - cookie.saved_at) {
                    Some(header) => {
                        jar.add_cookie_str(&header, &url);
                        true
                    }
                    None => false,
                }
            })
            .collect();
        tracing::debug!(cookies = live.len(), "cookie jar loaded");

        Self {
            jar: RwLock::new(Arc::new(jar)),
            saved: Mutex::new(live),
            session,
        }
    }

    /// Drop every cookie, in memory and in the store.
    pub(crate) fn clear(&self) -> Result<(), AuthError> {
        *self.jar.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(Jar::default());
        lock(&self.saved).clear();
        self.session.clear_cookies()
    }

    fn current(&self) -> Arc<Jar> {
        Arc::clone(&self.jar.read().unwrap_or_else(PoisonError::into_inner))
    }
}

impl CookieStore for PersistentJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let headers: Vec<HeaderValue> = cookie_headers.cloned().collect();
        if headers.is_empty() {
            return;
        }
        self.current().set_cookies(&mut headers.iter(), url);

        let now = now();
        let mut saved = lock(&self.saved);
        for header in headers.iter().filter_map(|value| value.to_str().ok()) {
            let name = cookie_name(header);
            saved.retain(|cookie| {
                !(host(&cookie.url) == url.host_str() && cookie_name(&cookie.header) == name)
            });
            saved.push(SavedCookie {
                url: url.to_string(),
                header: header.to_string(),
                saved_at: now,
            });
        }

        let persisted = serde_json::to_string(&*saved)
            .map_err(|e| AuthError::Storage(format!("cookie jar: {e}")))
            .and_then(|text| self.session.save_cookies(&text));
        if let Err(error) = persisted {
            tracing::warn!(%error, "cookies will not survive this process");
        }
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.current().cookies(url)
    }
}

fn lock<T>(slot: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn host(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split(['/', '?', '#']).next().map(|authority| {
        authority
            .rsplit_once('@')
            .map_or(authority, |(_, host)| host)
            .split(':')
            .next()
            .unwrap_or(authority)
    })
}

fn cookie_name(header: &str) -> &str {
    header
        .split(';')
        .next()
        .and_then(|pair| pair.split('=').next())
        .unwrap_or("")
        .trim()
}

/// Shrink `Max-Age` by the seconds elapsed since the cookie was received.
/// `None` once it has run out. Headers without `Max-Age` are returned as-is.
fn rebase_max_age(header: &str, elapsed: i64) -> Option<String> {
    let mut attributes = Vec::new();
    for attribute in header.split(';') {
        let trimmed = attribute.trim();
        let max_age = trimmed
            .split_once('=')
            .filter(|(key, _)| key.trim().eq_ignore_ascii_case("max-age"))
            .and_then(|(_, value)| value.trim().parse::<i64>().ok());
        match max_age {
            Some(seconds) if seconds - elapsed <= 0 => return None,
            Some(seconds) => attributes.push(format!("Max-Age={}", seconds - elapsed)),
            None => attributes.push(trimmed.to_string()),
        }
    }
    Some(attributes.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn url(text: &str) -> Url {
        Url::parse(text).expect("url")
    }

    fn receive(jar: &PersistentJar, at: &str, headers: &[&str]) {
        let values: Vec<HeaderValue> = headers
            .iter()
            .map(|h| HeaderValue::from_str(h).expect("header"))
            .collect();
        jar.set_cookies(&mut values.iter(), &url(at));
    }

    fn cookie_header(jar: &PersistentJar, at: &str) -> Option<String> {
        jar.cookies(&url(at))
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    #[test]
    fn received_cookie_is_replayed_by_a_reloaded_jar() {
        let session = Arc::new(Session::in_memory(None, None));
        let jar = PersistentJar::load(Arc::clone(&session));
        receive(&jar, "http://api.test/auth/exchange", &["refresh=r1; HttpOnly"]);
        assert_eq!(
            cookie_header(&jar, "http://api.test/auth/refresh").as_deref(),
            Some("refresh=r1")
        );

        let reloaded = PersistentJar::load(session);
        assert_eq!(
            cookie_header(&reloaded, "http://api.test/auth/refresh").as_deref(),
            Some("refresh=r1")
        );
    }

    #[test]
    fn rotated_cookie_replaces_the_old_one() {
        let session = Arc::new(Session::in_memory(None, None));
        let jar = PersistentJar::load(Arc::clone(&session));
        receive(&jar, "http://api.test/auth/exchange", &["refresh=r1; Path=/"]);
        receive(&jar, "http://api.test/auth/refresh", &["refresh=r2; Path=/"]);

        let stored = session.cookies().expect("persisted");
        let saved: Vec<SavedCookie> = serde_json::from_str(&stored).expect("json");
        assert_eq!(saved.len(), 1);
        assert_eq!(
            cookie_header(&PersistentJar::load(session), "http://api.test/forms").as_deref(),
            Some("refresh=r2")
        );
    }

    #[test]
    fn clear_forgets_cookies_everywhere() {
        let session = Arc::new(Session::in_memory(None, None));
        let jar = PersistentJar::load(Arc::clone(&session));
        receive(&jar, "http://api.test/auth/exchange", &["refresh=r1; Path=/"]);

        jar.clear().expect("clear");
        assert_eq!(cookie_header(&jar, "http://api.test/auth/refresh"), None);
        assert_eq!(session.cookies(), None);
    }

    #[test]
    fn unreadable_jar_is_ignored() {
        let session = Arc::new(Session::in_memory(None, None));
        session.save_cookies("not json").expect("save");
        let jar = PersistentJar::load(session);
        assert_eq!(cookie_header(&jar, "http://api.test/"), None);
    }

    #[test]
    fn max_age_counts_down_from_receipt() {
        assert_eq!(
            rebase_max_age("refresh=r1; Max-Age=3600; Path=/", 600).as_deref(),
            Some("refresh=r1; Max-Age=3000; Path=/")
        );
        assert_eq!(rebase_max_age("refresh=r1; max-age=60", 60), None);
        assert_eq!(
            rebase_max_age("refresh=r1; HttpOnly", 10_000).as_deref(),
            Some("refresh=r1; HttpOnly")
        );
    }

    #[test]
    fn cookie_names_and_hosts() {
        assert_eq!(cookie_name("refresh=r1; Path=/"), "refresh");
        assert_eq!(host("http://127.0.0.1:4010/auth/exchange"), Some("127.0.0.1"));
        assert_eq!(host("https://api.test"), Some("api.test"));
    }
}

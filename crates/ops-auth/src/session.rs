//! In-process session state owned by the composition root.
//!
//! Request building never reads storage directly: it takes a [`Credentials`]
//! snapshot from the shared [`Session`] once per attempt. Writes go to the
//! durable store first and then replace the in-memory copy.

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::AuthError;
use crate::store::{MemoryStore, SessionStore, TokenSource};

/// Point-in-time view of the session slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub scope: Option<String>,
}

impl Credentials {
    /// `Authorization` header value, if a token is present.
    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.token.as_deref().map(|token| format!("Bearer {token}"))
    }

    /// Organization scope header value. Absent scope is sent as `""`.
    #[must_use]
    pub fn scope_header(&self) -> &str {
        self.scope.as_deref().unwrap_or("")
    }
}

/// Shared holder for the current token and organization scope.
///
/// Concurrent refreshes are not coordinated; the last `set_token` wins.
pub struct Session {
    store: Arc<dyn SessionStore>,
    current: RwLock<Credentials>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let current = self.snapshot();
        f.debug_struct("Session")
            .field("authenticated", &current.token.is_some())
            .field("scope", &current.scope)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Load both slots from `store` once.
    #[must_use]
    pub fn load(store: Arc<dyn SessionStore>) -> Self {
        let current = Credentials {
            token: store.load_token(),
            scope: store.load_scope(),
        };
        tracing::debug!(
            authenticated = current.token.is_some(),
            scope = current.scope_header(),
            "session loaded"
        );
        Self {
            store,
            current: RwLock::new(current),
        }
    }

    /// Session backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory(token: Option<&str>, scope: Option<&str>) -> Self {
        Self::load(Arc::new(MemoryStore::with(token, scope)))
    }

    #[must_use]
    pub fn snapshot(&self) -> Credentials {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.snapshot().token.is_some()
    }

    /// Persist `token` and make it current.
    ///
    /// # Errors
    ///
    /// Returns the store's error; the current token is left unchanged.
    pub fn set_token(&self, token: &str) -> Result<(), AuthError> {
        self.store.store_token(token)?;
        self.write(|creds| creds.token = Some(token.to_string()));
        Ok(())
    }

    /// Forget the token (logout).
    ///
    /// # Errors
    ///
    /// Returns the store's error if stored credentials cannot be removed.
    pub fn clear_token(&self) -> Result<(), AuthError> {
        self.store.delete_token()?;
        self.write(|creds| creds.token = None);
        Ok(())
    }

    /// Persist `scope` as the active organization and make it current.
    ///
    /// # Errors
    ///
    /// Returns the store's error; the current scope is left unchanged.
    pub fn set_scope(&self, scope: &str) -> Result<(), AuthError> {
        self.store.store_scope(scope)?;
        self.write(|creds| creds.scope = Some(scope.to_string()));
        Ok(())
    }

    /// Reset the organization scope.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the scope cannot be removed.
    pub fn clear_scope(&self) -> Result<(), AuthError> {
        self.store.delete_scope()?;
        self.write(|creds| creds.scope = None);
        Ok(())
    }

    #[must_use]
    pub fn token_source(&self) -> Option<TokenSource> {
        if self.snapshot().token.is_none() {
            return None;
        }
        self.store.token_source()
    }

    /// Serialized cookie jar persisted by the HTTP client.
    #[must_use]
    pub fn cookies(&self) -> Option<String> {
        self.store.load_cookies()
    }

    /// # Errors
    ///
    /// Returns the store's error if the jar cannot be persisted.
    pub fn save_cookies(&self, jar: &str) -> Result<(), AuthError> {
        self.store.store_cookies(jar)
    }

    /// # Errors
    ///
    /// Returns the store's error if the jar cannot be removed.
    pub fn clear_cookies(&self) -> Result<(), AuthError> {
        self.store.delete_cookies()
    }

    fn write(&self, apply: impl FnOnce(&mut Credentials)) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        apply(&mut guard);
    }
}

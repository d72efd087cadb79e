//! Durable storage slots for the access token, the organization scope and
//! the serialized cookie jar that carries the refresh cookie.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::AuthError;

const KEYRING_USER: &str = "access-token";
const TOKEN_ENV_VAR: &str = "OPSDECK_AUTH__TOKEN";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const SCOPE_FILE_NAME: &str = "organization";
const COOKIES_FILE_NAME: &str = "cookies.json";

/// Where the current token was loaded from (for status display).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    File,
    Memory,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
            Self::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// Persistence for the session slots.
///
/// Empty tokens are treated as absent. An empty scope is a valid stored value
/// and is distinct from no scope.
pub trait SessionStore: Send + Sync {
    fn load_token(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the token cannot be persisted.
    fn store_token(&self, token: &str) -> Result<(), AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if stored credentials cannot be removed.
    fn delete_token(&self) -> Result<(), AuthError>;

    fn load_scope(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the scope cannot be persisted.
    fn store_scope(&self, scope: &str) -> Result<(), AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the scope file cannot be removed.
    fn delete_scope(&self) -> Result<(), AuthError>;

    fn token_source(&self) -> Option<TokenSource>;

    /// Serialized cookie jar, opaque to the store.
    fn load_cookies(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the jar cannot be persisted.
    fn store_cookies(&self, jar: &str) -> Result<(), AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the jar file cannot be removed.
    fn delete_cookies(&self) -> Result<(), AuthError>;
}

/// Keychain-first store. Token priority on load: keyring →
/// `OPSDECK_AUTH__TOKEN` → `<dir>/credentials`. The scope lives in
/// `<dir>/organization` and the cookie jar in `<dir>/cookies.json`, both 0600.
#[derive(Debug, Clone)]
pub struct DurableStore {
    keyring_service: Option<String>,
    dir: PathBuf,
}

impl DurableStore {
    #[must_use]
    pub fn new(keyring_service: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            keyring_service: Some(keyring_service.into()),
            dir: dir.into(),
        }
    }

    /// Store that never touches the OS keychain (headless machines, tests).
    #[must_use]
    pub fn file_only(dir: impl Into<PathBuf>) -> Self {
        Self {
            keyring_service: None,
            dir: dir.into(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry(&self) -> Option<keyring::Entry> {
        let service = self.keyring_service.as_deref()?;
        match keyring::Entry::new(service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring unavailable");
                None
            }
        }
    }

    fn keyring_token(&self) -> Option<String> {
        self.entry()
            .and_then(|entry| entry.get_password().ok())
            .filter(|token| !token.is_empty())
    }

    fn env_token() -> Option<String> {
        std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|token| !token.is_empty())
    }

    fn credentials_path(&self) -> PathBuf {
        self.dir.join(CREDENTIALS_FILE_NAME)
    }

    fn scope_path(&self) -> PathBuf {
        self.dir.join(SCOPE_FILE_NAME)
    }

    fn cookies_path(&self) -> PathBuf {
        self.dir.join(COOKIES_FILE_NAME)
    }

    fn file_token(&self) -> Option<String> {
        fs::read_to_string(self.credentials_path())
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn ensure_dir(&self) -> Result<(), AuthError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AuthError::Storage(format!("mkdir {}: {e}", self.dir.display()))
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", self.dir.display());
            }
        }
        Ok(())
    }

    fn write_private(&self, path: &Path, contents: &str) -> Result<(), AuthError> {
        self.ensure_dir()?;
        fs::write(path, contents)
            .map_err(|e| AuthError::Storage(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::Storage(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn remove_if_exists(path: &Path) -> Result<(), AuthError> {
        if path.exists() {
            fs::remove_file(path).map_err(|e| {
                AuthError::Storage(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }
}

impl SessionStore for DurableStore {
    fn load_token(&self) -> Option<String> {
        self.keyring_token()
            .or_else(Self::env_token)
            .or_else(|| self.file_token())
    }

    fn store_token(&self, token: &str) -> Result<(), AuthError> {
        match self.entry() {
            Some(entry) => match entry.set_password(token) {
                Ok(()) => {
                    // Keyring now holds the token; drop any stale file copy.
                    Self::remove_if_exists(&self.credentials_path())
                }
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                    self.write_private(&self.credentials_path(), token)
                }
            },
            None => self.write_private(&self.credentials_path(), token),
        }
    }

    fn delete_token(&self) -> Result<(), AuthError> {
        if let Some(entry) = self.entry() {
            keyring_deleted(entry.delete_credential())?;
        }
        Self::remove_if_exists(&self.credentials_path())
    }

    fn load_scope(&self) -> Option<String> {
        fs::read_to_string(self.scope_path())
            .ok()
            .map(|s| s.trim().to_string())
    }

    fn store_scope(&self, scope: &str) -> Result<(), AuthError> {
        self.write_private(&self.scope_path(), scope)
    }

    fn delete_scope(&self) -> Result<(), AuthError> {
        Self::remove_if_exists(&self.scope_path())
    }

    fn token_source(&self) -> Option<TokenSource> {
        if self.keyring_token().is_some() {
            return Some(TokenSource::Keyring);
        }
        if Self::env_token().is_some() {
            return Some(TokenSource::Env);
        }
        if self.file_token().is_some() {
            return Some(TokenSource::File);
        }
        None
    }

    fn load_cookies(&self) -> Option<String> {
        fs::read_to_string(self.cookies_path())
            .ok()
            .filter(|s| !s.trim().is_empty())
    }

    fn store_cookies(&self, jar: &str) -> Result<(), AuthError> {
        self.write_private(&self.cookies_path(), jar)
    }

    fn delete_cookies(&self) -> Result<(), AuthError> {
        Self::remove_if_exists(&self.cookies_path())
    }
}

/// A missing entry is already deleted; any other keyring failure would leave
/// the token behind.
fn keyring_deleted(result: keyring::Result<()>) -> Result<(), AuthError> {
    match result {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(error) => Err(AuthError::Storage(format!("keyring delete: {error}"))),
    }
}

/// Process-local store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    token: Mutex<Option<String>>,
    scope: Mutex<Option<String>>,
    cookies: Mutex<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(token: Option<&str>, scope: Option<&str>) -> Self {
        Self {
            token: Mutex::new(token.map(str::to_string)),
            scope: Mutex::new(scope.map(str::to_string)),
            cookies: Mutex::new(None),
        }
    }
}

fn lock<T>(slot: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl SessionStore for MemoryStore {
    fn load_token(&self) -> Option<String> {
        lock(&self.token).clone().filter(|t| !t.is_empty())
    }

    fn store_token(&self, token: &str) -> Result<(), AuthError> {
        *lock(&self.token) = Some(token.to_string());
        Ok(())
    }

    fn delete_token(&self) -> Result<(), AuthError> {
        *lock(&self.token) = None;
        Ok(())
    }

    fn load_scope(&self) -> Option<String> {
        lock(&self.scope).clone()
    }

    fn store_scope(&self, scope: &str) -> Result<(), AuthError> {
        *lock(&self.scope) = Some(scope.to_string());
        Ok(())
    }

    fn delete_scope(&self) -> Result<(), AuthError> {
        *lock(&self.scope) = None;
        Ok(())
    }

    fn token_source(&self) -> Option<TokenSource> {
        self.load_token().map(|_| TokenSource::Memory)
    }

    fn load_cookies(&self) -> Option<String> {
        lock(&self.cookies).clone()
    }

    fn store_cookies(&self, jar: &str) -> Result<(), AuthError> {
        *lock(&self.cookies) = Some(jar.to_string());
        Ok(())
    }

    fn delete_cookies(&self) -> Result<(), AuthError> {
        *lock(&self.cookies) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn file_store_load_delete_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = DurableStore::file_only(tmp.path().join("session"));

        store.store_token("test_jwt_abc123").expect("store");
        assert_eq!(
            std::fs::read_to_string(store.dir().join("credentials")).expect("read"),
            "test_jwt_abc123"
        );
        assert_eq!(store.file_token().as_deref(), Some("test_jwt_abc123"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(store.dir().join("credentials"))
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "credentials file should be 0600");
        }

        store.delete_token().expect("delete");
        assert!(!store.dir().join("credentials").exists());
        assert!(store.file_token().is_none());
    }

    #[test]
    fn file_token_ignores_whitespace_only_content() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = DurableStore::file_only(tmp.path());
        std::fs::write(tmp.path().join("credentials"), "   \n  ").expect("write");
        assert!(store.file_token().is_none());
    }

    #[test]
    fn empty_scope_is_stored_and_distinct_from_none() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = DurableStore::file_only(tmp.path());
        assert_eq!(store.load_scope(), None);

        store.store_scope("").expect("store");
        assert_eq!(store.load_scope().as_deref(), Some(""));

        store.store_scope("org_42").expect("store");
        assert_eq!(store.load_scope().as_deref(), Some("org_42"));

        store.delete_scope().expect("delete");
        assert_eq!(store.load_scope(), None);
    }

    #[test]
    fn deleting_missing_slots_is_ok() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = DurableStore::file_only(tmp.path().join("never-created"));
        assert!(store.delete_token().is_ok());
        assert!(store.delete_scope().is_ok());
        assert!(store.delete_cookies().is_ok());
    }

    #[test]
    fn cookie_jar_is_private_and_survives_a_new_store() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let jar = r#"[{"url":"http://127.0.0.1/auth/exchange","header":"refresh=r1"}]"#;
        DurableStore::file_only(tmp.path())
            .store_cookies(jar)
            .expect("store");

        let reopened = DurableStore::file_only(tmp.path());
        assert_eq!(reopened.load_cookies().as_deref(), Some(jar));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(tmp.path().join("cookies.json"))
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600);
        }

        reopened.delete_cookies().expect("delete");
        assert_eq!(reopened.load_cookies(), None);
    }

    #[test]
    fn keyring_delete_only_tolerates_missing_entry() {
        assert!(keyring_deleted(Ok(())).is_ok());
        assert!(keyring_deleted(Err(keyring::Error::NoEntry)).is_ok());

        let locked = keyring::Error::PlatformFailure(Box::new(std::io::Error::other(
            "keychain is locked",
        )));
        let err = keyring_deleted(Err(locked)).unwrap_err();
        assert!(matches!(err, AuthError::Storage(ref reason) if reason.contains("keyring delete")));
    }

    #[test]
    fn memory_store_keeps_cookie_jar() {
        let store = MemoryStore::new();
        assert_eq!(store.load_cookies(), None);
        store.store_cookies("[]").expect("store");
        assert_eq!(store.load_cookies().as_deref(), Some("[]"));
        store.delete_cookies().expect("delete");
        assert_eq!(store.load_cookies(), None);
    }

    #[test]
    fn memory_store_treats_empty_token_as_absent() {
        let store = MemoryStore::with(Some(""), Some(""));
        assert_eq!(store.load_token(), None);
        assert_eq!(store.token_source(), None);
        assert_eq!(store.load_scope().as_deref(), Some(""));
    }

    #[test]
    fn token_source_display_names() {
        assert_eq!(TokenSource::Keyring.to_string(), "keyring");
        assert_eq!(TokenSource::File.to_string(), "file");
    }
}

// Session token storage seam.
//
// The client never touches disk or keyrings itself: it is handed a
// `SessionStore` and an unauthorized hook at construction time, which
// keeps the interceptors testable with the in-memory store below.

use std::fmt;
use std::sync::{Arc, Mutex};

use secrecy::SecretString;
use thiserror::Error;

/// Failure reading or writing persisted session state.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session storage backend failed: {0}")]
    Backend(String),
}

/// Persistent key-value home of the bearer token.
///
/// `load` returning `Ok(None)` is a normal state (anonymous endpoints such
/// as registration and login). Implementations must not block indefinitely.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<SecretString>, SessionStoreError>;

    fn save(&self, token: &SecretString) -> Result<(), SessionStoreError>;

    /// Remove the token. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Callback fired once per 401 response, after the token was cleared.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// A hook that does nothing, for callers without navigation.
pub fn noop_hook() -> UnauthorizedHook {
    Arc::new(|| {})
}

// ── In-memory store ─────────────────────────────────────────────────

/// Process-local store. Used by tests and one-shot tooling.
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<SecretString>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(SecretString::from(token.into()))),
        }
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, Option<SecretString>>, SessionStoreError> {
        self.token
            .lock()
            .map_err(|_| SessionStoreError::Backend("session lock poisoned".into()))
    }
}

impl fmt::Debug for MemorySessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let present = self.token.lock().map(|t| t.is_some()).unwrap_or(false);
        f.debug_struct("MemorySessionStore")
            .field("has_token", &present)
            .finish()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SecretString>, SessionStoreError> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, token: &SecretString) -> Result<(), SessionStoreError> {
        *self.lock()? = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.lock()? = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&SecretString::from("abc".to_owned())).unwrap();
        assert_eq!(store.load().unwrap().unwrap().expose_secret(), "abc");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn debug_output_hides_token() {
        let store = MemorySessionStore::with_token("super-secret");
        let rendered = format!("{store:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("has_token: true"));
    }
}

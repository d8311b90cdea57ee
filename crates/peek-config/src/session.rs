// Persistent session stores.
//
// One token per profile. The file store keeps it under the platform data
// directory; the keyring store uses the OS credential manager.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use peek_core::{SessionStore, SessionStoreError};

/// Keyring service name all profiles share.
pub const KEYRING_SERVICE: &str = "peek";

// ── File store ──────────────────────────────────────────────────────

/// Token kept in a plain file readable only by the owner.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/sessions/<profile>.token`
    pub fn for_profile(profile_name: &str) -> Self {
        Self::new(
            crate::data_dir()
                .join("sessions")
                .join(format!("{profile_name}.token")),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SecretString>, SessionStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| SecretString::from(token.to_owned())))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &SecretString) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = open_private(&self.path)?;
        file.write_all(token.expose_secret().as_bytes())?;
        debug!(path = %self.path.display(), "session token written");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Open for writing with owner-only permissions from the moment the file
/// exists. A pre-existing file is tightened before it is truncated.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.set_len(0)?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

// ── Keyring store ───────────────────────────────────────────────────

/// Token kept in the system keyring under `peek` / `<profile>/token`.
#[derive(Debug, Clone)]
pub struct KeyringSessionStore {
    account: String,
}

impl KeyringSessionStore {
    pub fn for_profile(profile_name: &str) -> Self {
        Self {
            account: format!("{profile_name}/token"),
        }
    }

    fn entry(&self) -> Result<keyring::Entry, SessionStoreError> {
        keyring::Entry::new(KEYRING_SERVICE, &self.account)
            .map_err(|e| SessionStoreError::Backend(e.to_string()))
    }
}

impl SessionStore for KeyringSessionStore {
    fn load(&self) -> Result<Option<SecretString>, SessionStoreError> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(SecretString::from(token))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(SessionStoreError::Backend(e.to_string())),
        }
    }

    fn save(&self, token: &SecretString) -> Result<(), SessionStoreError> {
        self.entry()?
            .set_password(token.expose_secret())
            .map_err(|e| SessionStoreError::Backend(e.to_string()))
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SessionStoreError::Backend(e.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("sessions").join("default.token"));

        assert!(store.load().unwrap().is_none());

        store.save(&SecretString::from("jwt-abc".to_owned())).unwrap();
        let token = store.load().unwrap().unwrap();
        assert_eq!(token.expose_secret(), "jwt-abc");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn blank_token_file_reads_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.token");
        fs::write(&path, "  \n").unwrap();

        assert!(FileSessionStore::new(path).load().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("t.token"));
        store.save(&SecretString::from("x".to_owned())).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn existing_loose_token_file_is_tightened_and_replaced() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.token");
        fs::write(&path, "old-and-longer-token").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileSessionStore::new(&path);
        store.save(&SecretString::from("new".to_owned())).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn keyring_account_is_namespaced_by_profile() {
        let store = KeyringSessionStore::for_profile("staging");
        assert_eq!(store.account, "staging/token");
    }
}

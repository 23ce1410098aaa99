//! File-backed session persistence.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{AuthError, LocalSession};

/// Keeps a [`LocalSession`] in a JSON file between runs.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session; a missing file is an anonymous session.
    pub fn load(&self) -> Result<LocalSession, AuthError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no session file");
                Ok(LocalSession::anonymous())
            }
            Err(source) => Err(self.io_error(source)),
        }
    }

    /// Write the session, creating parent directories as needed.
    pub fn save(&self, session: &LocalSession) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content).map_err(|source| self.io_error(source))
    }

    /// Remove the session file. Removing a missing file is fine.
    pub fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> AuthError {
        AuthError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mobistore_commerce::checkout::AuthContext;

    fn temp_store(name: &str) -> SessionStore {
        let dir = std::env::temp_dir().join(format!("mobistore-auth-{}-{}", name, std::process::id()));
        SessionStore::new(dir.join("session.json"))
    }

    #[test]
    fn test_missing_file_is_anonymous() {
        let store = temp_store("missing");
        let session = store.load().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_save_and_load() {
        let store = temp_store("roundtrip");
        let mut session = LocalSession::anonymous();
        session.login("grace").unwrap();

        store.save(&session).unwrap();
        let loaded = store.load().unwrap();
        store.clear().unwrap();

        assert_eq!(loaded, session);
        assert!(loaded.is_authenticated());
        assert!(!store.load().unwrap().is_authenticated());
    }

    #[test]
    fn test_corrupt_file() {
        let store = temp_store("corrupt");
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "not json").unwrap();

        let err = store.load().unwrap_err();
        store.clear().unwrap();

        assert!(matches!(err, AuthError::Serialization(_)));
    }
}

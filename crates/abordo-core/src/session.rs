//! Driver session and its durable store.
//!
//! The session holds the authenticated driver's identity and bearer token.
//! It is created by a successful login, persisted immediately as one JSON
//! document, loaded once at process start, and destroyed on logout. The
//! store is passed explicitly to whoever needs it; there is no ambient
//! global session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the persisted session document.
const SESSION_FILE: &str = "session.json";

/// The authenticated driver's identity and bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Driver's given name ("nombre").
    pub given_name: String,

    /// Driver's family name ("apellido").
    pub family_name: String,

    /// Bearer token for authenticated API calls.
    pub auth_token: String,
}

impl Session {
    /// Display name used to greet the driver.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

/// Errors from the durable session store.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// The platform data directory could not be determined.
    #[error("Cannot determine data directory for the session store")]
    NoDataDir,

    /// The session file exists but could not be read.
    #[error("Failed to read session from {path}: {source}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The session file could not be written.
    #[error("Failed to write session to {path}: {source}")]
    Write {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The stored document is not a valid session.
    #[error("Stored session is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Durable key-value store for the driver session.
///
/// `load` returns `None` when no session has been saved; `clear` is
/// idempotent. Different targets can substitute their own backend behind
/// this trait.
pub trait SessionStore {
    /// Load the persisted session, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored session exists but cannot be read or
    /// parsed.
    fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    /// Persist the session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be serialized or written.
    fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Remove the persisted session. A no-op when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing session file cannot be removed.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// File-backed session store: one JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by the given file path.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a store at the platform default location
    /// (`~/.local/share/abordo/session.json` or the OS equivalent).
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::NoDataDir`] when the platform data
    /// directory cannot be determined.
    pub fn default_location() -> Result<Self, SessionStoreError> {
        let dirs = directories::ProjectDirs::from("", "", "abordo")
            .ok_or(SessionStoreError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join(SESSION_FILE)))
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| SessionStoreError::Read {
                path: self.path.clone(),
                source,
            })?;
        let session: Session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SessionStoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content).map_err(|source| SessionStoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionStoreError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session {
            given_name: "Juan".into(),
            family_name: "Mejía".into(),
            auth_token: "token-123".into(),
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> FileSessionStore {
        FileSessionStore::new(dir.path().join(SESSION_FILE))
    }

    #[test]
    fn test_load_returns_none_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&sample_session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample_session()));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/dir/session.json"));

        store.save(&sample_session()).unwrap();
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn test_clear_removes_session_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&sample_session()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);

        // Clearing again is a no-op.
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_session_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "not json").unwrap();

        assert!(matches!(
            store.load(),
            Err(SessionStoreError::Parse(_))
        ));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(sample_session().display_name(), "Juan Mejía");
    }
}

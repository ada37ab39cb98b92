// store.rs - SnapshotStore: persistence for the current Session.
//
// The whole session is one JSON file: `<data_dir>/<storage_key>.json`.
// Loading is forgiving: a missing, unreadable, or invalid snapshot means
// "start fresh" rather than an error the user has to deal with.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BingoError;
use crate::session::Session;

/// Persistent store for the session snapshot.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store writing `<data_dir>/<storage_key>.json`.
    /// Creates the directory if it doesn't exist.
    pub fn new(data_dir: impl AsRef<Path>, storage_key: &str) -> Result<Self, BingoError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(|source| BingoError::IoError {
            path: data_dir.display().to_string(),
            source,
        })?;
        Ok(Self {
            path: data_dir.join(format!("{storage_key}.json")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save the session (creates or overwrites).
    pub fn save(&self, session: &Session) -> Result<(), BingoError> {
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json).map_err(|source| BingoError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(())
    }

    /// Save, logging instead of failing.
    pub fn save_best_effort(&self, session: &Session) {
        if let Err(e) = self.save(session) {
            tracing::warn!("failed to save board snapshot: {}", e);
        }
    }

    /// Read the saved session. `Ok(None)` when nothing has been saved;
    /// an error when the file can't be read, parsed, or validated.
    /// The line count and celebration are re-derived from the goals rather
    /// than trusted.
    pub fn load_strict(&self) -> Result<Option<Session>, BingoError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path).map_err(|source| BingoError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;
        let session: Session = serde_json::from_str(&json)?;
        session.validate()?;
        Ok(Some(session.recompute()?))
    }

    /// Read the saved session, or a fresh one if there is none or it is
    /// broken.
    pub fn load(&self) -> Session {
        match self.load_strict() {
            Ok(Some(session)) => session,
            Ok(None) => Session::new(),
            Err(e) => {
                tracing::warn!(
                    "discarding saved state at {}: {}",
                    self.path.display(),
                    e
                );
                Session::new()
            }
        }
    }

    /// Remove the saved snapshot. Returns whether there was one.
    pub fn clear(&self) -> Result<bool, BingoError> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path).map_err(|source| BingoError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(true)
    }
}

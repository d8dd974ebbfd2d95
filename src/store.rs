//! The persisted session blob: one JSON file holding the serialized User.
//!
//! Written on login/logout/submission; read once when a client restores.
//! A missing or unparsable file degrades to "no session" — never an error
//! the caller has to handle.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::domain::User;

const BLOB_FILE: &str = "session.json";

#[derive(Clone, Debug)]
pub struct SessionBlobStore {
  path: PathBuf,
}

impl SessionBlobStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Resolve the blob path from ASCOPE_DATA_PATH, defaulting to ./data.
  pub fn from_env() -> Self {
    let dir = std::env::var("ASCOPE_DATA_PATH").unwrap_or_else(|_| "./data".into());
    Self::new(Path::new(&dir).join(BLOB_FILE))
  }

  /// Read the persisted user. Absence or corruption both yield None.
  pub fn load(&self) -> Option<User> {
    let raw = match std::fs::read_to_string(&self.path) {
      Ok(s) => s,
      Err(_) => return None, // no blob, no session
    };
    match serde_json::from_str::<User>(&raw) {
      Ok(user) => {
        info!(target: "session", path = %self.path.display(), user = %user.id, "Restored persisted session");
        Some(user)
      }
      Err(e) => {
        error!(target: "session", path = %self.path.display(), error = %e, "Persisted session blob unparsable; treating as logged out");
        None
      }
    }
  }

  /// Serialize the complete user object to disk. Failures are logged and
  /// swallowed: persistence is best-effort, the in-memory session wins.
  pub fn save(&self, user: &User) {
    let raw = match serde_json::to_string_pretty(user) {
      Ok(s) => s,
      Err(e) => {
        error!(target: "session", error = %e, "Failed to serialize session blob");
        return;
      }
    };
    if let Some(parent) = self.path.parent() {
      if let Err(e) = std::fs::create_dir_all(parent) {
        error!(target: "session", path = %self.path.display(), error = %e, "Failed to create session data dir");
        return;
      }
    }
    if let Err(e) = std::fs::write(&self.path, raw) {
      error!(target: "session", path = %self.path.display(), error = %e, "Failed to write session blob");
    }
  }

  /// Remove the blob. No-op when nothing is persisted.
  pub fn clear(&self) {
    match std::fs::remove_file(&self.path) {
      Ok(()) => {}
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
      Err(e) => {
        error!(target: "session", path = %self.path.display(), error = %e, "Failed to remove session blob");
      }
    }
  }
}

//! Session token storage.
//!
//! Stores the backend bearer token in `<base>/session.json` with restricted
//! permissions (0600). Tokens are never logged or displayed in full.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Session file contents.
///
/// The bearer token lives under the `authToken` key; an absent key means
/// logged out.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "authToken", skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

/// Handle to the on-disk session store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Opens the store at the default session path.
    pub fn new() -> Self {
        Self {
            path: paths::session_path(),
        }
    }

    /// Opens the store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored token, if any.
    ///
    /// Reads the file fresh on every call; callers must not cache the result
    /// across requests.
    pub fn load_token(&self) -> Result<Option<String>> {
        Ok(self.load()?.auth_token)
    }

    /// Persists the token, replacing any previous one.
    pub fn save_token(&self, token: &str) -> Result<()> {
        let mut session = self.load()?;
        session.auth_token = Some(token.to_string());
        self.save(&session)
    }

    /// Removes the stored token. Returns whether one existed.
    pub fn clear_token(&self) -> Result<bool> {
        let mut session = self.load()?;
        let had_token = session.auth_token.take().is_some();
        self.save(&session)?;
        Ok(had_token)
    }

    /// Loads the session from disk.
    /// Returns an empty session if the file doesn't exist.
    fn load(&self) -> Result<Session> {
        if !self.path.exists() {
            return Ok(Session::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))
    }

    /// Saves the session to disk with restricted permissions (0600).
    fn save(&self, session: &Session) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::fs::OpenOptions;
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;

            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

/// Returns a masked version of a token for display (first 12 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 {
        return "***".to_string();
    }
    format!("{}...", &token[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::at(dir.path().join("session.json"))
    }

    #[test]
    fn load_token_is_none_without_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load_token().unwrap(), None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save_token("abc123").unwrap();
        assert_eq!(store.load_token().unwrap().as_deref(), Some("abc123"));

        // A fresh handle to the same path sees the token (it survives the
        // process that wrote it).
        let reopened = SessionStore::at(store.path());
        assert_eq!(reopened.load_token().unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn save_replaces_previous_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save_token("old").unwrap();
        store.save_token("new").unwrap();
        assert_eq!(store.load_token().unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn clear_token_reports_whether_one_existed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save_token("abc123").unwrap();
        assert!(store.clear_token().unwrap());
        assert_eq!(store.load_token().unwrap(), None);

        // Clearing again is a no-op
        assert!(!store.clear_token().unwrap());
    }

    #[test]
    fn token_is_stored_under_the_auth_token_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save_token("abc123").unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["authToken"], "abc123");
    }

    #[cfg(unix)]
    #[test]
    fn session_file_has_restricted_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save_token("abc123").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn mask_token_never_reveals_short_tokens() {
        assert_eq!(mask_token("short"), "***");
        assert_eq!(mask_token("abcdefghijklmnopqrst"), "abcdefghijkl...");
    }
}

//! Client-side key-value storage scopes and token resolution.
//!
//! Two scopes back the session: a persistent one that survives across runs
//! (JSON file on disk) and a transient one that lives only for the current
//! session. The login surface stores a user record under a fixed key; this
//! module resolves the bearer token out of those records.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

/// Key under which the login surface stores the serialized user record.
pub const USER_KEY: &str = "user";

/// Key for the flag written when the service rejects the session token,
/// consumed by the login surface.
pub const NOT_AUTHORIZED_KEY: &str = "Not Authorized";

/// A key-value storage scope. Values are opaque strings; records are
/// JSON-serialized by whoever writes them.
pub trait StorageScope {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`, if any.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Persistent scope backed by a JSON file.
///
/// The whole map is rewritten on every mutation. Entries written by other
/// surfaces (the login page) are preserved untouched.
pub struct FileScope {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileScope {
    /// Open the scope at `path`, loading existing entries.
    ///
    /// A missing file is an empty scope; a malformed file is treated as empty
    /// rather than an error, so a corrupt store never blocks startup.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            match serde_json::from_str(&content) {
                Ok(map) => map,
                Err(e) => {
                    debug!("Ignoring malformed storage file {:?}: {}", path, e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl StorageScope for FileScope {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Transient scope held in memory for the lifetime of the session.
#[derive(Default)]
pub struct MemoryScope {
    entries: HashMap<String, String>,
}

impl MemoryScope {
    /// Create an empty transient scope.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageScope for MemoryScope {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Shape of the user record written by the login surface. Extra fields are
/// ignored; only the token matters here.
#[derive(Debug, Deserialize)]
struct StoredUser {
    token: String,
}

/// Extract the token from a serialized user record, if it parses.
fn user_token(raw: &str) -> Option<String> {
    match serde_json::from_str::<StoredUser>(raw) {
        Ok(user) => Some(user.token),
        Err(e) => {
            debug!("Ignoring malformed user record: {}", e);
            None
        }
    }
}

/// Resolve the bearer token from the two storage scopes.
///
/// The persistent scope is consulted first; a record in the transient scope
/// overrides it. Neither scope holding a usable record yields the empty
/// string, meaning unauthenticated. Runs once per session; storage changes
/// afterwards are not observed.
pub fn resolve_token(persistent: &dyn StorageScope, transient: &dyn StorageScope) -> String {
    let mut token = String::new();

    if let Some(raw) = persistent.get(USER_KEY) {
        if let Some(t) = user_token(&raw) {
            token = t;
        }
    }
    if let Some(raw) = transient.get(USER_KEY) {
        if let Some(t) = user_token(&raw) {
            token = t;
        }
    }

    token
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope_with_user(token: &str) -> MemoryScope {
        let mut scope = MemoryScope::new();
        scope
            .set(USER_KEY, &format!(r#"{{"token":"{token}","name":"op"}}"#))
            .unwrap();
        scope
    }

    #[test]
    fn test_resolve_token_persistent_only() {
        let persistent = scope_with_user("abc");
        let transient = MemoryScope::new();

        assert_eq!(resolve_token(&persistent, &transient), "abc");
    }

    #[test]
    fn test_resolve_token_transient_overrides_persistent() {
        let persistent = scope_with_user("stale");
        let transient = scope_with_user("fresh");

        assert_eq!(resolve_token(&persistent, &transient), "fresh");
    }

    #[test]
    fn test_resolve_token_neither_scope() {
        assert_eq!(resolve_token(&MemoryScope::new(), &MemoryScope::new()), "");
    }

    #[test]
    fn test_resolve_token_malformed_transient_falls_back() {
        let persistent = scope_with_user("abc");
        let mut transient = MemoryScope::new();
        transient.set(USER_KEY, "not json").unwrap();

        assert_eq!(resolve_token(&persistent, &transient), "abc");
    }

    #[test]
    fn test_file_scope_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        {
            let mut scope = FileScope::open(&path).unwrap();
            scope.set(USER_KEY, r#"{"token":"abc"}"#).unwrap();
            scope.set(NOT_AUTHORIZED_KEY, "true").unwrap();
        }

        let scope = FileScope::open(&path).unwrap();
        assert_eq!(scope.get(USER_KEY).unwrap(), r#"{"token":"abc"}"#);
        assert_eq!(scope.get(NOT_AUTHORIZED_KEY).unwrap(), "true");
    }

    #[test]
    fn test_file_scope_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut scope = FileScope::open(&path).unwrap();
        scope.set(USER_KEY, r#"{"token":"abc"}"#).unwrap();
        scope.remove(USER_KEY).unwrap();

        let reopened = FileScope::open(&path).unwrap();
        assert!(reopened.get(USER_KEY).is_none());
    }

    #[test]
    fn test_file_scope_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{ broken").unwrap();

        let scope = FileScope::open(&path).unwrap();
        assert!(scope.get(USER_KEY).is_none());
    }
}

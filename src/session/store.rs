//! Persistent session store.
//!
//! A single JSON key/value file under the configured state folder holds the
//! three session keys plus a `lastLogin` marker written on login. This is the
//! sole source of truth for authentication state: every other component reads
//! it through `get()` and never touches the file directly. Writes are
//! last-writer-wins; no token format or expiry validation happens locally.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;
use xxhash_rust::xxh3::xxh3_64;

use super::state::{Role, Session};

pub const KEY_TOKEN: &str = "authToken";
pub const KEY_ROLE: &str = "userRole";
pub const KEY_USERNAME: &str = "username";
/// Auxiliary marker set on login; survives `clear()` like the original.
pub const KEY_LAST_LOGIN: &str = "lastLogin";

const STATE_FILE: &str = "session.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("state io: {0}")]
    Io(#[from] std::io::Error),
    #[error("state encode: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Handle to the on-disk session state. Cheap to clone; all state lives in
/// the file itself so concurrent handles in other processes observe writes.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at the given state folder. The folder is created
    /// if it does not already exist.
    pub fn new<P: AsRef<Path>>(state_dir: P) -> Result<Self, StoreError> {
        let dir = state_dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { path: dir.join(STATE_FILE) })
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Read the current session. A missing token key yields an
    /// unauthenticated session regardless of role/username presence; a
    /// missing or unreadable file yields an empty session.
    pub fn get(&self) -> Session {
        let map = self.read_map();
        let token = map.get(KEY_TOKEN).and_then(|v| v.as_str()).map(|s| s.to_string());
        let role = map
            .get(KEY_ROLE)
            .and_then(|v| v.as_str())
            .map(Role::parse)
            .unwrap_or(Role::Unset);
        let username = map.get(KEY_USERNAME).and_then(|v| v.as_str()).map(|s| s.to_string());
        Session { token, role, username }
    }

    /// Write all three session keys plus the login marker. Atomic from the
    /// caller's perspective only: last writer wins.
    pub fn set(&self, session: &Session) -> Result<(), StoreError> {
        let mut map = self.read_map();
        match &session.token {
            Some(t) => { map.insert(KEY_TOKEN.into(), Value::String(t.clone())); }
            None => { map.remove(KEY_TOKEN); }
        }
        map.insert(KEY_ROLE.into(), Value::String(session.role.as_str().to_string()));
        match &session.username {
            Some(u) => { map.insert(KEY_USERNAME.into(), Value::String(u.clone())); }
            None => { map.remove(KEY_USERNAME); }
        }
        map.insert(KEY_LAST_LOGIN.into(), Value::String(chrono::Utc::now().to_rfc3339()));
        self.write_map(&map)?;
        debug!(target: "clientele::session", "session.set user={:?} role={}", session.username, session.role);
        Ok(())
    }

    /// Remove the three session keys. The login marker is left behind, as in
    /// the original storage layout.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut map = self.read_map();
        map.remove(KEY_TOKEN);
        map.remove(KEY_ROLE);
        map.remove(KEY_USERNAME);
        self.write_map(&map)?;
        debug!(target: "clientele::session", "session.clear");
        Ok(())
    }

    /// Content fingerprint of the state file; 0 when absent. Used by the
    /// change notifier to detect writes from other processes.
    pub fn revision(&self) -> u64 {
        match fs::read(&self.path) {
            Ok(bytes) => xxh3_64(&bytes),
            Err(_) => 0,
        }
    }

    fn read_map(&self) -> BTreeMap<String, Value> {
        let Ok(bytes) = fs::read(&self.path) else { return BTreeMap::new(); };
        match serde_json::from_slice::<BTreeMap<String, Value>>(&bytes) {
            Ok(m) => m,
            Err(e) => {
                debug!(target: "clientele::session", "unreadable state file, treating as empty: {}", e);
                BTreeMap::new()
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, Value>) -> Result<(), StoreError> {
        fs::write(&self.path, serde_json::to_string_pretty(map)?)?;
        Ok(())
    }
}

//! Session state and token persistence

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::warn;

use super::types::Profile;

/// Durable storage for the bearer token, surviving process restarts the way
/// browser local storage survives reloads.
pub trait TokenStore: Send + Sync {
    /// Load the persisted token, if any
    fn load(&self) -> Option<String>;

    /// Persist a token
    fn save(&self, token: &str);

    /// Remove the persisted token
    fn clear(&self);
}

/// Token store that keeps the token in memory only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap() = None;
    }
}

/// Token store backed by a file on disk.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(_) => None,
        }
    }

    fn save(&self, token: &str) {
        if let Err(err) = std::fs::write(&self.path, token) {
            warn!(path = %self.path.display(), %err, "failed to persist token");
        }
    }

    fn clear(&self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %err, "failed to clear token");
            }
        }
    }
}

/// In-memory session state: the bearer token and the profile fetched for it.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    pub token: Option<String>,
    pub profile: Option<Profile>,
}

/// Read-only view of the session, cloned into every resource client.
///
/// `Auth` is the only writer; everyone else observes the token through this
/// handle. That keeps single-source-of-truth semantics without a
/// module-level global.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    state: Arc<Mutex<SessionState>>,
}

impl SessionHandle {
    pub(crate) fn new(state: Arc<Mutex<SessionState>>) -> Self {
        Self { state }
    }

    /// The current bearer token, if a session is active
    pub fn token(&self) -> Option<String> {
        self.state.lock().unwrap().token.clone()
    }

    /// The current user's profile, if it has been fetched
    pub fn profile(&self) -> Option<Profile> {
        self.state.lock().unwrap().profile.clone()
    }

    /// Whether a token is present
    pub fn is_authenticated(&self) -> bool {
        self.state.lock().unwrap().token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));

        assert_eq!(store.load(), None);
        store.save("abc123");
        assert_eq!(store.load(), Some("abc123".to_string()));
        store.clear();
        assert_eq!(store.load(), None);
        // clearing twice is fine
        store.clear();
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load(), None);
        store.save("tok");
        assert_eq!(store.load(), Some("tok".to_string()));
        store.clear();
        assert_eq!(store.load(), None);
    }
}

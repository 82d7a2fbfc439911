//! Session and token persistence
//!
//! The bearer token lives in a [`TokenStore`] owned by a [`Session`]. The
//! session is a cheap cloneable handle injected into the HTTP client, so
//! tests and multiple in-process users never share a token by accident.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::error::ClientResult;

/// Fixed storage key of the persisted token
pub const TOKEN_KEY: &str = "agenda_token";

/// Persistent storage for the bearer token.
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Stored token, if any
    fn load(&self) -> ClientResult<Option<String>>;

    /// Store a token; `None` removes it
    fn save(&self, token: Option<&str>) -> ClientResult<()>;
}

// ============================================================================
// Memory store
// ============================================================================

/// In-memory token store (nothing survives the process).
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> ClientResult<Option<String>> {
        Ok(self.token.read().clone())
    }

    fn save(&self, token: Option<&str>) -> ClientResult<()> {
        *self.token.write() = token.map(str::to_string);
        Ok(())
    }
}

// ============================================================================
// File store
// ============================================================================

/// JSON file store: `{ "agenda_token": "<token>" }`.
///
/// Other keys in the file are preserved on write.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> ClientResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> ClientResult<Option<String>> {
        let map = self.read_map()?;
        Ok(map
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string))
    }

    fn save(&self, token: Option<&str>) -> ClientResult<()> {
        let mut map = self.read_map()?;
        match token {
            Some(token) => {
                map.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
            }
            None => {
                map.remove(TOKEN_KEY);
            }
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(map))?)?;
        Ok(())
    }
}

// ============================================================================
// Session
// ============================================================================

/// Authentication session shared by the HTTP client and the front end.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Session backed by memory only.
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// Session persisted to `path` when given, memory otherwise.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::new(FileTokenStore::new(path)),
            None => Self::in_memory(),
        }
    }

    /// Current token. Storage failures read as "no token".
    pub fn token(&self) -> Option<String> {
        match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token");
                None
            }
        }
    }

    pub fn set_token(&self, token: Option<&str>) -> ClientResult<()> {
        self.store.save(token)
    }

    /// Forced logout: drop the stored token.
    pub fn clear(&self) {
        if let Err(e) = self.store.save(None) {
            tracing::warn!(error = %e, "Failed to clear stored token");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, RwLock},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::ClientError;

/// Bearer token plus the id of the voter it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: u64,
}

impl Session {
    pub fn new(token: impl Into<String>, user_id: u64) -> Self {
        Self { token: token.into(), user_id }
    }
}

/// Persistence behind a [`SessionContext`].
pub trait SessionStore: Send + Sync {
    /// Reads the persisted session, if any.
    fn init(&self) -> Result<Option<Session>, ClientError>;
    fn set(&self, session: &Session) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self { inner: Mutex::new(Some(session)) }
    }
}

impl SessionStore for MemorySessionStore {
    fn init(&self) -> Result<Option<Session>, ClientError> {
        Ok(self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn set(&self, session: &Session) -> Result<(), ClientError> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Stores the session as a small JSON document: `{"token": ..., "userId": ...}`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn init(&self) -> Result<Option<Session>, ClientError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // An unreadable session file is treated like a logged-out state.
        match serde_json::from_str::<Session>(&data) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!("Ignoring malformed session file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    fn set(&self, session: &Session) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        debug!("Session stored at {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// The session handle pages and the API client share.
///
/// Wraps a [`SessionStore`] and keeps the current value cached so reads never
/// touch the store.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    /// Loads whatever the store holds and wraps it.
    pub fn init(store: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let current = store.init()?;
        Ok(Self { store, current: Arc::new(RwLock::new(current)) })
    }

    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemorySessionStore::new()),
            current: Arc::new(RwLock::new(None)),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token).filter(|t| !t.is_empty())
    }

    pub fn user_id(&self) -> Option<u64> {
        self.current().map(|s| s.user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// The session, or [`ClientError::MissingSession`] when logged out.
    pub fn require(&self) -> Result<Session, ClientError> {
        self.current()
            .filter(|s| !s.token.is_empty())
            .ok_or(ClientError::MissingSession)
    }

    pub fn set(&self, session: Session) -> Result<(), ClientError> {
        self.store.set(&session)?;
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(session);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        self.store.clear()?;
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

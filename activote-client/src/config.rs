use std::{fs, io, path::{Path, PathBuf}, time::Duration};

use serde::{Deserialize, Serialize};

use crate::errors::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_SESSION_PATH: &str = ".activote/session.json";
pub const DEFAULT_LEDGER_SETTLE_MS: u64 = 2_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base address of the voting API, including the `/api` prefix.
    pub api_url: String,
    /// Where the session (token + user id) is persisted between runs.
    pub session_path: PathBuf,
    /// Time given to the backend to append the block after a vote before the
    /// ledger is re-fetched.
    pub ledger_settle_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            ledger_settle_ms: DEFAULT_LEDGER_SETTLE_MS,
        }
    }
}

impl ClientConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str::<ClientConfig>(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Loads `path` when it exists, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        if let Some(parent) = path.as_ref().parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "api_url must be an http(s) address, got '{}'",
                self.api_url
            )));
        }
        Ok(())
    }

    /// Full URL for an API path such as `voters/login`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Scheme and authority of the backend, used to resolve `/uploads/...` images.
    pub fn origin(&self) -> String {
        let base = self.api_url.trim().trim_end_matches('/');
        base.strip_suffix("/api").unwrap_or(base).to_string()
    }

    pub fn ledger_settle(&self) -> Duration {
        Duration::from_millis(self.ledger_settle_ms)
    }
}

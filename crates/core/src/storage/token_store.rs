use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::errors::CoreError;

/// Where the bearer token lives between runs.
///
/// Exactly one strategy is active at a time: the file-backed store for
/// production, the in-memory store for tests and ephemeral sessions. The
/// two are never mixed.
pub trait TokenStore: Send + Sync {
    /// The persisted token, if any. A missing or unreadable record is
    /// `Ok(None)` — an unreadable session file is discarded, not fatal.
    fn load(&self) -> Result<Option<String>, CoreError>;

    fn save(&self, token: &str) -> Result<(), CoreError>;

    /// Remove the persisted token. Idempotent.
    fn clear(&self) -> Result<(), CoreError>;
}

/// On-disk record. The field name is the well-known storage key.
#[derive(Serialize, Deserialize)]
struct TokenRecord {
    access_token: String,
}

/// JSON-file-backed [`TokenStore`].
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default session-file location under the platform data directory.
    pub fn default_path() -> Result<PathBuf, CoreError> {
        let dirs = ProjectDirs::from("", "", "mtaa-hustle").ok_or_else(|| {
            CoreError::Storage("could not determine a platform data directory".into())
        })?;
        Ok(dirs.data_dir().join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, CoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<TokenRecord>(&raw) {
            Ok(record) if !record.access_token.is_empty() => Ok(Some(record.access_token)),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!("discarding unreadable session file: {e}");
                Ok(None)
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let record = TokenRecord {
            access_token: token.to_string(),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&record)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory [`TokenStore`] for tests and ephemeral sessions — nothing
/// survives the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start pre-populated, as if a token had been persisted earlier.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, CoreError> {
        Ok(self
            .token
            .lock()
            .map_err(|_| CoreError::Storage("token store lock poisoned".into()))?
            .clone())
    }

    fn save(&self, token: &str) -> Result<(), CoreError> {
        *self
            .token
            .lock()
            .map_err(|_| CoreError::Storage("token store lock poisoned".into()))? =
            Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        *self
            .token
            .lock()
            .map_err(|_| CoreError::Storage("token store lock poisoned".into()))? = None;
        Ok(())
    }
}

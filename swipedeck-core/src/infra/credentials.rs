//! Credential storage
//!
//! The deck reads the stored token once at startup, saves it after a
//! successful load and clears it when the platform rejects it. The token
//! itself is held in zeroizing memory and never printed.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::config::APP_NAME;
use crate::error::StorageError;

pub(crate) const CREDENTIAL_FILE: &str = "credential.json";

/// Bearer token for the platform API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(Zeroizing<String>);

impl Credential {
    /// Accepts user input, trimming whitespace. Blank input yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(Zeroizing::new(trimmed.to_string())))
        }
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Where the session keeps its token between runs.
pub trait CredentialStore: Send + Sync + fmt::Debug {
    fn load(&self) -> Result<Option<Credential>, StorageError>;

    fn save(&self, credential: &Credential) -> Result<(), StorageError>;

    fn clear(&self) -> Result<(), StorageError>;
}

#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
struct StoredCredential {
    token: String,
    #[zeroize(skip)]
    stored_at: DateTime<Utc>,
}

/// JSON file in the platform data directory, owner-readable only.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from("", APP_NAME, APP_NAME)
            .ok_or(StorageError::NoDataDir)?;
        Ok(Self::with_path(dirs.data_dir().join(CREDENTIAL_FILE)))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = Zeroizing::new(
            std::fs::read_to_string(&self.path)
                .map_err(StorageError::ReadFailed)?,
        );
        let stored: StoredCredential = serde_json::from_str(&data)
            .map_err(StorageError::CorruptedData)?;
        log::debug!(
            "[CredentialStore] Loaded credential stored at {}",
            stored.stored_at
        );
        Ok(Credential::parse(&stored.token))
    }

    fn save(&self, credential: &Credential) -> Result<(), StorageError> {
        let stored = StoredCredential {
            token: credential.expose().to_string(),
            stored_at: Utc::now(),
        };
        let json = Zeroizing::new(
            serde_json::to_string_pretty(&stored)
                .map_err(StorageError::CorruptedData)?,
        );
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(StorageError::WriteFailed)?;
        }
        std::fs::write(&self.path, json.as_bytes())
            .map_err(StorageError::WriteFailed)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, perms)
                .map_err(StorageError::WriteFailed)?;
        }
        log::debug!("[CredentialStore] Saved credential to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("[CredentialStore] Cleared stored credential");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::WriteFailed(e)),
        }
    }
}

/// Process-local store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            inner: Mutex::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>, StorageError> {
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, credential: &Credential) -> Result<(), StorageError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

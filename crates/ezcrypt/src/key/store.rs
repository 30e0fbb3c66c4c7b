//! [`KeyStore`]: loads, generates, and persists the key file.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::KeyPair;
use crate::random::RandomError;

/// Default key file name, resolved against the working directory.
pub const KEY_FILE_NAME: &str = ".ezKeys";

/// Unix permission bits applied to the key file (owner read/write only).
pub const KEY_FILE_MODE: u32 = 0o600;

/// Errors produced by the key store.
///
/// [`KeyStoreError::Read`] and [`KeyStoreError::Parse`] are recovered inside
/// [`KeyStore::initialize`]; the others propagate to the caller.
#[derive(Debug, Error)]
pub enum KeyStoreError {
    /// The key file exists but could not be read.
    #[error("failed to read key file {}: {source}", .path.display())]
    Read {
        /// Key file location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The key file contents are not a valid key pair.
    #[error("failed to parse key file {}: {reason}", .path.display())]
    Parse {
        /// Key file location.
        path: PathBuf,
        /// What was wrong with the contents.
        reason: String,
    },

    /// The key file could not be written (disk full, permission denied, ...).
    #[error("failed to write key file {}: {source}", .path.display())]
    Write {
        /// Key file location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Key generation could not draw secure random bytes.
    #[error(transparent)]
    Random(#[from] RandomError),
}

/// File-backed store for the process key pair.
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the key file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted key pair, or generate and persist a new one.
    ///
    /// A missing file yields a fresh pair. An unreadable or malformed file is
    /// discarded and replaced with a fresh pair. Only write and random-source
    /// failures reach the caller.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::Write`] if a new pair cannot be persisted, or
    /// [`KeyStoreError::Random`] if one cannot be generated.
    pub fn initialize(&self) -> Result<KeyPair, KeyStoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "key file absent");
            return self.regenerate();
        }

        match self.load() {
            Ok(pair) => {
                debug!(path = %self.path.display(), "key pair loaded");
                Ok(pair)
            }
            Err(e @ (KeyStoreError::Read { .. } | KeyStoreError::Parse { .. })) => {
                warn!(error = %e, "discarding unusable key file; regenerating");
                self.regenerate()
            }
            Err(e) => Err(e),
        }
    }

    /// Read and parse the key file.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::Read`] on I/O failure and
    /// [`KeyStoreError::Parse`] if the JSON is invalid or either key has the
    /// wrong length or is not hex.
    pub fn load(&self) -> Result<KeyPair, KeyStoreError> {
        let data = std::fs::read_to_string(&self.path).map_err(|source| KeyStoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        let pair: KeyPair = serde_json::from_str(&data).map_err(|e| KeyStoreError::Parse {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        if !pair.is_well_formed() {
            return Err(KeyStoreError::Parse {
                path: self.path.clone(),
                reason: "key material has the wrong length or is not hex".into(),
            });
        }
        Ok(pair)
    }

    /// Write `pair` to the key file as JSON, owner read/write only.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::Write`] on any I/O failure.
    pub fn persist(&self, pair: &KeyPair) -> Result<(), KeyStoreError> {
        serde_json::to_vec(pair)
            .map_err(io::Error::from)
            .and_then(|json| write_owner_only(&self.path, &json))
            .map_err(|source| KeyStoreError::Write {
                path: self.path.clone(),
                source,
            })
    }

    fn regenerate(&self) -> Result<KeyPair, KeyStoreError> {
        let pair = KeyPair::generate()?;
        self.persist(&pair)?;
        info!(path = %self.path.display(), "generated and persisted new key pair");
        Ok(pair)
    }
}

impl Default for KeyStore {
    /// A store backed by [`KEY_FILE_NAME`] in the working directory.
    fn default() -> Self {
        Self::new(KEY_FILE_NAME)
    }
}

fn write_owner_only(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(KEY_FILE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()?;

    // `mode` only applies on creation; tighten a pre-existing file too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(KEY_FILE_MODE))?;
    }
    Ok(())
}

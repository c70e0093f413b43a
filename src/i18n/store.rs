//! Persisted language selection guarded by a side-channel digest.
//!
//! The snapshot file holds only `{"language": "..."}`. Its SHA-256 digest is
//! written to a [`TrustAnchor`], a small key/value settings store kept apart
//! from the snapshot. On restore the digest is recomputed over the exact
//! bytes on disk; a mismatch means the file was corrupted or edited outside
//! this store, and the snapshot is discarded.

use crate::i18n::LanguageCode;
use crate::security::{digest_matches, sha256_hex};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Durable record of the active language selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub language: LanguageCode,
}

/// Outcome of a restore attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restore {
    /// Digest matched and the snapshot decoded.
    Restored(PersistedSnapshot),
    /// Nothing persisted yet.
    Absent,
    /// Snapshot present but untrusted.
    Corrupted,
}

#[derive(Debug, Error)]
pub enum AnchorError {
    #[error("settings store {path} I/O failed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings store {path} is not a JSON object of strings: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to record snapshot digest: {0}")]
    Anchor(#[from] AnchorError),
}

/// Small string-valued settings store holding the snapshot digest.
pub trait TrustAnchor {
    fn get_string(&self, key: &str) -> Result<Option<String>, AnchorError>;
    fn set_string(&mut self, key: &str, value: &str) -> Result<(), AnchorError>;
}

/// Settings persisted as a flat JSON object in a single file.
#[derive(Debug, Clone)]
pub struct PrefsFile {
    path: PathBuf,
}

impl PrefsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, AnchorError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(AnchorError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&text).map_err(|source| AnchorError::Format {
            path: self.path.clone(),
            source,
        })
    }
}

impl TrustAnchor for PrefsFile {
    fn get_string(&self, key: &str) -> Result<Option<String>, AnchorError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), AnchorError> {
        let io_err = |source| AnchorError::Io {
            path: self.path.clone(),
            source,
        };

        // Garbled prefs are replaced; an unreadable file is left alone
        let mut prefs = match self.read_all() {
            Ok(prefs) => prefs,
            Err(e @ AnchorError::Format { .. }) => {
                warn!("Resetting settings store: {}", e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        prefs.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(&prefs).map_err(|source| AnchorError::Format {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, text).map_err(io_err)
    }
}

/// In-process settings; clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrustAnchor for MemoryPrefs {
    fn get_string(&self, key: &str) -> Result<Option<String>, AnchorError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), AnchorError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Writes and reads the snapshot file together with its anchor digest.
pub struct SnapshotStore {
    dir: PathBuf,
    file_name: String,
    anchor: Box<dyn TrustAnchor>,
    anchor_key: String,
}

impl SnapshotStore {
    pub fn new(
        dir: impl Into<PathBuf>,
        file_name: impl Into<String>,
        anchor: Box<dyn TrustAnchor>,
        anchor_key: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
            anchor,
            anchor_key: anchor_key.into(),
        }
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Serialize `snapshot`, record its digest in the anchor, then write it.
    pub fn persist(&mut self, snapshot: &PersistedSnapshot) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let bytes = serde_json::to_vec(snapshot)?;
        let digest = sha256_hex(&bytes);
        self.anchor.set_string(&self.anchor_key, &digest)?;

        let path = self.snapshot_path();
        fs::write(&path, &bytes).map_err(|source| StoreError::Write { path, source })?;

        info!("Persisted language selection '{}'", snapshot.language);
        Ok(())
    }

    /// Read back the snapshot, trusting it only if its digest matches.
    pub fn restore(&self) -> Restore {
        let path = self.snapshot_path();
        if !self.dir.is_dir() || !path.is_file() {
            debug!("No persisted language selection at {}", path.display());
            return Restore::Absent;
        }

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return Restore::Corrupted;
            }
        };

        let expected = match self.anchor.get_string(&self.anchor_key) {
            Ok(Some(digest)) => digest,
            Ok(None) => {
                warn!("Snapshot {} has no recorded digest", path.display());
                return Restore::Corrupted;
            }
            Err(e) => {
                warn!("Failed to read snapshot digest: {}", e);
                return Restore::Corrupted;
            }
        };

        if !digest_matches(&bytes, &expected) {
            warn!("Snapshot digest mismatch, discarding {}", path.display());
            return Restore::Corrupted;
        }

        match serde_json::from_slice::<PersistedSnapshot>(&bytes) {
            Ok(snapshot) => Restore::Restored(snapshot),
            Err(e) => {
                warn!("Snapshot {} does not decode: {}", path.display(), e);
                Restore::Corrupted
            }
        }
    }
}

//! Read-through JSON document cache keyed by file modification time
//!
//! Documents are re-read on every screen refresh, so parsed values are kept
//! in memory and only re-parsed when the file's mtime changes. A successful
//! [`DocumentCache::put`] evicts the entry for its path, so the next read
//! re-derives the value (and its mtime) from disk even when the filesystem's
//! timestamp resolution is too coarse to notice the write.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

/// Shape of every per-record-type document: user id -> that user's data
pub type PerUser<T> = BTreeMap<String, T>;

/// A parsed document and the mtime it was read at
#[derive(Debug, Clone)]
struct CacheEntry {
    document: Value,
    observed_mtime: SystemTime,
}

/// Process-wide document cache, shared by the stores through an `Arc`
#[derive(Debug, Default)]
pub struct DocumentCache {
    entries: RwLock<HashMap<PathBuf, CacheEntry>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the raw document at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist. A parse failure is
    /// reported as [`Error::CorruptDocument`] and leaves the cache untouched.
    pub fn get(&self, path: &Path) -> Result<Option<Value>> {
        let mtime = match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(mtime) => mtime,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.invalidate(path);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = entries.get(path) {
                if entry.observed_mtime == mtime {
                    return Ok(Some(entry.document.clone()));
                }
            }
        }

        let data = std::fs::read_to_string(path)?;
        let document: Value = match serde_json::from_str(&data) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", path.display(), e);
                return Err(Error::corrupt(path, e));
            }
        };

        tracing::debug!("Loaded {} into cache", path.display());
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                path.to_path_buf(),
                CacheEntry {
                    document: document.clone(),
                    observed_mtime: mtime,
                },
            );

        Ok(Some(document))
    }

    /// Read and deserialize the document at `path`.
    ///
    /// Valid JSON that does not match `T` is also reported as
    /// [`Error::CorruptDocument`].
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        match self.get(path)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| {
                    tracing::warn!("Unexpected document shape in {}: {}", path.display(), e);
                    Error::corrupt(path, e)
                }),
            None => Ok(None),
        }
    }

    /// Like [`load`](Self::load), but falls back to `default` when the file
    /// is absent or unreadable. Failures are logged, never returned.
    pub fn load_or<T: DeserializeOwned>(&self, path: &Path, default: T) -> T {
        match self.load(path) {
            Ok(Some(document)) => document,
            Ok(None) => default,
            Err(e) => {
                tracing::warn!("{}", e.record_notice());
                default
            }
        }
    }

    /// Serialize `document` to `path` and evict its cache entry.
    ///
    /// The document is written to a sibling temp file and renamed into
    /// place, so a failed write never truncates the previous content. On
    /// failure the cache entry is kept as the last known-good value.
    pub fn put<T: Serialize + ?Sized>(&self, path: &Path, document: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(document).map_err(|e| {
            tracing::warn!("Failed to serialize {}: {}", path.display(), e);
            Error::write_failure(path, std::io::ErrorKind::InvalidData, e)
        })?;

        if let Err(e) = write_atomic(path, json.as_bytes()) {
            tracing::warn!("Failed to write {}: {}", path.display(), e);
            return Err(Error::write_failure(path, e.kind(), e));
        }

        self.invalidate(path);
        tracing::debug!("Saved {}", path.display());
        Ok(())
    }

    /// Drop the cache entry for `path`, if any
    pub fn invalidate(&self, path: &Path) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
    }

    /// Drop every cache entry
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached documents
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }
}

/// Write `bytes` to a temp file next to `path`, then rename it over `path`.
///
/// The temp name is unique per call so overlapping writers never share it.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let temp_path = dir.join(format!(".{}.tmp.{}", file_name, uuid::Uuid::new_v4().simple()));

    let result = write_and_rename(&temp_path, path, bytes);
    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    result
}

fn write_and_rename(temp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(temp_path, path)
}

//! Content-addressed file store for filtered assets.
//!
//! Store entries live directly in the store directory as
//! `{hash}.cache.{kind}` and hold the asset bytes verbatim, so a web server
//! can serve them without any unwrapping. The store never interprets
//! content; the key is derived from it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use strata_common::ContentHash;

use crate::error::StoreError;

/// Infix separating the hash from the asset kind in store file names.
const STORE_INFIX: &str = ".cache.";

/// Durable key/value byte store keyed by `(content hash, asset kind)`.
///
/// Writes are full-buffer overwrites. Because the key is derived from the
/// content, two writers computing the same hash write byte-identical data,
/// so last-writer-wins is idempotent and safe without locking.
#[derive(Debug)]
pub struct ContentStore {
    /// Backing directory; validated at construction.
    dir: PathBuf,
}

impl ContentStore {
    /// Opens a store over the given directory.
    ///
    /// Fails with [`StoreError::Configuration`] if the path is not an
    /// existing, writable directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        let meta = std::fs::metadata(&dir).map_err(|_| StoreError::Configuration {
            path: dir.clone(),
            reason: "store directory does not exist".to_string(),
        })?;
        if !meta.is_dir() {
            return Err(StoreError::Configuration {
                path: dir,
                reason: "store path is not a directory".to_string(),
            });
        }
        if meta.permissions().readonly() {
            return Err(StoreError::Configuration {
                path: dir,
                reason: "store directory is not writable".to_string(),
            });
        }
        Ok(Self { dir })
    }

    /// The backing directory.
    pub fn directory(&self) -> &Path {
        &self.dir
    }

    /// Derives the store path for `(hash, kind)`: `{dir}/{hash}.cache.{kind}`.
    ///
    /// Pure and injective; never consults the filesystem.
    pub fn entry_path(&self, hash: ContentHash, kind: &str) -> PathBuf {
        self.dir.join(format!("{hash}{STORE_INFIX}{kind}"))
    }

    /// Writes an entry by full-buffer overwrite and returns its path.
    pub fn write(
        &self,
        hash: ContentHash,
        kind: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StoreError> {
        let path = self.entry_path(hash, kind);
        std::fs::write(&path, bytes).map_err(|e| StoreError::Io {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    /// Reads an entry's bytes, failing with [`StoreError::NotFound`] if absent.
    pub fn read(&self, hash: ContentHash, kind: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.entry_path(hash, kind);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound { path })
            }
            Err(e) => Err(StoreError::Io { path, source: e }),
        }
    }

    /// Returns whether an entry exists for `(hash, kind)`.
    pub fn exists(&self, hash: ContentHash, kind: &str) -> bool {
        self.entry_path(hash, kind).is_file()
    }

    /// Deletes an entry. Deleting an absent entry is a no-op, never an error.
    pub fn delete(&self, hash: ContentHash, kind: &str) -> Result<(), StoreError> {
        let path = self.entry_path(hash, kind);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io { path, source: e }),
        }
    }

    /// Removes every store entry, returning the count of deleted files.
    ///
    /// Only files matching the `{hash}.cache.{kind}` shape are touched;
    /// the catalog snapshot and anything else in the directory survive.
    pub fn clear(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for (path, _) in self.scan_entries()? {
            std::fs::remove_file(&path).map_err(|e| StoreError::Io {
                path: path.clone(),
                source: e,
            })?;
            removed += 1;
        }
        Ok(removed)
    }

    /// Removes store entries whose hash is not in `live`, returning the count.
    ///
    /// This is the bulk complement to the catalog's per-add stale eviction:
    /// anything on disk that no catalog entry claims is reclaimed.
    pub fn sweep(&self, live: &HashSet<ContentHash>) -> Result<usize, StoreError> {
        let mut removed = 0;
        for (path, hash) in self.scan_entries()? {
            if !live.contains(&hash) {
                std::fs::remove_file(&path).map_err(|e| StoreError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Lists `(path, hash)` for every well-formed store entry in the directory.
    fn scan_entries(&self) -> Result<Vec<(PathBuf, ContentHash)>, StoreError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| StoreError::Io {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Io {
                path: self.dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some((stem, _kind)) = name.split_once(STORE_INFIX) else {
                continue;
            };
            if let Ok(hash) = stem.parse::<ContentHash>() {
                found.push((path, hash));
            }
        }
        Ok(found)
    }
}

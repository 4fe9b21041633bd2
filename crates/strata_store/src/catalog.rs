//! Durable catalog of live hash → location mappings.
//!
//! The catalog is a single JSON snapshot, `catalog.json`, living in the
//! store directory. It maps each live content hash to the source file it
//! was derived from and the store file backing it, so that a changed source
//! file's superseded store entry can be found and reclaimed.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strata_common::ContentHash;

use crate::error::StoreError;
use crate::resource::Resource;
use crate::store::ContentStore;

/// Name of the catalog snapshot file within the store directory.
pub const CATALOG_FILE: &str = "catalog.json";

/// One catalog record: where a hash came from and where its bytes live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Originating source file; `None` for combined artifacts.
    pub filepath: Option<PathBuf>,
    /// Backing store file.
    pub storepath: PathBuf,
}

/// Durable index of which hashes are currently live for one store directory.
///
/// Loaded once from its snapshot, mutated in memory, and flushed explicitly.
/// The raw loaded bytes are kept so that [`Catalog::flush`] can skip the
/// write when nothing changed.
pub struct Catalog {
    /// Store directory holding the snapshot file.
    store_dir: PathBuf,
    /// Live mappings, ordered for a stable serialized form.
    entries: BTreeMap<ContentHash, CatalogEntry>,
    /// Serialized form as loaded from disk, for dirty-checking.
    loaded: Option<String>,
}

impl Catalog {
    /// Loads the catalog snapshot from `{store_dir}/catalog.json`.
    ///
    /// A missing or unparseable snapshot yields an empty catalog; corruption
    /// costs cached entries, never a startup failure.
    pub fn load(store_dir: &Path) -> Self {
        let mut catalog = Self {
            store_dir: store_dir.to_path_buf(),
            entries: BTreeMap::new(),
            loaded: None,
        };
        catalog.read_snapshot();
        catalog
    }

    /// Full path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.store_dir.join(CATALOG_FILE)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The record for a hash, if live.
    pub fn entry(&self, hash: ContentHash) -> Option<&CatalogEntry> {
        self.entries.get(&hash)
    }

    /// The set of all live hashes, for store sweeps.
    pub fn live_hashes(&self) -> HashSet<ContentHash> {
        self.entries.keys().copied().collect()
    }

    /// Iterates over `(hash, entry)` pairs in hash order.
    pub fn iter(&self) -> impl Iterator<Item = (ContentHash, &CatalogEntry)> {
        self.entries.iter().map(|(h, e)| (*h, e))
    }

    /// Records a resolved source resource, reclaiming any stale predecessor.
    ///
    /// If some other hash is already catalogued for the same source file,
    /// that entry is superseded: it is dropped from the catalog and its
    /// backing store file is deleted before the new mapping is inserted.
    pub fn add(&mut self, resource: &Resource, store: &ContentStore) -> Result<(), StoreError> {
        if let Some(old) = self.contains(resource) {
            if old != resource.hash() {
                self.entries.remove(&old);
                store.delete(old, resource.kind())?;
            }
        }
        self.entries.insert(
            resource.hash(),
            CatalogEntry {
                filepath: resource.source_path().map(Path::to_path_buf),
                storepath: store.entry_path(resource.hash(), resource.kind()),
            },
        );
        Ok(())
    }

    /// Records a combined artifact.
    ///
    /// Aggregates have no source file, so there is no staleness sweep; an
    /// aggregate's store path embeds its hash and a changed member set simply
    /// produces a new entry. Superseded aggregates are reclaimed by sweeps.
    pub fn add_combined(&mut self, resource: &Resource, store: &ContentStore) {
        self.entries.insert(
            resource.hash(),
            CatalogEntry {
                filepath: None,
                storepath: store.entry_path(resource.hash(), resource.kind()),
            },
        );
    }

    /// Removes the entry matching this resource's path pair, if any.
    pub fn remove(&mut self, resource: &Resource) {
        if let Some(hash) = self.contains(resource) {
            self.entries.remove(&hash);
        }
    }

    /// Reverse lookup: the hash currently catalogued for this resource's
    /// path pair, which may differ from the resource's own hash.
    ///
    /// A differing hash signals staleness. For plain resources the source
    /// path identifies the pair; the store path tracks the hash and moves on
    /// every content change. For aggregates the store file name is the whole
    /// identity.
    pub fn contains(&self, resource: &Resource) -> Option<ContentHash> {
        let store_name = resource.store_file_name();
        self.entries.iter().find_map(|(hash, entry)| {
            let matched = match (&entry.filepath, resource.source_path()) {
                (Some(catalogued), Some(source)) => catalogued == source,
                (None, None) => {
                    entry.storepath.file_name().and_then(|n| n.to_str())
                        == Some(store_name.as_str())
                }
                _ => false,
            };
            matched.then_some(*hash)
        })
    }

    /// Drops every entry. The next [`Catalog::flush`] persists the empty map.
    pub fn clear_entries(&mut self) {
        self.entries.clear();
    }

    /// Writes the snapshot if, and only if, it changed since load.
    ///
    /// The write goes through a temp file in the store directory followed by
    /// a rename, so concurrent readers never observe a partial snapshot.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            StoreError::Serialization {
                reason: e.to_string(),
            }
        })?;

        // Unchanged since load, or nothing was ever catalogued.
        if self.loaded.as_deref() == Some(json.as_str())
            || (self.loaded.is_none() && self.entries.is_empty())
        {
            return Ok(());
        }

        let path = self.snapshot_path();
        let tmp = tempfile::NamedTempFile::new_in(&self.store_dir).map_err(|e| StoreError::Io {
            path: self.store_dir.clone(),
            source: e,
        })?;
        std::fs::write(tmp.path(), &json).map_err(|e| StoreError::Io {
            path: tmp.path().to_path_buf(),
            source: e,
        })?;
        tmp.persist(&path).map_err(|e| StoreError::Io {
            path: path.clone(),
            source: e.error,
        })?;

        self.loaded = Some(json);
        Ok(())
    }

    /// Re-points the catalog at a new store directory and reloads.
    ///
    /// Unsaved in-memory state is discarded; callers that care flush first.
    pub fn retarget(&mut self, new_store_dir: &Path) {
        self.store_dir = new_store_dir.to_path_buf();
        self.entries.clear();
        self.loaded = None;
        self.read_snapshot();
    }

    fn read_snapshot(&mut self) {
        let Ok(raw) = std::fs::read_to_string(self.snapshot_path()) else {
            return;
        };
        if let Ok(entries) = serde_json::from_str(&raw) {
            self.entries = entries;
            self.loaded = Some(raw);
        }
    }
}

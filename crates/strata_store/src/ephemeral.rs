//! Ephemeral resource cache contract and in-process implementations.
//!
//! The ephemeral tier sits in front of the content store and holds fully
//! materialized [`Resource`] values keyed by content hash. Implementations
//! are swapped by configuration behind one trait; the pipeline works
//! correctly (just slower) with the null variant.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use strata_common::ContentHash;

use crate::resource::Resource;

/// Fast, possibly short-lived cache of materialized resources.
///
/// `fetch` hands out an independent clone, never a shared view: mutating a
/// fetched resource does not affect the cached copy. A lifetime of `0`
/// seconds means no expiry; implementations that do not track lifetimes
/// ignore the parameter.
pub trait ResourceCache {
    /// Returns whether a live entry exists for the key.
    fn contains(&self, key: &ContentHash) -> bool;

    /// Returns a snapshot of the cached resource, or `None` on a miss.
    fn fetch(&self, key: &ContentHash) -> Option<Resource>;

    /// Stores a resource under the key. Returns whether it was stored.
    fn save(&mut self, key: ContentHash, resource: Resource, lifetime_secs: u64) -> bool;

    /// Drops the entry for the key. Returns whether one existed.
    fn delete(&mut self, key: &ContentHash) -> bool;
}

/// Plain in-process map. Lifetimes are ignored; entries live until the
/// process ends or they are deleted.
#[derive(Default)]
pub struct MemoryCache {
    entries: HashMap<ContentHash, Resource>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResourceCache for MemoryCache {
    fn contains(&self, key: &ContentHash) -> bool {
        self.entries.contains_key(key)
    }

    fn fetch(&self, key: &ContentHash) -> Option<Resource> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: ContentHash, resource: Resource, _lifetime_secs: u64) -> bool {
        self.entries.insert(key, resource);
        true
    }

    fn delete(&mut self, key: &ContentHash) -> bool {
        self.entries.remove(key).is_some()
    }
}

/// In-process map honoring per-entry lifetimes.
///
/// An entry past its deadline reads as a miss. Lookups take `&self`, so
/// expired entries are purged on the next `save` rather than on access;
/// the map never accumulates more dead entries than one save interval's
/// worth of churn.
#[derive(Default)]
pub struct TtlCache {
    entries: HashMap<ContentHash, (Option<Instant>, Resource)>,
}

impl TtlCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn live(&self, key: &ContentHash) -> Option<&Resource> {
        let (deadline, resource) = self.entries.get(key)?;
        match deadline {
            Some(d) if Instant::now() >= *d => None,
            _ => Some(resource),
        }
    }
}

impl ResourceCache for TtlCache {
    fn contains(&self, key: &ContentHash) -> bool {
        self.live(key).is_some()
    }

    fn fetch(&self, key: &ContentHash) -> Option<Resource> {
        self.live(key).cloned()
    }

    fn save(&mut self, key: ContentHash, resource: Resource, lifetime_secs: u64) -> bool {
        let now = Instant::now();
        self.entries.retain(|_, slot| match slot.0 {
            Some(deadline) => now < deadline,
            None => true,
        });
        let deadline = (lifetime_secs > 0).then(|| now + Duration::from_secs(lifetime_secs));
        self.entries.insert(key, (deadline, resource));
        true
    }

    fn delete(&mut self, key: &ContentHash) -> bool {
        self.entries.remove(key).is_some()
    }
}

/// A cache that caches nothing. Every lookup misses and `save` declines.
///
/// Forces every resolution through the content store; used in tests and as
/// the degenerate configuration.
#[derive(Default)]
pub struct NullCache;

impl NullCache {
    /// Creates the null cache.
    pub fn new() -> Self {
        Self
    }
}

impl ResourceCache for NullCache {
    fn contains(&self, _key: &ContentHash) -> bool {
        false
    }

    fn fetch(&self, _key: &ContentHash) -> Option<Resource> {
        None
    }

    fn save(&mut self, _key: ContentHash, _resource: Resource, _lifetime_secs: u64) -> bool {
        false
    }

    fn delete(&mut self, _key: &ContentHash) -> bool {
        false
    }
}

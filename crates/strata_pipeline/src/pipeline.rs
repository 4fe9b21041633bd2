//! The asset pipeline orchestrator.
//!
//! `AssetPipeline` owns the content store, catalog, ephemeral cache, and
//! filter pipeline, and drives the tiered resolution algorithm: ephemeral
//! hit, store hit, or full regeneration through the filters. It also builds
//! combined artifacts from ordered member sets.

use std::path::{Path, PathBuf};

use strata_common::ContentHash;
use strata_config::{CacheBackend, ProjectConfig};
use strata_filters::{FilterPipeline, FilterRegistry};
use strata_store::{
    Catalog, ContentStore, MemoryCache, NullCache, Resource, ResourceCache, TtlCache,
};

use crate::discover::{discover_assets, validate_source_dir};
use crate::error::PipelineError;

/// Orchestrates asset resolution and combination over one store directory.
///
/// Each call runs synchronously to completion on the caller's thread; there
/// is no internal scheduler and no retry. The catalog is loaded once at
/// construction and written back only through [`AssetPipeline::flush`],
/// which the owner calls on its orderly shutdown path.
pub struct AssetPipeline {
    store: ContentStore,
    catalog: Catalog,
    cache: Box<dyn ResourceCache>,
    filters: FilterPipeline,
    source_dirs: Vec<PathBuf>,
    kinds: Vec<String>,
    cache_lifetime: u64,
    /// Discovered source resources; populated lazily, once.
    registered: Option<Vec<Resource>>,
}

impl AssetPipeline {
    /// Wires a pipeline from a validated project configuration.
    ///
    /// The store directory is created if absent; an unusable store path or
    /// source directory, or an unknown filter name, is a configuration
    /// error.
    pub fn new(config: &ProjectConfig) -> Result<Self, PipelineError> {
        // An unusable path is reported by ContentStore::new below.
        let _ = std::fs::create_dir_all(&config.store.directory);
        let store =
            ContentStore::new(&config.store.directory).map_err(PipelineError::from_store)?;

        for dir in &config.sources.directories {
            validate_source_dir(dir)?;
        }

        let registry = FilterRegistry::with_builtins();
        let mut filters = FilterPipeline::new();
        if config.filters.is_empty() {
            for name in registry.names() {
                if let Some(filter) = registry.create(name) {
                    filters.add_filter(filter);
                }
            }
        } else {
            for fc in &config.filters {
                let filter = registry.create(&fc.name).ok_or_else(|| {
                    PipelineError::Configuration(format!("unknown filter '{}'", fc.name))
                })?;
                filters.add_filter_with_priority(filter, fc.priority);
            }
        }

        let cache: Box<dyn ResourceCache> = match config.cache.backend {
            CacheBackend::Memory => Box::new(MemoryCache::new()),
            CacheBackend::Ttl => Box::new(TtlCache::new()),
            CacheBackend::None => Box::new(NullCache::new()),
        };

        let catalog = Catalog::load(store.directory());

        Ok(Self {
            store,
            catalog,
            cache,
            filters,
            source_dirs: config.sources.directories.clone(),
            kinds: config.sources.kinds.clone(),
            cache_lifetime: config.cache.lifetime_secs,
            registered: None,
        })
    }

    /// The content store backing this pipeline.
    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// The catalog backing this pipeline.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Mutable access to the filter pipeline, for custom filters.
    pub fn filters_mut(&mut self) -> &mut FilterPipeline {
        &mut self.filters
    }

    /// Ephemeral cache lifetime in seconds (`0` = no expiry).
    pub fn cache_lifetime(&self) -> u64 {
        self.cache_lifetime
    }

    /// Overrides the ephemeral cache lifetime.
    pub fn set_cache_lifetime(&mut self, lifetime_secs: u64) {
        self.cache_lifetime = lifetime_secs;
    }

    /// Swaps the ephemeral cache implementation.
    pub fn set_cache(&mut self, cache: Box<dyn ResourceCache>) {
        self.cache = cache;
    }

    /// Adds a source directory and invalidates the registration list.
    pub fn add_source_dir(&mut self, dir: &Path) -> Result<(), PipelineError> {
        validate_source_dir(dir)?;
        self.source_dirs.push(dir.to_path_buf());
        self.registered = None;
        Ok(())
    }

    /// Returns the registered resources, optionally restricted to one kind.
    ///
    /// Discovery runs once, lazily; subsequent calls reuse the list. Each
    /// resource's hash is computed from its source bytes at discovery time,
    /// while content is read again on a full cache miss; source files are
    /// assumed not to change between the two. An edit lands under its new
    /// hash on the next discovery (a fresh pipeline or `add_source_dir`).
    pub fn registered(&mut self, kind: Option<&str>) -> Result<Vec<Resource>, PipelineError> {
        let all = self.registered_slice()?;
        Ok(all
            .iter()
            .filter(|r| kind.is_none_or(|k| r.kind() == k))
            .cloned()
            .collect())
    }

    /// Resolves a resource through the tiered cache.
    ///
    /// Tier 1: ephemeral cache hit, no I/O. Tier 2: store hit, read bytes
    /// and fill the ephemeral cache. Tier 3: full miss — load the source,
    /// run the filters, write the store, record the catalog entry, fill the
    /// ephemeral cache. A source read failure aborts the whole resolution.
    pub fn resolve(&mut self, resource: &Resource) -> Result<Resource, PipelineError> {
        let hash = resource.hash();

        if let Some(hit) = self.cache.fetch(&hash) {
            return Ok(hit);
        }

        if self.store.exists(hash, resource.kind()) {
            let bytes = self.store.read(hash, resource.kind())?;
            let mut resolved = resource.clone();
            resolved.set_content(bytes);
            self.cache
                .save(hash, resolved.clone(), self.cache_lifetime);
            return Ok(resolved);
        }

        let mut resolved = resource.clone();
        resolved.load_source().map_err(PipelineError::from_store)?;
        self.filters.apply(&mut resolved);
        self.store
            .write(hash, resolved.kind(), resolved.content().unwrap_or(&[]))?;
        self.catalog.add(&resolved, &self.store)?;
        self.cache
            .save(hash, resolved.clone(), self.cache_lifetime);
        Ok(resolved)
    }

    /// Resolves a registered resource by file name or full path and returns
    /// its store path.
    pub fn store_path(&mut self, name: &str) -> Result<PathBuf, PipelineError> {
        let resource = self
            .registered_slice()?
            .iter()
            .find(|r| r.file_name() == name || r.source_path() == Some(Path::new(name)))
            .cloned()
            .ok_or_else(|| PipelineError::NotFound {
                name: name.to_string(),
            })?;

        let resolved = self.resolve(&resource)?;
        Ok(self.store.entry_path(resolved.hash(), resolved.kind()))
    }

    /// Builds (or reuses) the combined artifact for all registered resources
    /// of `kind`, optionally filtered by include/exclude file-name lists.
    ///
    /// Members are resolved in registration order; each contributes its
    /// content plus a newline separator, and its hash to an order-sensitive
    /// accumulation string. The aggregate's hash is the hash of that string,
    /// so an unchanged member set reuses the existing store entry without
    /// rewriting it.
    pub fn combine(
        &mut self,
        kind: &str,
        includes: Option<&[String]>,
        excludes: Option<&[String]>,
    ) -> Result<PathBuf, PipelineError> {
        let members: Vec<Resource> = self
            .registered(Some(kind))?
            .into_iter()
            .filter(|r| {
                includes.is_none_or(|inc| inc.iter().any(|n| n == r.file_name()))
                    && excludes.is_none_or(|exc| !exc.iter().any(|n| n == r.file_name()))
            })
            .collect();

        if members.is_empty() {
            return Err(PipelineError::EmptySelection {
                kind: kind.to_string(),
            });
        }

        let mut content = Vec::new();
        let mut hash_accum = String::new();
        for member in &members {
            let resolved = self.resolve(member)?;
            if let Some(bytes) = resolved.content() {
                content.extend_from_slice(bytes);
            }
            content.push(b'\n');
            hash_accum.push_str(&resolved.hash().to_string());
        }

        let hash = ContentHash::from_bytes(hash_accum.as_bytes());
        let aggregate = Resource::combined(kind, hash, content);

        let path = if self.store.exists(hash, kind) {
            self.store.entry_path(hash, kind)
        } else {
            self.store
                .write(hash, kind, aggregate.content().unwrap_or(&[]))?
        };
        self.catalog.add_combined(&aggregate, &self.store);
        self.cache.save(hash, aggregate, self.cache_lifetime);
        Ok(path)
    }

    /// Reclaims store entries whose hash is not catalogued.
    ///
    /// Complements the per-add stale eviction: anything orphaned on disk is
    /// removed. Returns the number of files deleted.
    pub fn gc(&mut self) -> Result<usize, PipelineError> {
        Ok(self.store.sweep(&self.catalog.live_hashes())?)
    }

    /// Removes every store entry and empties the catalog.
    ///
    /// Returns the number of files deleted. The emptied catalog reaches
    /// disk on the next [`AssetPipeline::flush`].
    pub fn clear(&mut self) -> Result<usize, PipelineError> {
        let removed = self.store.clear()?;
        self.catalog.clear_entries();
        Ok(removed)
    }

    /// Persists the catalog snapshot if it changed since load.
    pub fn flush(&mut self) -> Result<(), PipelineError> {
        Ok(self.catalog.flush()?)
    }

    fn registered_slice(&mut self) -> Result<&[Resource], PipelineError> {
        if self.registered.is_none() {
            let paths = discover_assets(&self.source_dirs, &self.kinds)?;
            let mut resources = Vec::with_capacity(paths.len());
            for path in &paths {
                resources.push(Resource::from_source(path).map_err(PipelineError::from_store)?);
            }
            self.registered = Some(resources);
        }
        Ok(self.registered.as_deref().unwrap_or_default())
    }
}

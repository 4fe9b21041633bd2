//! Integration tests for on-disk project workflows.
//!
//! These tests exercise the full pipeline (discover → resolve → store →
//! catalog) across process boundaries simulated by constructing a fresh
//! `AssetPipeline` over the same project layout, the way a second request
//! or a later deploy would.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use strata_config::{load_config, load_config_from_str};
use strata_filters::Filter;
use strata_pipeline::AssetPipeline;
use strata_store::CATALOG_FILE;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers: project scaffolding
// ---------------------------------------------------------------------------

/// Lays out `assets/` and `store/` under `root` and writes a `strata.toml`
/// pointing at them, then loads the config from disk.
fn scaffold_project(root: &Path, cache_backend: &str) -> AssetPipeline {
    let assets = root.join("assets");
    let store = root.join("store");
    fs::create_dir_all(&assets).unwrap();
    fs::create_dir_all(&store).unwrap();

    let toml = format!(
        "[store]\ndirectory = \"{}\"\n\n[cache]\nbackend = \"{}\"\n\n[sources]\ndirectories = [\"{}\"]\n",
        store.display(),
        cache_backend,
        assets.display()
    );
    fs::write(root.join("strata.toml"), &toml).unwrap();

    let config = load_config(root).unwrap();
    AssetPipeline::new(&config).unwrap()
}

/// Builds a pipeline over an explicit ordered list of source directories.
fn pipeline_with_dirs(store: &Path, dirs: &[&Path]) -> AssetPipeline {
    fs::create_dir_all(store).unwrap();
    let listed: Vec<String> = dirs
        .iter()
        .map(|d| format!("\"{}\"", d.display()))
        .collect();
    let toml = format!(
        "[store]\ndirectory = \"{}\"\n\n[sources]\ndirectories = [{}]\n",
        store.display(),
        listed.join(", ")
    );
    let config = load_config_from_str(&toml).unwrap();
    AssetPipeline::new(&config).unwrap()
}

fn write_asset(root: &Path, name: &str, content: &str) -> PathBuf {
    let path = root.join("assets").join(name);
    fs::write(&path, content).unwrap();
    path
}

/// A filter that counts invocations, for observing which tier served a
/// resolution.
struct CountingFilter {
    calls: Arc<AtomicUsize>,
}

impl Filter for CountingFilter {
    fn name(&self) -> &str {
        "counting"
    }

    fn kinds(&self) -> &[&str] {
        &["css", "js"]
    }

    fn apply(&self, input: &[u8]) -> Vec<u8> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        input.to_vec()
    }
}

// ===========================================================================
// Resolution end to end
// ===========================================================================

#[test]
fn resolve_minifies_and_persists() {
    let tmp = TempDir::new().unwrap();
    let mut pipeline = scaffold_project(tmp.path(), "memory");
    write_asset(tmp.path(), "site.css", "a {  color: red; }");

    let path = pipeline.store_path("site.css").unwrap();
    assert!(path.starts_with(tmp.path().join("store")));
    assert_eq!(fs::read(&path).unwrap(), b"a{color:red;}");

    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.ends_with(".cache.css"));
    // 32 hex chars before the ".cache.css" suffix.
    assert_eq!(name.len(), 32 + ".cache.css".len());
}

#[test]
fn repeat_resolution_skips_the_filters() {
    let tmp = TempDir::new().unwrap();
    let mut pipeline = scaffold_project(tmp.path(), "memory");
    write_asset(tmp.path(), "site.css", "a { color: red; }");

    let calls = Arc::new(AtomicUsize::new(0));
    pipeline.filters_mut().add_filter(Box::new(CountingFilter {
        calls: Arc::clone(&calls),
    }));

    let first = pipeline.store_path("site.css").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Ephemeral hit: no filter run, same store path.
    let second = pipeline.store_path("site.css").unwrap();
    assert_eq!(second, first);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn fresh_pipeline_serves_from_the_store() {
    let tmp = TempDir::new().unwrap();
    let first_path;
    {
        let mut pipeline = scaffold_project(tmp.path(), "memory");
        write_asset(tmp.path(), "site.css", "a { color: red; }");
        first_path = pipeline.store_path("site.css").unwrap();
        pipeline.flush().unwrap();
    }

    // A second pipeline over the same layout: the store entry exists, so
    // nothing is regenerated.
    let mut pipeline = scaffold_project(tmp.path(), "memory");
    let calls = Arc::new(AtomicUsize::new(0));
    pipeline.filters_mut().add_filter(Box::new(CountingFilter {
        calls: Arc::clone(&calls),
    }));

    let path = pipeline.store_path("site.css").unwrap();
    assert_eq!(path, first_path);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn null_cache_still_resolves_correctly() {
    let tmp = TempDir::new().unwrap();
    let mut pipeline = scaffold_project(tmp.path(), "none");
    write_asset(tmp.path(), "site.js", "var x = 1; // trailing");

    let p1 = pipeline.store_path("site.js").unwrap();
    let p2 = pipeline.store_path("site.js").unwrap();
    assert_eq!(p1, p2);
    assert_eq!(fs::read(&p1).unwrap(), b"var x = 1;");
}

// ===========================================================================
// Catalog persistence and stale reclamation
// ===========================================================================

#[test]
fn flush_writes_snapshot_and_reload_preserves_entries() {
    let tmp = TempDir::new().unwrap();
    let hash;
    {
        let mut pipeline = scaffold_project(tmp.path(), "memory");
        write_asset(tmp.path(), "site.css", "a { color: red; }");
        let resource = pipeline.registered(Some("css")).unwrap().remove(0);
        hash = resource.hash();
        pipeline.resolve(&resource).unwrap();
        pipeline.flush().unwrap();
    }

    let snapshot = tmp.path().join("store").join(CATALOG_FILE);
    assert!(snapshot.is_file());

    let pipeline = scaffold_project(tmp.path(), "memory");
    assert_eq!(pipeline.catalog().len(), 1);
    assert!(pipeline.catalog().entry(hash).is_some());
}

#[test]
fn unchanged_catalog_is_not_rewritten() {
    let tmp = TempDir::new().unwrap();
    let mut pipeline = scaffold_project(tmp.path(), "memory");
    write_asset(tmp.path(), "site.css", "a { color: red; }");
    pipeline.store_path("site.css").unwrap();
    pipeline.flush().unwrap();

    let snapshot = tmp.path().join("store").join(CATALOG_FILE);
    let before = fs::read(&snapshot).unwrap();

    let mut pipeline = scaffold_project(tmp.path(), "memory");
    pipeline.store_path("site.css").unwrap();
    pipeline.flush().unwrap();
    assert_eq!(fs::read(&snapshot).unwrap(), before);
}

#[test]
fn edited_source_reclaims_the_stale_store_entry() {
    let tmp = TempDir::new().unwrap();
    let old_path;
    {
        let mut pipeline = scaffold_project(tmp.path(), "memory");
        write_asset(tmp.path(), "site.css", "a { color: red; }");
        old_path = pipeline.store_path("site.css").unwrap();
        pipeline.flush().unwrap();
    }

    write_asset(tmp.path(), "site.css", "a { color: blue; }");

    let mut pipeline = scaffold_project(tmp.path(), "memory");
    let new_path = pipeline.store_path("site.css").unwrap();

    assert_ne!(new_path, old_path);
    assert!(!old_path.exists());
    assert_eq!(fs::read(&new_path).unwrap(), b"a{color:blue;}");
    assert_eq!(pipeline.catalog().len(), 1);
}

#[test]
fn gc_sweeps_orphans_left_by_hand() {
    let tmp = TempDir::new().unwrap();
    let mut pipeline = scaffold_project(tmp.path(), "memory");
    write_asset(tmp.path(), "site.css", "a { color: red; }");
    let live = pipeline.store_path("site.css").unwrap();

    // Files not in the catalog, regardless of kind, are fair game.
    let store = tmp.path().join("store");
    fs::write(
        store.join("00000000000000000000000000000000.cache.css"),
        b"stale{}",
    )
    .unwrap();
    fs::write(
        store.join("ffffffffffffffffffffffffffffffff.cache.js"),
        b"stale();",
    )
    .unwrap();

    let removed = pipeline.gc().unwrap();
    assert_eq!(removed, 2);
    assert!(live.exists());
}

// ===========================================================================
// Combination
// ===========================================================================

#[test]
fn combine_concatenates_in_registration_order() {
    let tmp = TempDir::new().unwrap();
    let mut pipeline = scaffold_project(tmp.path(), "memory");
    write_asset(tmp.path(), "a.css", "a { color: red; }");
    write_asset(tmp.path(), "b.css", "b { color: blue; }");

    let path = pipeline.combine("css", None, None).unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"a{color:red;}\nb{color:blue;}\n");
    assert!(path
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .ends_with(".cache.css"));
}

#[test]
fn combine_respects_includes_and_excludes() {
    let tmp = TempDir::new().unwrap();
    let mut pipeline = scaffold_project(tmp.path(), "memory");
    write_asset(tmp.path(), "a.css", "a{}");
    write_asset(tmp.path(), "b.css", "b{}");
    write_asset(tmp.path(), "c.css", "c{}");

    let includes = vec!["a.css".to_string(), "c.css".to_string()];
    let included = pipeline.combine("css", Some(&includes), None).unwrap();
    assert_eq!(fs::read(&included).unwrap(), b"a{}\nc{}\n");

    let excludes = vec!["b.css".to_string()];
    let excluded = pipeline.combine("css", None, Some(&excludes)).unwrap();
    assert_eq!(excluded, included);
}

#[test]
fn member_order_changes_the_aggregate() {
    let tmp = TempDir::new().unwrap();
    let d1 = tmp.path().join("one");
    let d2 = tmp.path().join("two");
    fs::create_dir_all(&d1).unwrap();
    fs::create_dir_all(&d2).unwrap();
    fs::write(d1.join("a.css"), "a{}").unwrap();
    fs::write(d2.join("b.css"), "b{}").unwrap();

    let mut forward = pipeline_with_dirs(&tmp.path().join("store1"), &[&d1, &d2]);
    let mut reversed = pipeline_with_dirs(&tmp.path().join("store2"), &[&d2, &d1]);

    let p1 = forward.combine("css", None, None).unwrap();
    let p2 = reversed.combine("css", None, None).unwrap();

    assert_eq!(fs::read(&p1).unwrap(), b"a{}\nb{}\n");
    assert_eq!(fs::read(&p2).unwrap(), b"b{}\na{}\n");
    assert_ne!(p1.file_name(), p2.file_name());
}

#[test]
fn aggregate_survives_flush_and_gc() {
    let tmp = TempDir::new().unwrap();
    let combined;
    {
        let mut pipeline = scaffold_project(tmp.path(), "memory");
        write_asset(tmp.path(), "a.css", "a{}");
        write_asset(tmp.path(), "b.css", "b{}");
        combined = pipeline.combine("css", None, None).unwrap();
        pipeline.flush().unwrap();
    }

    let mut pipeline = scaffold_project(tmp.path(), "memory");
    // Members plus the aggregate are all catalogued, so gc removes nothing.
    assert_eq!(pipeline.gc().unwrap(), 0);
    assert!(combined.exists());

    // The aggregate is catalogued without a source path.
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("store").join(CATALOG_FILE)).unwrap())
            .unwrap();
    let aggregate_name = combined.file_name().unwrap().to_str().unwrap().to_string();
    let entry = json
        .as_object()
        .unwrap()
        .values()
        .find(|e| {
            e["storepath"]
                .as_str()
                .is_some_and(|p| p.ends_with(&aggregate_name))
        })
        .unwrap();
    assert!(entry["filepath"].is_null());
}

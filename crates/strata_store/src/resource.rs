//! In-memory representation of a source or derived asset.

use std::path::{Path, PathBuf};

use strata_common::ContentHash;

use crate::error::StoreError;

/// One source or derived asset: identity, kind, and lazily loaded content.
///
/// The content hash is computed from the source file's bytes at construction
/// and is immutable for the lifetime of the value. Content itself is loaded
/// on demand during resolution, so a freshly registered `Resource` carries
/// no buffer.
///
/// Cloning is cheap enough for cache snapshot semantics: values handed to
/// or returned from an ephemeral cache are independent copies, so mutating
/// one caller's resource never leaks into another caller's cached view.
#[derive(Debug, Clone)]
pub struct Resource {
    /// Originating file, absent for combined artifacts.
    source_path: Option<PathBuf>,
    /// Plain file name, used for include/exclude selection.
    file_name: String,
    /// Asset kind derived from the file extension ("css", "js").
    kind: String,
    /// Identity key; never changes once set.
    hash: ContentHash,
    /// Raw or filtered bytes, depending on lifecycle stage.
    content: Option<Vec<u8>>,
}

impl Resource {
    /// Builds a resource for a source file, hashing its current content.
    ///
    /// The file is read once to compute the identity hash and the bytes are
    /// then discarded; content is loaded again on a full cache miss. Fails
    /// with [`StoreError::Read`] if the file is unreadable and with
    /// [`StoreError::Configuration`] if it has no usable name or extension.
    pub fn from_source(path: &Path) -> Result<Self, StoreError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| StoreError::Configuration {
                path: path.to_path_buf(),
                reason: "asset path has no file name".to_string(),
            })?;
        let kind = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_string)
            .ok_or_else(|| StoreError::Configuration {
                path: path.to_path_buf(),
                reason: "asset path has no file extension".to_string(),
            })?;

        let bytes = std::fs::read(path).map_err(|e| StoreError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            source_path: Some(path.to_path_buf()),
            file_name,
            kind,
            hash: ContentHash::from_bytes(&bytes),
            content: None,
        })
    }

    /// Builds a synthetic combined resource from already-materialized content.
    pub fn combined(kind: &str, hash: ContentHash, content: Vec<u8>) -> Self {
        Self {
            source_path: None,
            file_name: format!("{hash}.{kind}"),
            kind: kind.to_string(),
            hash,
            content: Some(content),
        }
    }

    /// The originating file path, or `None` for combined artifacts.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// The plain file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The asset kind ("css", "js").
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The identity hash.
    pub fn hash(&self) -> ContentHash {
        self.hash
    }

    /// The current content buffer, if populated.
    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    /// Replaces the content buffer.
    pub fn set_content(&mut self, bytes: Vec<u8>) {
        self.content = Some(bytes);
    }

    /// Loads raw bytes from the source file into this resource.
    ///
    /// Fails with [`StoreError::Read`] when the source is missing or
    /// unreadable; the caller aborts the whole resolution in that case.
    pub fn load_source(&mut self) -> Result<(), StoreError> {
        let path = self
            .source_path
            .as_ref()
            .ok_or_else(|| StoreError::Configuration {
                path: PathBuf::from(&self.file_name),
                reason: "combined resource has no source file".to_string(),
            })?;
        let bytes = std::fs::read(path).map_err(|e| StoreError::Read {
            path: path.clone(),
            source: e,
        })?;
        self.content = Some(bytes);
        Ok(())
    }

    /// The store file name for this resource: `{hash}.cache.{kind}`.
    pub fn store_file_name(&self) -> String {
        format!("{}.cache.{}", self.hash, self.kind)
    }
}

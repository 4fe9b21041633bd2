//! Error types for store, catalog, and resource operations.

use std::path::PathBuf;

/// Errors that can occur in the durable storage layer.
///
/// Deleting an absent store entry is defined as a no-op, not an error.
/// Everything else surfaces synchronously; there are no internal retries.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store directory or a source path is unusable. Raised at setup
    /// time and fatal to the calling operation.
    #[error("configuration error for {path}: {reason}")]
    Configuration {
        /// The offending path.
        path: PathBuf,
        /// Why the path is unusable.
        reason: String,
    },

    /// An I/O error occurred while reading or writing store files.
    #[error("store I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A named source file could not be read at resolution time.
    #[error("cannot read source file {path}: {source}")]
    Read {
        /// The unreadable source file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// No store entry exists for the requested hash and kind.
    #[error("no store entry at {path}")]
    NotFound {
        /// The derived store path that was probed.
        path: PathBuf,
    },

    /// The catalog snapshot could not be serialized.
    #[error("catalog serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_display() {
        let err = StoreError::Configuration {
            path: PathBuf::from("/no/such/store"),
            reason: "not a directory".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("not a directory"));
    }

    #[test]
    fn io_display() {
        let err = StoreError::Io {
            path: PathBuf::from("store/abc.cache.css"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("store I/O error"));
        assert!(msg.contains("abc.cache.css"));
    }

    #[test]
    fn read_display() {
        let err = StoreError::Read {
            path: PathBuf::from("assets/style.css"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("cannot read source file"));
    }

    #[test]
    fn not_found_display() {
        let err = StoreError::NotFound {
            path: PathBuf::from("store/dead.cache.js"),
        };
        assert!(err.to_string().contains("no store entry"));
    }
}

//! Error taxonomy for pipeline operations.

use std::path::PathBuf;

use strata_config::ConfigError;
use strata_store::StoreError;

/// Errors surfaced by asset resolution and combination.
///
/// Nothing here is retried internally; every failure propagates
/// synchronously to the caller, which maps it to its own presentation
/// (the CLI prints and exits non-zero).
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Invalid setup: unusable store or source directory, unknown filter
    /// or cache backend name. Fatal to the calling operation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A source file could not be read at resolution time.
    #[error("cannot read source file {path}: {source}")]
    Read {
        /// The unreadable source file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A combination request matched zero members.
    #[error("no resources of kind '{kind}' matched the selection")]
    EmptySelection {
        /// The requested asset kind.
        kind: String,
    },

    /// A named resource is not among the registered candidates.
    #[error("cannot find '{name}' in any source directory")]
    NotFound {
        /// The requested file name or path.
        name: String,
    },

    /// A storage-layer failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A configuration-file failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PipelineError {
    /// Lifts a store-layer error, promoting source-read failures to
    /// [`PipelineError::Read`] and setup failures to
    /// [`PipelineError::Configuration`].
    pub(crate) fn from_store(err: StoreError) -> Self {
        match err {
            StoreError::Read { path, source } => Self::Read { path, source },
            StoreError::Configuration { path, reason } => {
                Self::Configuration(format!("{}: {reason}", path.display()))
            }
            other => Self::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_names_the_kind() {
        let err = PipelineError::EmptySelection {
            kind: "css".to_string(),
        };
        assert!(err.to_string().contains("'css'"));
    }

    #[test]
    fn not_found_names_the_file() {
        let err = PipelineError::NotFound {
            name: "zzz.css".to_string(),
        };
        assert!(err.to_string().contains("zzz.css"));
    }

    #[test]
    fn read_errors_are_promoted() {
        let store_err = StoreError::Read {
            path: PathBuf::from("a.css"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let err = PipelineError::from_store(store_err);
        assert!(matches!(err, PipelineError::Read { .. }));
    }

    #[test]
    fn other_store_errors_pass_through() {
        let store_err = StoreError::NotFound {
            path: PathBuf::from("x.cache.css"),
        };
        let err = PipelineError::from_store(store_err);
        assert!(matches!(err, PipelineError::Store(_)));
    }
}

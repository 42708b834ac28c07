//! Error taxonomy for catalog and asset store operations.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backing store could not be enumerated.
    #[error("asset store at {root:?} is unavailable: {source}")]
    StoreUnavailable {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target vanished between listing and action.
    #[error("asset not found: {0:?}")]
    NotFound(PathBuf),

    #[error("an asset named '{0}' already exists")]
    NameConflict(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("failed to write {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Whether the error means the catalog is out of date and should be re-fetched.
    pub fn needs_reconcile(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

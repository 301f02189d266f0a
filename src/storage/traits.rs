//! Storage traits and error types
//!
//! This module defines the trait interface for visited-set backends and
//! associated error types.

use crate::storage::UrlRecord;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Filesystem operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Read,
    Append,
    Rewrite,
    CreateDirectory,
    Scan,
}

impl fmt::Display for StorageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Read => "read",
            Self::Append => "append to",
            Self::Rewrite => "rewrite",
            Self::CreateDirectory => "create directory",
            Self::Scan => "scan",
        };
        f.write_str(verb)
    }
}

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to {op} {}: {source}", .path.display())]
    Access {
        op: StorageOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("URL cannot be stored as a single extractable line: {0:?}")]
    Unrecordable(String),
}

impl StorageError {
    /// Builds a `map_err` adapter that tags an I/O error with its operation and path
    pub(crate) fn access(
        op: StorageOp,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Access { op, path, source }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for visited-set backends
///
/// The set is loaded once when the backend is opened and is the only source
/// of truth for "have we seen this URL" until the session ends. Consumers
/// only go through this trait, so a file can be replaced by an indexed store
/// without touching them.
pub trait VisitedStore {
    /// Exact string membership test
    fn is_member(&self, url: &str) -> bool;

    /// Durably appends one record and marks its URL as a member
    ///
    /// Does not check membership; callers filter first. When this returns
    /// `Ok`, the record is on disk and later `is_member` calls see it.
    fn record(&mut self, record: &UrlRecord) -> StorageResult<()>;

    /// Number of distinct URLs known to the store
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes duplicate entries from the backing store
    ///
    /// Returns how many entries were dropped. Membership is unaffected.
    fn compact(&mut self) -> StorageResult<usize>;
}

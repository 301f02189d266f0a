//! Storage module for persisting crawl state
//!
//! This module handles everything that touches the storage directory:
//! - The visited-set store (load, membership, durable appends)
//! - Duplicate compaction of the visited-set file
//! - Append-only logs for page text and discovered links

mod file;
mod line;
mod log;
mod reconcile;
mod traits;

pub use file::FileVisitedStore;
pub use line::{canonical_line, extract_url, LineShape};
pub use log::{content_entry, links_entry, ArtifactLog};
pub use reconcile::compact;
pub use traits::{StorageError, StorageOp, StorageResult, VisitedStore};

use std::path::Path;

/// A URL together with its optional label (usually the anchor text)
///
/// Identity is the URL string alone; the label is only carried into the
/// persisted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub url: String,
    pub label: Option<String>,
}

impl UrlRecord {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: None,
        }
    }

    pub fn labelled(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: Some(label.into()),
        }
    }
}

/// Creates the storage directory if it does not exist yet
pub fn prepare_directory(dir: &Path) -> StorageResult<()> {
    std::fs::create_dir_all(dir).map_err(StorageError::access(StorageOp::CreateDirectory, dir))
}

//! Append-only artifact logs for page text and discovered links
//!
//! Entries are free-form text blocks separated by a blank line. They are
//! never read back by the crawler; only the corpus statistics scan them.

use crate::storage::line::canonical_line;
use crate::storage::traits::{StorageError, StorageOp, StorageResult};
use crate::storage::UrlRecord;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// An append-only text log
#[derive(Debug, Clone)]
pub struct ArtifactLog {
    path: PathBuf,
}

impl ArtifactLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one entry followed by a blank line, in a single write
    pub fn append(&self, entry: &str) -> StorageResult<()> {
        let mut block = String::with_capacity(entry.len() + 2);
        block.push_str(entry);
        block.push_str("\n\n");

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(StorageError::access(StorageOp::Append, &self.path))?;
        file.write_all(block.as_bytes())
            .map_err(StorageError::access(StorageOp::Append, &self.path))
    }
}

/// Formats the text entry for one crawled page
pub fn content_entry(source_url: &str, text: &str) -> String {
    format!("URL: {}\n\nObsah:\n{}", source_url, text)
}

/// Formats the link entry for one crawled page
///
/// Each link uses the same canonical line as the visited set, so anchors
/// never smuggle extra line breaks into the log.
pub fn links_entry(source_url: &str, links: &[UrlRecord]) -> StorageResult<String> {
    let mut entry = format!("URL: {}\n\nOdkazy:", source_url);
    for link in links {
        entry.push('\n');
        entry.push_str(&canonical_line(link)?);
    }
    Ok(entry)
}

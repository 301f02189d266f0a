//! Plain-text visited-set store
//!
//! The whole file is read once on open. Every record is its own
//! open-append-sync-close, so a crash after N records leaves exactly N
//! complete lines behind.

use crate::storage::line::{canonical_line, extract_url};
use crate::storage::reconcile::compact;
use crate::storage::traits::{StorageError, StorageOp, StorageResult, VisitedStore};
use crate::storage::UrlRecord;
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Visited-set backed by a line-oriented text file
#[derive(Debug)]
pub struct FileVisitedStore {
    path: PathBuf,
    members: HashSet<String>,
    /// The file ends mid-line; the next append must start a fresh one
    needs_separator: bool,
}

impl FileVisitedStore {
    /// Loads the store, treating a missing file as an empty set
    ///
    /// Lines without a recognizable URL are skipped.
    pub fn load(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No visited set at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => return Err(StorageError::access(StorageOp::Read, &path)(e)),
        };

        let needs_separator = bytes.last().is_some_and(|b| *b != b'\n');
        // Lines that are not valid UTF-8 carry no URL
        let members: HashSet<String> = bytes
            .split(|b| *b == b'\n')
            .filter_map(|line| std::str::from_utf8(line).ok())
            .filter_map(extract_url)
            .map(str::to_string)
            .collect();

        tracing::debug!(
            "Loaded {} recorded URLs from {}",
            members.len(),
            path.display()
        );

        Ok(Self {
            path,
            members,
            needs_separator,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VisitedStore for FileVisitedStore {
    fn is_member(&self, url: &str) -> bool {
        self.members.contains(url)
    }

    fn record(&mut self, record: &UrlRecord) -> StorageResult<()> {
        let line = canonical_line(record)?;

        let mut buf = String::with_capacity(line.len() + 2);
        if self.needs_separator {
            buf.push('\n');
        }
        buf.push_str(&line);
        buf.push('\n');

        if let Err(e) = append_durably(&self.path, buf.as_bytes()) {
            // Part of the line may have landed; never extend it
            self.needs_separator = true;
            return Err(StorageError::access(StorageOp::Append, &self.path)(e));
        }

        self.needs_separator = false;
        self.members.insert(record.url.clone());
        tracing::trace!("Recorded {}", record.url);
        Ok(())
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn compact(&mut self) -> StorageResult<usize> {
        compact(&self.path)
    }
}

/// One write per line; the handle is dropped (closed) on every path
fn append_durably(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(bytes)?;
    file.sync_data()
}

//! Duplicate compaction for the visited-set file

use crate::storage::line::extract_url;
use crate::storage::traits::{StorageError, StorageOp, StorageResult};
use std::collections::HashSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Removes repeated URL lines from the visited-set file
///
/// Lines are walked in order; the first line carrying a URL is kept and later
/// lines carrying the same URL are dropped. Lines without a URL (blank lines,
/// section markers, free text) and lines that are not valid UTF-8 are always
/// kept. Kept lines are written back byte for byte, in their original order,
/// through a temporary file that takes over the original's permissions and
/// replaces it in one rename.
///
/// Returns the number of dropped lines. A missing file is a no-op returning 0,
/// and a file without duplicates is left untouched.
pub fn compact(path: &Path) -> StorageResult<usize> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Nothing to compact at {}", path.display());
            return Ok(0);
        }
        Err(e) => return Err(StorageError::access(StorageOp::Read, path)(e)),
    };

    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(bytes.len());
    let mut removed = 0;

    for line in bytes.split_inclusive(|b| *b == b'\n') {
        let url = std::str::from_utf8(line).ok().and_then(extract_url);
        match url {
            Some(url) if !seen.insert(url) => removed += 1,
            _ => kept.extend_from_slice(line),
        }
    }

    if removed > 0 {
        rewrite_atomically(path, &kept)?;
    }

    tracing::info!(
        "Compacted {}: {} duplicate lines removed, {} distinct URLs kept",
        path.display(),
        removed,
        seen.len()
    );

    Ok(removed)
}

fn rewrite_atomically(path: &Path, content: &[u8]) -> StorageResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let rewrite_err = |e: std::io::Error| StorageError::access(StorageOp::Rewrite, path)(e);

    // The temporary file starts out private
    let permissions = fs::metadata(path).map_err(rewrite_err)?.permissions();

    let mut tmp = NamedTempFile::new_in(dir).map_err(rewrite_err)?;
    tmp.write_all(content)
        .and_then(|()| tmp.as_file().set_permissions(permissions))
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(rewrite_err)?;
    tmp.persist(path).map_err(|e| rewrite_err(e.error))?;

    Ok(())
}

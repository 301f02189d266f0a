//! Statistics generation from persisted artifacts
//!
//! URLs are pulled out of every `*.txt` file in the storage directory with a
//! pattern match, independently of how the visited set extracts them. The two
//! counts can therefore disagree (a URL followed by a colon, a link that only
//! appears in page text), and that is expected.

use crate::storage::{StorageError, StorageOp, StorageResult};
use crate::url::RootScope;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;

/// `http(s)://` followed by word characters, `.`, `-`, `/` or `%XX` escapes
const URL_PATTERN: &str = r"https?://(?:[-\w./]|%[0-9a-fA-F]{2})+";

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern should be valid"))
}

/// Corpus statistics summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusStatistics {
    /// Distinct URLs across all artifacts
    pub total: usize,

    /// Distinct URLs under the root (always 0 without a root)
    pub domain: usize,

    /// Everything else
    pub other: usize,

    /// Number of text artifacts scanned
    pub files_scanned: usize,
}

/// Adds every URL-shaped substring of `text` to `urls`
pub fn harvest_urls(text: &str, urls: &mut HashSet<String>) {
    for found in url_pattern().find_iter(text) {
        urls.insert(found.as_str().to_string());
    }
}

/// Scans the storage directory and counts distinct URLs
///
/// # Arguments
///
/// * `dir` - The storage directory; only files directly inside it whose name
///   ends in `.txt` are read
/// * `scope` - The session root used to split domain from other URLs
///
/// # Returns
///
/// * `Ok(CorpusStatistics)` - Counts over all artifacts (zero if the directory is missing)
/// * `Err(StorageError)` - The directory or one of its files could not be read
pub fn aggregate(dir: &Path, scope: &RootScope) -> StorageResult<CorpusStatistics> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("Storage directory {} does not exist", dir.display());
            return Ok(CorpusStatistics::default());
        }
        Err(e) => return Err(StorageError::access(StorageOp::Scan, dir)(e)),
    };

    let mut urls = HashSet::new();
    let mut files_scanned = 0;

    for entry in entries {
        let entry = entry.map_err(StorageError::access(StorageOp::Scan, dir))?;
        let path = entry.path();

        let is_text_artifact = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(".txt"));
        if !is_text_artifact || !path.is_file() {
            continue;
        }

        let bytes = fs::read(&path).map_err(StorageError::access(StorageOp::Read, &path))?;
        harvest_urls(&String::from_utf8_lossy(&bytes), &mut urls);
        files_scanned += 1;
        tracing::debug!("Scanned {}", path.display());
    }

    let total = urls.len();
    let domain = if scope.is_unfiltered() {
        0
    } else {
        urls.iter().filter(|url| scope.contains(url)).count()
    };

    Ok(CorpusStatistics {
        total,
        domain,
        other: total - domain,
        files_scanned,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CorpusStatistics, scope: &RootScope) {
    println!("=== URL Statistics ===\n");
    println!("  Artifacts scanned: {}", stats.files_scanned);
    println!("  Unique URLs: {}", stats.total);

    if !scope.is_unfiltered() {
        println!("  Under {}: {}", scope.as_str(), stats.domain);
        println!("  Other domains: {}", stats.other);
    }
}

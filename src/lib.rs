//! Sumi-Scribe: an incremental, single-domain page scribe
//!
//! This crate fetches one operator-supplied page at a time, stores its text and
//! newly discovered links, and keeps a durable, duplicate-free record of every
//! URL it has ever recorded across sessions.

pub mod config;
pub mod crawler;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Scribe operations
#[derive(Debug, Error)]
pub enum ScribeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] crawler::FetchFailure),

    #[error(transparent)]
    Parse(#[from] crawler::ParseFailure),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScribeError {
    /// Returns true if the error only affects the URL being crawled
    ///
    /// Fetch and parse failures abort a single crawl; everything else
    /// signals that the persisted state can no longer be trusted.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Parse(_))
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlSession, SessionReport};
pub use output::{aggregate, CorpusStatistics};
pub use storage::{compact, FileVisitedStore, UrlRecord, VisitedStore};
pub use crate::url::{classify, LinkScope, RootScope};

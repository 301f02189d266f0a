use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure for Sumi-Scribe
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Crawl scope configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlConfig {
    /// Root URL prefix used to scope links; empty means unfiltered.
    /// `None` means the operator has not chosen one yet.
    #[serde(rename = "root-url")]
    pub root_url: Option<String>,
}

/// Where persisted artifacts live
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory holding every text artifact
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Log of extracted page text
    #[serde(rename = "content-file", default = "default_content_file")]
    pub content_file: String,

    /// Log of newly discovered links, grouped by source page
    #[serde(rename = "links-file", default = "default_links_file")]
    pub links_file: String,

    /// The visited-set store
    #[serde(rename = "url-list-file", default = "default_url_list_file")]
    pub url_list_file: String,
}

impl StorageConfig {
    pub fn content_path(&self) -> PathBuf {
        self.directory.join(&self.content_file)
    }

    pub fn links_path(&self) -> PathBuf {
        self.directory.join(&self.links_file)
    }

    pub fn url_list_path(&self) -> PathBuf {
        self.directory.join(&self.url_list_file)
    }

    /// Returns a copy rooted at a different directory
    pub fn with_directory(&self, directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            ..self.clone()
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            content_file: default_content_file(),
            links_file: default_links_file(),
            url_list_file: default_url_list_file(),
        }
    }
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("./scribe-data")
}

fn default_content_file() -> String {
    "DataZAdresy.txt".to_string()
}

fn default_links_file() -> String {
    "Odkazy.txt".to_string()
}

fn default_url_list_file() -> String {
    "URL_seznam.txt".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("sumi-scribe/{}", env!("CARGO_PKG_VERSION"))
}

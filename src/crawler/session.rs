//! Crawl session - one operator-supplied URL at a time
//!
//! A session owns the visited set for its whole lifetime. Each call to
//! [`CrawlSession::run`]:
//! 1. Fetches the page
//! 2. Parses text and links, resolving links against the page URL
//! 3. Keeps only links under the root
//! 4. Appends the page text to the content log
//! 5. Picks the links the visited set has never seen
//! 6. Appends those to the links log and records each one
//!
//! Nothing is written unless both fetch and parse succeed.

use crate::config::{validate, validate_root_url, Config};
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::parser::{HtmlParser, PageParser};
use crate::storage::{
    content_entry, links_entry, prepare_directory, ArtifactLog, FileVisitedStore, UrlRecord,
    VisitedStore,
};
use crate::url::RootScope;
use crate::ScribeError;
use std::collections::HashSet;

/// Outcome of crawling one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// The crawled URL
    pub url: String,

    /// Links on the page that fell under the root, duplicates included
    pub in_scope_links: usize,

    /// Links recorded for the first time, in page order
    pub new_links: Vec<UrlRecord>,
}

impl SessionReport {
    /// Number of links newly recorded in the visited set
    pub fn recorded(&self) -> usize {
        self.new_links.len()
    }
}

/// Orchestrates fetch, parse, filtering and persistence
pub struct CrawlSession<F, P, S> {
    fetcher: F,
    parser: P,
    store: S,
    scope: RootScope,
    content_log: ArtifactLog,
    links_log: ArtifactLog,
}

impl CrawlSession<HttpFetcher, HtmlParser, FileVisitedStore> {
    /// Opens a session over the configured storage directory
    ///
    /// Validates the settings, creates the directory if needed and loads the
    /// visited set once.
    ///
    /// # Arguments
    ///
    /// * `config` - Storage and fetch settings
    /// * `scope` - The root chosen for this session
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSession)` - Ready to crawl
    /// * `Err(ScribeError)` - Invalid settings, storage could not be prepared or
    ///   the client could not be built
    pub fn open(config: &Config, scope: RootScope) -> Result<Self, ScribeError> {
        validate(config)?;
        if !scope.is_unfiltered() {
            validate_root_url(scope.as_str())?;
        }

        let storage = &config.storage;
        prepare_directory(&storage.directory)?;

        let store = FileVisitedStore::load(storage.url_list_path())?;
        tracing::info!(
            "Loaded {} previously recorded URLs from {}",
            store.len(),
            store.path().display()
        );

        let fetcher = HttpFetcher::new(&config.fetch)?;

        Ok(Self::new(
            fetcher,
            HtmlParser,
            store,
            scope,
            ArtifactLog::new(storage.content_path()),
            ArtifactLog::new(storage.links_path()),
        ))
    }
}

impl<F, P, S> CrawlSession<F, P, S>
where
    F: Fetcher,
    P: PageParser,
    S: VisitedStore,
{
    pub fn new(
        fetcher: F,
        parser: P,
        store: S,
        scope: RootScope,
        content_log: ArtifactLog,
        links_log: ArtifactLog,
    ) -> Self {
        Self {
            fetcher,
            parser,
            store,
            scope,
            content_log,
            links_log,
        }
    }

    pub fn scope(&self) -> &RootScope {
        &self.scope
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Crawls a single URL and records the links it has not seen before
    ///
    /// Fetch and parse failures leave every artifact untouched. A storage
    /// failure stops the run at that point; records already appended stay.
    pub async fn run(&mut self, url: &str) -> Result<SessionReport, ScribeError> {
        tracing::debug!("Fetching {}", url);
        let body = self.fetcher.fetch(url).await?;
        let page = self.parser.parse(&body, url)?;

        let scoped: Vec<UrlRecord> = page
            .links
            .into_iter()
            .filter(|link| self.scope.contains(&link.url))
            .collect();
        let in_scope_links = scoped.len();

        let mut seen_on_page = HashSet::new();
        let new_links: Vec<UrlRecord> = scoped
            .into_iter()
            .filter(|link| {
                !self.store.is_member(&link.url) && seen_on_page.insert(link.url.clone())
            })
            .collect();

        // Render before writing so a bad link cannot leave half an update behind
        let links_block = if new_links.is_empty() {
            None
        } else {
            Some(links_entry(url, &new_links)?)
        };

        self.content_log.append(&content_entry(url, &page.text))?;

        if let Some(block) = links_block {
            self.links_log.append(&block)?;
            for link in &new_links {
                tracing::debug!("New link: {}", link.url);
                self.store.record(link)?;
            }
        }

        tracing::info!(
            "Crawled {}: {} links in scope, {} new",
            url,
            in_scope_links,
            new_links.len()
        );

        Ok(SessionReport {
            url: url.to_string(),
            in_scope_links,
            new_links,
        })
    }

    /// Compacts the visited set's backing store
    pub fn compact(&mut self) -> Result<usize, ScribeError> {
        Ok(self.store.compact()?)
    }
}

//! Crawler module for fetching and processing one page at a time
//!
//! This module contains the crawl logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - HTML text and link extraction behind the `PageParser` trait
//! - The crawl session that filters links and persists what is new

mod fetcher;
mod parser;
mod session;

pub use fetcher::{build_http_client, FetchCause, FetchFailure, Fetcher, HttpFetcher};
pub use parser::{parse_html, HtmlParser, PageParser, ParseFailure, ParsedPage};
pub use session::{CrawlSession, SessionReport};

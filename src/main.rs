//! Sumi-Scribe main entry point
//!
//! This is the command-line interface for the Sumi-Scribe page scribe.

use anyhow::Context;
use clap::Parser;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::io;
use std::path::{Path, PathBuf};
use sumi_scribe::config::{load_config_with_hash, validate_root_url, Config};
use sumi_scribe::crawler::{CrawlSession, Fetcher, PageParser};
use sumi_scribe::output::{aggregate, print_statistics};
use sumi_scribe::storage::{compact, VisitedStore};
use sumi_scribe::url::RootScope;
use sumi_scribe::{ConfigError, ScribeError};
use tracing_subscriber::EnvFilter;

/// Sumi-Scribe: an incremental, single-domain page scribe
///
/// Crawls one URL at a time, stores page text and newly discovered links,
/// and keeps a duplicate-free record of every URL seen across sessions.
/// Without URLs or a mode flag it starts an interactive menu.
#[derive(Parser, Debug)]
#[command(name = "sumi-scribe")]
#[command(version)]
#[command(about = "An incremental, single-domain page scribe", long_about = None)]
struct Cli {
    /// URLs to crawl once each, in order
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Root URL prefix used to scope links (an empty string disables filtering)
    #[arg(long, value_name = "ROOT")]
    root: Option<String>,

    /// Directory holding the text artifacts
    #[arg(long, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Remove duplicate entries from the visited set and exit
    #[arg(long, conflicts_with_all = ["stats", "urls"])]
    compact: bool,

    /// Show URL statistics over all artifacts and exit
    #[arg(long, conflicts_with_all = ["compact", "urls"])]
    stats: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(cli.config.as_deref())?;

    if let Some(dir) = &cli.storage_dir {
        config.storage = config.storage.with_directory(dir);
    }

    if let Some(root) = &cli.root {
        if !root.is_empty() {
            validate_root_url(root)?;
        }
        config.crawl.root_url = Some(root.clone());
    }

    if cli.compact {
        handle_compact(&config)
    } else if cli.stats {
        handle_stats(&config)
    } else if !cli.urls.is_empty() {
        handle_crawl(&config, &cli.urls).await
    } else {
        handle_interactive(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_scribe=info,warn"),
            1 => EnvFilter::new("sumi_scribe=debug,info"),
            2 => EnvFilter::new("sumi_scribe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // stdout belongs to the operator prompts
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if one was given, defaults otherwise
fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

fn configured_scope(config: &Config) -> RootScope {
    RootScope::new(config.crawl.root_url.clone().unwrap_or_default())
}

/// Handles --compact: deduplicates the visited set file
fn handle_compact(config: &Config) -> anyhow::Result<()> {
    let path = config.storage.url_list_path();
    let removed = compact(&path)?;
    println!("Removed {} duplicate URLs from {}", removed, path.display());
    Ok(())
}

/// Handles --stats: counts URLs over every artifact
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let scope = configured_scope(config);
    let stats = aggregate(&config.storage.directory, &scope)?;
    print_statistics(&stats, &scope);
    Ok(())
}

/// Crawls each URL given on the command line, in order
///
/// A URL that cannot be fetched or parsed is reported and skipped; a storage
/// failure stops the batch.
async fn handle_crawl(config: &Config, urls: &[String]) -> anyhow::Result<()> {
    let mut session = CrawlSession::open(config, configured_scope(config))?;
    let mut failed = 0;

    for url in urls {
        match session.run(url).await {
            Ok(report) => {
                println!("{}: {} new URLs recorded", url, report.recorded());
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!("{}", e);
                failed += 1;
            }
            Err(e) => {
                tracing::error!("Stopping: {}", e);
                return Err(e.into());
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} URLs could not be crawled", failed, urls.len());
    }

    Ok(())
}

/// Entries of the interactive menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Crawl,
    Compact,
    Stats,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 4] = [Self::Crawl, Self::Compact, Self::Stats, Self::Quit];

    fn label(self) -> &'static str {
        match self {
            Self::Crawl => "Crawl pages and store their data",
            Self::Compact => "Remove duplicate URLs",
            Self::Stats => "Show URL statistics",
            Self::Quit => "Quit",
        }
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// One line typed at the URL prompt
#[derive(Debug, PartialEq, Eq)]
enum UrlEntry<'a> {
    Blank,
    Back,
    Crawl(&'a str),
}

impl<'a> UrlEntry<'a> {
    fn parse(input: &'a str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            Self::Blank
        } else if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Self::Back
        } else {
            Self::Crawl(input)
        }
    }
}

/// Whether the URL prompt keeps going after a crawl
#[derive(Debug, PartialEq, Eq)]
enum CrawlFlow {
    Continue,
    Stop,
}

/// Turns the operator's root answer into a scope; empty means unfiltered
fn parse_root_entry(input: &str) -> Result<RootScope, ConfigError> {
    let root = input.trim();
    if root.is_empty() {
        return Ok(RootScope::unfiltered());
    }
    validate_root_url(root)?;
    Ok(RootScope::new(root))
}

/// Runs the interactive menu until the operator quits
async fn handle_interactive(config: &Config) -> anyhow::Result<()> {
    let theme = ColorfulTheme::default();

    let scope = match &config.crawl.root_url {
        Some(root) => RootScope::new(root.clone()),
        None => prompt_root(&theme)?,
    };
    if scope.is_unfiltered() {
        println!("No root URL set, every link is in scope.");
    } else {
        println!("Root URL set to: {}", scope.as_str());
    }

    let mut session = CrawlSession::open(config, scope)?;
    println!("Found {} previously recorded URLs.", session.store().len());

    let labels: Vec<&str> = MenuAction::ALL.iter().map(|action| action.label()).collect();

    loop {
        println!();
        let choice = Select::with_theme(&theme)
            .with_prompt("Choose an operation")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let Some(action) = choice.and_then(MenuAction::from_index) else {
            break;
        };

        match action {
            MenuAction::Crawl => crawl_interactively(&mut session, &theme).await?,
            MenuAction::Compact => report_outcome(session.compact().map(|removed| {
                println!("Removed {} duplicate URLs.", removed);
            })),
            MenuAction::Stats => report_outcome(
                aggregate(&config.storage.directory, session.scope())
                    .map(|stats| print_statistics(&stats, session.scope()))
                    .map_err(ScribeError::from),
            ),
            MenuAction::Quit => break,
        }
    }

    println!("Goodbye.");
    Ok(())
}

/// Storage failures end the operation, not the program
fn report_outcome(outcome: Result<(), ScribeError>) {
    if let Err(e) = outcome {
        tracing::error!("{}", e);
        println!("Operation failed: {}", e);
    }
}

/// Prompts for URLs until the operator types `exit` or a crawl hits storage trouble
async fn crawl_interactively<F, P, S>(
    session: &mut CrawlSession<F, P, S>,
    theme: &ColorfulTheme,
) -> anyhow::Result<()>
where
    F: Fetcher,
    P: PageParser,
    S: VisitedStore,
{
    loop {
        let input: String = Input::with_theme(theme)
            .with_prompt("URL to crawl ('exit' to go back)")
            .allow_empty(true)
            .interact_text()?;

        let url = match UrlEntry::parse(&input) {
            UrlEntry::Blank => continue,
            UrlEntry::Back => return Ok(()),
            UrlEntry::Crawl(url) => url,
        };

        if crawl_entry(session, url).await == CrawlFlow::Stop {
            return Ok(());
        }
    }
}

/// Crawls one URL typed at the prompt and reports the result
async fn crawl_entry<F, P, S>(session: &mut CrawlSession<F, P, S>, url: &str) -> CrawlFlow
where
    F: Fetcher,
    P: PageParser,
    S: VisitedStore,
{
    match session.run(url).await {
        Ok(report) => {
            println!("Data from {} saved.", url);
            println!("Added {} new URLs.", report.recorded());
            CrawlFlow::Continue
        }
        Err(e) if e.is_recoverable() => {
            tracing::warn!("{}", e);
            println!("Could not get data from {}.", url);
            CrawlFlow::Continue
        }
        Err(e) => {
            report_outcome(Err(e));
            CrawlFlow::Stop
        }
    }
}

/// Asks once for the session root; invalid answers are re-asked in place
fn prompt_root(theme: &ColorfulTheme) -> anyhow::Result<RootScope> {
    let root: String = Input::with_theme(theme)
        .with_prompt("Root URL (e.g. https://example.com/, empty for no filtering)")
        .allow_empty(true)
        .validate_with(|input: &String| parse_root_entry(input).map(|_| ()))
        .interact_text()?;

    Ok(parse_root_entry(&root)?)
}

use crate::config::types::{Config, CrawlConfig, FetchConfig, StorageConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_storage_config(&config.storage)?;
    validate_fetch_config(&config.fetch)?;
    Ok(())
}

/// Validates the root URL, if one is set
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    match config.root_url.as_deref() {
        Some(root) if !root.is_empty() => validate_root_url(root),
        _ => Ok(()),
    }
}

/// Checks that a non-empty root URL is an absolute http(s) URL
///
/// The root is still matched as a literal prefix; parsing only catches typos.
pub fn validate_root_url(root: &str) -> Result<(), ConfigError> {
    let url = Url::parse(root)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root URL '{}': {}", root, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Root URL '{}' must use the http or https scheme",
            root
        )));
    }

    Ok(())
}

/// Validates artifact file names
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "storage directory cannot be empty".to_string(),
        ));
    }

    let names = [
        ("content-file", &config.content_file),
        ("links-file", &config.links_file),
        ("url-list-file", &config.url_list_file),
    ];

    for (key, name) in names {
        validate_file_name(key, name)?;
    }

    if config.content_file == config.links_file
        || config.content_file == config.url_list_file
        || config.links_file == config.url_list_file
    {
        return Err(ConfigError::Validation(
            "content-file, links-file and url-list-file must be distinct".to_string(),
        ));
    }

    Ok(())
}

/// Artifact names must be plain `.txt` names so the statistics scan sees them
fn validate_file_name(key: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(ConfigError::Validation(format!(
            "{} must be a file name, not a path: '{}'",
            key, name
        )));
    }

    if !name.ends_with(".txt") || name.len() == ".txt".len() {
        return Err(ConfigError::Validation(format!(
            "{} must be a .txt file name, got '{}'",
            key, name
        )));
    }

    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

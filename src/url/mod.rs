//! Link classification for Sumi-Scribe
//!
//! A link is in scope when it starts with the configured root URL as a literal
//! string prefix. No scheme or host parsing happens here, so the rule is fast
//! but loose: `https://example.com/abc` is in scope for the root
//! `https://example.com/a`. That is a known limitation and is kept as is,
//! because the corpus statistics apply the same prefix rule.

mod matcher;

pub use matcher::matches_root_prefix;

/// Result of classifying a link against the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkScope {
    /// Link falls under the root (or no root is configured)
    InDomain,
    /// Link points elsewhere
    OutOfDomain,
}

impl LinkScope {
    pub fn is_in_domain(&self) -> bool {
        matches!(self, Self::InDomain)
    }
}

/// The operator's root URL, fixed for the lifetime of a session
///
/// An empty root means unfiltered mode: every link is in scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootScope {
    root: String,
}

impl RootScope {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// Unfiltered mode
    pub fn unfiltered() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.root
    }

    pub fn is_unfiltered(&self) -> bool {
        self.root.is_empty()
    }

    pub fn classify(&self, url: &str) -> LinkScope {
        classify(url, &self.root)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.classify(url).is_in_domain()
    }
}

/// Classifies a URL against a root prefix
///
/// # Examples
///
/// ```
/// use sumi_scribe::url::{classify, LinkScope};
///
/// assert_eq!(classify("https://a.com/page", "https://a.com/"), LinkScope::InDomain);
/// assert_eq!(classify("https://b.com/page", "https://a.com/"), LinkScope::OutOfDomain);
/// assert_eq!(classify("https://b.com/page", ""), LinkScope::InDomain);
/// ```
pub fn classify(url: &str, root: &str) -> LinkScope {
    if root.is_empty() || matches_root_prefix(root, url) {
        LinkScope::InDomain
    } else {
        LinkScope::OutOfDomain
    }
}

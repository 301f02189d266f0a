/// Checks whether `candidate` starts with `root`, byte for byte
///
/// No case folding and no trailing-slash normalization. An empty root
/// matches everything; callers that want "no root means no filtering"
/// get it for free.
///
/// # Examples
///
/// ```
/// use sumi_scribe::url::matches_root_prefix;
///
/// assert!(matches_root_prefix("https://example.com/", "https://example.com/docs"));
/// assert!(!matches_root_prefix("https://example.com/", "https://EXAMPLE.com/docs"));
/// assert!(matches_root_prefix("", "https://anything.org/"));
/// ```
pub fn matches_root_prefix(root: &str, candidate: &str) -> bool {
    candidate.starts_with(root)
}

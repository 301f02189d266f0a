//! Line shapes accepted and produced by the visited-set file
//!
//! Reading is lenient: a line may be labelled (`anchor: url`), a header
//! (`URL: url`) or a bare URL. Writing only ever produces the labelled shape,
//! falling back to the header shape when there is no label.

use crate::storage::traits::{StorageError, StorageResult};
use crate::storage::UrlRecord;

/// One accepted shape of a persisted line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    /// Anything containing `": "`; the URL follows the first occurrence
    Labelled,
    /// `URL: <url>`
    Header,
    /// A line that is nothing but a URL
    Bare,
}

const HEADER_PREFIX: &str = "URL: ";
const LABEL_DELIMITER: &str = ": ";

impl LineShape {
    /// Shapes in the order they are tried; the first match wins
    pub const PRECEDENCE: [LineShape; 3] = [Self::Labelled, Self::Header, Self::Bare];

    /// Extracts the URL if `line` has this shape
    pub fn extract(self, line: &str) -> Option<&str> {
        let url = match self {
            Self::Labelled => line
                .trim()
                .split_once(LABEL_DELIMITER)
                .map(|(_, url)| url),
            Self::Header => line.strip_prefix(HEADER_PREFIX).map(str::trim),
            Self::Bare => {
                let trimmed = line.trim();
                trimmed.starts_with("http").then_some(trimmed)
            }
        };
        url.filter(|url| !url.is_empty())
    }
}

/// Extracts the URL of a persisted line, or `None` for annotation lines
///
/// # Examples
///
/// ```
/// use sumi_scribe::storage::extract_url;
///
/// assert_eq!(extract_url("Home: https://a.com/"), Some("https://a.com/"));
/// assert_eq!(extract_url("URL: https://a.com/x\n"), Some("https://a.com/x"));
/// assert_eq!(extract_url("  https://a.com/y  "), Some("https://a.com/y"));
/// assert_eq!(extract_url("Odkazy:"), None);
/// ```
pub fn extract_url(line: &str) -> Option<&str> {
    LineShape::PRECEDENCE
        .iter()
        .find_map(|shape| shape.extract(line))
}

/// Renders the canonical line for a record, without the trailing newline
///
/// Labels are flattened to one line and any `": "` inside them is rewritten,
/// so the line always extracts back to exactly the record's URL.
pub fn canonical_line(record: &UrlRecord) -> StorageResult<String> {
    let url = record.url.as_str();
    if url.is_empty()
        || url.trim() != url
        || url.contains('\n')
        || url.contains('\r')
        || url.contains(LABEL_DELIMITER)
    {
        return Err(StorageError::Unrecordable(url.to_string()));
    }

    let label = record.label.as_deref().map(sanitize_label).unwrap_or_default();
    if label.is_empty() {
        Ok(format!("{}{}", HEADER_PREFIX, url))
    } else {
        Ok(format!("{}{}{}", label, LABEL_DELIMITER, url))
    }
}

fn sanitize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(LABEL_DELIMITER, " - ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_takes_text_after_first_delimiter() {
        assert_eq!(
            extract_url("Docs: https://a.com/docs"),
            Some("https://a.com/docs")
        );
        assert_eq!(extract_url("a: b: c"), Some("b: c"));
    }

    #[test]
    fn test_header_line() {
        assert_eq!(
            extract_url("URL: https://a.com/page\n"),
            Some("https://a.com/page")
        );
    }

    #[test]
    fn test_header_shape_alone() {
        assert_eq!(
            LineShape::Header.extract("URL: https://a.com/"),
            Some("https://a.com/")
        );
        assert_eq!(LineShape::Header.extract("url: https://a.com/"), None);
    }

    #[test]
    fn test_bare_url_is_trimmed() {
        assert_eq!(
            extract_url("\t https://a.com/bare \r\n"),
            Some("https://a.com/bare")
        );
    }

    #[test]
    fn test_annotation_lines_have_no_url() {
        assert_eq!(extract_url(""), None);
        assert_eq!(extract_url("\n"), None);
        assert_eq!(extract_url("Obsah:"), None);
        assert_eq!(extract_url("Odkazy:\n"), None);
        assert_eq!(extract_url("URL:"), None);
        assert_eq!(extract_url("some free text"), None);
    }

    #[test]
    fn test_labelled_wins_over_bare() {
        // A bare-looking line that also has a delimiter goes through the labelled rule
        assert_eq!(
            extract_url("https://a.com/x: https://a.com/y"),
            Some("https://a.com/y")
        );
    }

    #[test]
    fn test_canonical_line_with_label() {
        let record = UrlRecord::labelled("https://a.com/p", "Page");
        assert_eq!(canonical_line(&record).unwrap(), "Page: https://a.com/p");
    }

    #[test]
    fn test_canonical_line_without_label() {
        let record = UrlRecord::new("https://a.com/p");
        assert_eq!(canonical_line(&record).unwrap(), "URL: https://a.com/p");

        let blank = UrlRecord::labelled("https://a.com/p", "   ");
        assert_eq!(canonical_line(&blank).unwrap(), "URL: https://a.com/p");
    }

    #[test]
    fn test_awkward_labels_still_extract() {
        for label in ["Note: read this", "multi\nline\nanchor", "ends with:", "a:\nb"] {
            let record = UrlRecord::labelled("https://a.com/p", label);
            let line = canonical_line(&record).unwrap();
            assert!(!line.contains('\n'));
            assert_eq!(extract_url(&line), Some("https://a.com/p"), "label {:?}", label);
        }
    }

    #[test]
    fn test_unrecordable_urls() {
        for url in ["", " https://a.com/", "https://a.com/\nx", "https://a.com/: x"] {
            let result = canonical_line(&UrlRecord::new(url));
            assert!(matches!(result, Err(StorageError::Unrecordable(_))));
        }
    }
}

//! The Post Source: the JSON post index fetched by the browser half and
//! written by the build half ([`crate::index`]). Defines the wire record
//! ([`Summary`]) and the tolerant parser the browse core loads it with.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One post as it appears in the JSON index: just the metadata the list
/// page renders, in source order (the index is written newest-first and is
/// never re-sorted on the consuming side).
///
/// Only `title` and `url` are required; every other field falls back to an
/// empty default when missing so a sparse record still renders.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Summary {
    /// The post title.
    pub title: String,

    /// The post's unique slug.
    #[serde(default)]
    pub slug: String,

    /// The publication timestamp, ISO-8601. Display and sort order are
    /// precomputed by the build half, so consumers treat this as opaque.
    #[serde(default)]
    pub date: String,

    /// The human-readable publication date (e.g. "January 15, 2024").
    #[serde(default, rename = "prettyDate")]
    pub pretty_date: String,

    /// The post's tags. Unordered; matching is case-insensitive.
    #[serde(default)]
    pub tags: Vec<String>,

    /// The post's single category; empty when uncategorized.
    #[serde(default)]
    pub category: String,

    /// The description excerpt shown on the list page.
    #[serde(default)]
    pub description: String,

    /// The cover image URL; empty when the post has none.
    #[serde(default)]
    pub cover: String,

    /// The canonical link to the post page.
    pub url: String,
}

/// Parses the JSON post index. Fails only when the document itself is
/// unusable (not a JSON array); a malformed individual record is skipped
/// rather than failing the whole list, so one bad entry can't take down
/// the page.
pub fn parse(json: &str) -> Result<Vec<Summary>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(records
        .into_iter()
        .filter_map(|record| serde_json::from_value(record).ok())
        .collect())
}

/// The result of loading the Post Source.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an unusable Post Source document. The recovery is a visible
/// failed-to-load state in place of the post list ([`crate::render`]), not
/// a retry.
#[derive(Debug)]
pub enum Error {
    /// Returned when the index document is not a JSON array.
    Parse(serde_json::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "Parsing post index: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    /// Converts a [`serde_json::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for deserialization functions.
    fn from(err: serde_json::Error) -> Error {
        Error::Parse(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_full_record() -> Result<()> {
        let posts = parse(
            r#"[{
                "title": "Rust Basics",
                "slug": "rust-basics",
                "date": "2024-01-15T00:00:00.000Z",
                "prettyDate": "January 15, 2024",
                "tags": ["rust", "systems"],
                "category": "Tech",
                "description": "An introduction.",
                "cover": "https://example.org/cover.png",
                "url": "https://example.org/blog/rust-basics/"
            }]"#,
        )?;
        assert_eq!(1, posts.len());
        assert_eq!("Rust Basics", posts[0].title);
        assert_eq!(vec!["rust", "systems"], posts[0].tags);
        Ok(())
    }

    #[test]
    fn test_parse_applies_field_defaults() -> Result<()> {
        let posts = parse(
            r#"[{"title": "Sparse", "url": "https://example.org/blog/sparse/"}]"#,
        )?;
        assert_eq!(1, posts.len());
        assert!(posts[0].tags.is_empty());
        assert_eq!("", posts[0].category);
        assert_eq!("", posts[0].cover);
        Ok(())
    }

    #[test]
    fn test_parse_skips_malformed_records() -> Result<()> {
        // The middle record is missing `url`; only it is dropped.
        let posts = parse(
            r#"[
                {"title": "First", "url": "https://example.org/blog/first/"},
                {"title": "Broken"},
                {"title": "Last", "url": "https://example.org/blog/last/"}
            ]"#,
        )?;
        assert_eq!(
            vec!["First", "Last"],
            posts.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
        );
        Ok(())
    }

    #[test]
    fn test_parse_rejects_non_array_documents() {
        assert!(parse("{}").is_err());
        assert!(parse("not json").is_err());
    }
}

//! Defines the [`Post`] and [`Parser`] types and the logic for parsing
//! posts from the file system into memory. A post source file is a
//! markdown document with optional YAML frontmatter:
//!
//! ```md
//! ---
//! title: Hello, world!
//! date: 2024-01-15
//! tags: [greet]
//! category: Tech
//! ---
//! # Hello
//!
//! World
//! ```
//!
//! Every frontmatter field is optional: the title and slug fall back to
//! the file stem, the date to the file's modification time, and the
//! description to a plain-text excerpt of the body.

use std::collections::HashSet;
use std::fmt;
use std::fs::{read_dir, File};
use std::path::Path;

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::Deserialize;
use url::Url;

use crate::markdown;
use crate::source::Summary;

const MARKDOWN_EXTENSION: &str = ".md";

/// The length limit for excerpt-derived descriptions.
const EXCERPT_LENGTH: usize = 180;

/// One parsed post: the metadata the index and feeds need plus the
/// rendered HTML body. Posts are immutable once parsed.
#[derive(Clone, Debug)]
pub struct Post {
    /// The post title.
    pub title: String,

    /// The post's slug, unique across the site. Always slugified.
    pub slug: String,

    /// The publication timestamp. Used as the sort key and rendered into
    /// the index, the feeds, and the sitemap.
    pub date: DateTime<Utc>,

    /// The post's tags, in frontmatter order.
    pub tags: Vec<String>,

    /// The post's single category; empty when uncategorized.
    pub category: String,

    /// The description excerpt.
    pub description: String,

    /// The cover image URL; empty when the post has none.
    pub cover: String,

    /// The canonical URL of the post page:
    /// `{site_url}blog/{slug}/`.
    pub url: Url,

    /// The post body, rendered to HTML.
    pub body: String,
}

impl Post {
    /// Converts the post into its wire record for the JSON index: RFC 3339
    /// date with milliseconds and a `Z` suffix, long-form display date.
    pub fn summary(&self) -> Summary {
        Summary {
            title: self.title.clone(),
            slug: self.slug.clone(),
            date: self.date.to_rfc3339_opts(SecondsFormat::Millis, true),
            pretty_date: self.pretty_date(),
            tags: self.tags.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            cover: self.cover.clone(),
            url: self.url.to_string(),
        }
    }

    /// The human-readable publication date, e.g. "January 15, 2024".
    pub fn pretty_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

/// Parses [`Post`] objects from source files.
pub struct Parser<'a> {
    /// The base URL for post pages (i.e., the URL for a post is
    /// `{blog_url}{slug}/`). Must end in a trailing slash for
    /// [`Url::join`] to treat it as a directory.
    blog_url: &'a Url,
}

impl<'a> Parser<'a> {
    /// Constructs a new parser. See fields on [`Parser`] for argument
    /// descriptions.
    pub fn new(blog_url: &'a Url) -> Parser<'a> {
        Parser { blog_url }
    }

    /// Searches `source_directory` for post files (extension = `.md`) and
    /// returns the parsed [`Post`]s sorted by date (most recent first).
    /// Drafts are skipped; a duplicate slug fails the whole parse, since
    /// two posts would otherwise race for the same output page.
    pub fn parse_posts(&self, source_directory: &Path) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        for result in read_dir(source_directory)? {
            let entry = result?;
            let os_file_name = entry.file_name();
            let file_name = os_file_name.to_string_lossy();
            if !file_name.ends_with(MARKDOWN_EXTENSION) || !entry.file_type()?.is_file() {
                continue;
            }
            match self.parse_post(&entry.path()) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => {} // draft
                Err(e) => {
                    return Err(Error::Annotated(
                        format!("parsing post `{}`", file_name),
                        Box::new(e),
                    ))
                }
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date));

        let mut slugs = HashSet::new();
        for post in &posts {
            if !slugs.insert(post.slug.clone()) {
                return Err(Error::DuplicateSlug(post.slug.clone()));
            }
        }

        Ok(posts)
    }

    /// Parses a single post file. Returns `Ok(None)` for drafts.
    fn parse_post(&self, path: &Path) -> Result<Option<Post>> {
        use std::io::Read;
        let mut contents = String::new();
        File::open(path)?.read_to_string(&mut contents)?;

        let (frontmatter, body) = split_frontmatter(&contents)?;
        if frontmatter.draft {
            return Ok(None);
        }

        // file_stem can only be None for paths ending in `..`, which
        // read_dir never yields.
        let stem = path.file_stem().unwrap().to_string_lossy();
        let slug = slug::slugify(frontmatter.slug.as_deref().unwrap_or(&stem));
        let date = match &frontmatter.date {
            Some(raw) => parse_date(raw)?,
            None => DateTime::from(std::fs::metadata(path)?.modified()?),
        };
        let description = match frontmatter.description {
            Some(description) => description,
            None => markdown::excerpt(body, EXCERPT_LENGTH),
        };

        Ok(Some(Post {
            title: frontmatter.title.unwrap_or_else(|| stem.into_owned()),
            url: self.blog_url.join(&format!("{}/", slug))?,
            slug,
            date,
            tags: frontmatter.tags.into_vec(),
            category: frontmatter.category,
            description,
            cover: frontmatter.cover,
            body: markdown::to_html(body),
        }))
    }
}

/// Splits a source file into its parsed frontmatter and its body. A file
/// that doesn't open with a `---` fence has no frontmatter: the whole
/// input is the body and every field takes its default.
fn split_frontmatter(input: &str) -> Result<(Frontmatter, &str)> {
    const FENCE: &str = "---";
    if !input.starts_with(FENCE) {
        return Ok((Frontmatter::default(), input));
    }
    match input[FENCE.len()..].find(FENCE) {
        None => Err(Error::FrontmatterMissingEndFence),
        Some(offset) => {
            let yaml = &input[FENCE.len()..FENCE.len() + offset];
            let body = &input[FENCE.len() + offset + FENCE.len()..];
            // serde_yaml rejects a fully empty document, but an empty
            // frontmatter block is fine: every field has a default.
            let frontmatter = match yaml.trim().is_empty() {
                true => Frontmatter::default(),
                false => serde_yaml::from_str(yaml)?,
            };
            Ok((frontmatter, body))
        }
    }
}

/// Parses a frontmatter date: RFC 3339, or a plain `YYYY-MM-DD` taken as
/// midnight UTC.
fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
    Ok(Utc.from_utc_datetime(&date.and_hms(0, 0, 0)))
}

#[derive(Default, Deserialize)]
struct Frontmatter {
    /// The title of the post. Defaults to the source file stem.
    #[serde(default)]
    title: Option<String>,

    /// The slug for the post's URL. Defaults to the source file stem;
    /// slugified either way.
    #[serde(default)]
    slug: Option<String>,

    /// The publication date. Defaults to the source file's mtime.
    #[serde(default)]
    date: Option<String>,

    /// The tags: a YAML sequence, or a single comma-separated string.
    #[serde(default)]
    tags: Tags,

    /// The category, if any.
    #[serde(default)]
    category: String,

    /// The description. Defaults to an excerpt of the body.
    #[serde(default)]
    description: Option<String>,

    /// The cover image URL, if any.
    #[serde(default)]
    cover: String,

    /// Drafts are skipped by [`Parser::parse_posts`].
    #[serde(default)]
    draft: bool,
}

/// The two shapes the `tags` frontmatter field can take.
#[derive(Deserialize)]
#[serde(untagged)]
enum Tags {
    List(Vec<String>),
    Joined(String),
}

impl Default for Tags {
    fn default() -> Tags {
        Tags::List(Vec::new())
    }
}

impl Tags {
    fn into_vec(self) -> Vec<String> {
        match self {
            Tags::List(tags) => tags,
            Tags::Joined(joined) => joined
                .split(',')
                .map(|tag| tag.trim().to_owned())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Post`] object.
#[derive(Debug)]
pub enum Error {
    /// Returned when a post source file opens a frontmatter fence (`---`)
    /// but never closes it.
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when a frontmatter date is neither RFC 3339 nor
    /// `YYYY-MM-DD`.
    DateParse(chrono::ParseError),

    /// Returned when two posts resolve to the same slug.
    DuplicateSlug(String),

    /// Returned when there is a problem joining the post URL.
    UrlParse(url::ParseError),

    /// Returned for other I/O errors.
    Io(std::io::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FrontmatterMissingEndFence => {
                write!(f, "Missing closing `---`")
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::DateParse(err) => err.fmt(f),
            Error::DuplicateSlug(slug) => {
                write!(f, "Duplicate slug `{}`", slug)
            }
            Error::UrlParse(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FrontmatterMissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::DateParse(err) => Some(err),
            Error::DuplicateSlug(_) => None,
            Error::UrlParse(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<chrono::ParseError> for Error {
    /// Converts a [`chrono::ParseError`] into an [`Error`]. It allows us
    /// to use the `?` operator for date parsing functions.
    fn from(err: chrono::ParseError) -> Error {
        Error::DateParse(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`]. It allows us to
    /// use the `?` operator for URL parsing and joining functions.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

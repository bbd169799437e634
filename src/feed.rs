//! Support for creating the syndication feeds from a list of posts: an
//! RSS 2.0 feed (`feed.xml`) and an Atom feed (`feed.atom`) with the same
//! entries.

use crate::config::Author;
use crate::post::Post;
use atom_syndication::{Entry, Error as AtomError, Feed, Link, Person};
use chrono::{FixedOffset, TimeZone};
use rss::{Channel, Guid, Item};
use std::fmt;
use std::io::Write;
use url::Url;

/// Bundled configuration for creating the feeds.
pub struct FeedConfig {
    /// The site title; the channel title is `{title} — Blog`.
    pub title: String,

    /// The site description.
    pub description: String,

    /// The site's home page, used as the Atom feed's alternate link.
    pub home_page: Url,

    /// The blog index, used as the RSS channel link and the feed id.
    pub blog_url: Url,

    pub author: Option<Author>,
}

/// Creates the RSS 2.0 feed and writes it to a [`Write`]. One item per
/// post: title, link, permalink GUID, RFC 2822 publication date, and the
/// description as the item body.
pub fn write_rss<W: Write>(config: &FeedConfig, posts: &[Post], w: W) -> Result<()> {
    let mut channel = Channel::default();
    channel.set_title(format!("{} — Blog", config.title));
    channel.set_link(config.blog_url.to_string());
    channel.set_description(config.description.clone());
    channel.set_items(
        posts
            .iter()
            .map(|post| {
                let mut guid = Guid::default();
                guid.set_value(post.url.to_string());
                guid.set_permalink(true);

                let mut item = Item::default();
                item.set_title(Some(post.title.clone()));
                item.set_link(Some(post.url.to_string()));
                item.set_guid(Some(guid));
                item.set_pub_date(Some(post.date.to_rfc2822()));
                item.set_description(Some(post.description.clone()));
                item
            })
            .collect::<Vec<Item>>(),
    );
    channel.write_to(w)?;
    Ok(())
}

/// Creates the Atom feed and writes it to a [`Write`].
pub fn write_atom<W: Write>(config: &FeedConfig, posts: &[Post], w: W) -> Result<()> {
    use std::collections::HashMap;

    // The feed's `updated` is the newest entry's date; chrono's Utc and
    // atom_syndication's FixedDateTime don't line up directly, so
    // everything goes through a zero-offset FixedOffset.
    let offset = FixedOffset::east(0);
    let updated = posts
        .iter()
        .map(|post| post.date)
        .max()
        .unwrap_or_else(|| chrono::Utc.timestamp(0, 0));

    let feed = Feed {
        entries: feed_entries(config, posts),
        title: format!("{} — Blog", config.title).into(),
        id: config.blog_url.to_string(),
        updated: offset.from_utc_datetime(&updated.naive_utc()),
        authors: author_to_people(config.author.clone()),
        categories: Vec::new(),
        contributors: Vec::new(),
        generator: None,
        icon: None,
        logo: None,
        rights: None,
        subtitle: Some(config.description.clone().into()),
        extensions: HashMap::new(),
        namespaces: HashMap::new(),
        links: vec![Link {
            href: config.home_page.to_string(),
            rel: "alternate".to_string(),
            title: None,
            hreflang: None,
            mime_type: None,
            length: None,
        }],
    };

    feed.write_to(w)?;
    Ok(())
}

fn feed_entries(config: &FeedConfig, posts: &[Post]) -> Vec<Entry> {
    use std::collections::HashMap;

    let offset = FixedOffset::east(0);
    posts
        .iter()
        .map(|post| {
            let date = offset.from_utc_datetime(&post.date.naive_utc());
            Entry {
                id: post.url.to_string(),
                title: post.title.clone().into(),
                updated: date,
                authors: author_to_people(config.author.clone()),
                links: vec![Link {
                    href: post.url.to_string(),
                    rel: "alternate".to_owned(),
                    title: None,
                    mime_type: None,
                    hreflang: None,
                    length: None,
                }],
                rights: None,
                summary: Some(post.description.clone().into()),
                categories: Vec::new(),
                contributors: Vec::new(),
                published: Some(date),
                source: None,
                content: None,
                extensions: HashMap::new(),
            }
        })
        .collect()
}

fn author_to_people(author: Option<Author>) -> Vec<Person> {
    match author {
        Some(author) => vec![Person {
            name: author.name,
            email: author.email,
            uri: None,
        }],
        None => Vec::new(),
    }
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem creating a feed. Variants include I/O, RSS, and
/// Atom issues.
#[derive(Debug)]
pub enum Error {
    /// Returned when there is a generic I/O error.
    Io(std::io::Error),

    /// Returned when there is an RSS-related error.
    Rss(rss::Error),

    /// Returned when there is an Atom-related error.
    Atom(AtomError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Rss(err) => err.fmt(f),
            Error::Atom(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Rss(err) => Some(err),
            Error::Atom(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator in fallible feed operations.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<rss::Error> for Error {
    /// Converts [`rss::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator in fallible feed operations.
    fn from(err: rss::Error) -> Error {
        Error::Rss(err)
    }
}

impl From<AtomError> for Error {
    /// Converts [`AtomError`]s into [`Error`]. This allows us to use the
    /// `?` operator in fallible feed operations.
    fn from(err: AtomError) -> Error {
        Error::Atom(err)
    }
}

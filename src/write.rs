//! Responsible for templating and writing the static HTML pages: one page
//! per post under `blog/{slug}/index.html`, plus the blog index shell that
//! the browser half fills in at runtime.

use crate::post::Post;
use chrono::SecondsFormat;
use gtmpl::Template;
use gtmpl_value::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;
use url::Url;

/// Renders posts through the theme templates and writes them to disk.
pub struct Writer<'a> {
    /// The template for post pages.
    pub post_template: &'a Template,

    /// The template for the blog index shell.
    pub index_template: &'a Template,

    /// The directory in which the blog pages are written: the index shell
    /// at `{blog_output_directory}/index.html` and each post at
    /// `{blog_output_directory}/{slug}/index.html`.
    pub blog_output_directory: &'a Path,

    /// The site title, made available to every template as `site.title`.
    pub site_title: &'a str,

    /// The site description (`site.description`).
    pub site_description: &'a str,

    /// The site root URL (`site.url`), typically the destination for the
    /// site-header link.
    pub site_url: &'a Url,
}

impl Writer<'_> {
    /// Writes every post page.
    pub fn write_posts(&self, posts: &[Post]) -> Result<()> {
        for post in posts {
            self.write_post(post)?;
        }
        Ok(())
    }

    /// Templates a single [`Post`] and writes it to
    /// `{blog_output_directory}/{slug}/index.html`.
    fn write_post(&self, post: &Post) -> Result<()> {
        let dir = self.blog_output_directory.join(&post.slug);
        std::fs::create_dir_all(&dir)?;
        self.render(
            self.post_template,
            self.post_value(post),
            &dir.join("index.html"),
        )
    }

    /// Writes the blog index shell to
    /// `{blog_output_directory}/index.html`. The shell carries only the
    /// site fields; the post list, filter controls, and pagination are
    /// rendered client-side from the JSON index.
    pub fn write_blog_index(&self) -> Result<()> {
        std::fs::create_dir_all(self.blog_output_directory)?;
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("site".to_owned(), self.site_value());
        self.render(
            self.index_template,
            Value::Object(m),
            &self.blog_output_directory.join("index.html"),
        )
    }

    fn render(&self, template: &Template, value: Value, path: &Path) -> Result<()> {
        let context = gtmpl::Context::from(value).map_err(Error::Template)?;
        template.execute(&mut File::create(path)?, &context)?;
        Ok(())
    }

    /// Converts a [`Post`] into a [`Value`] for templating. The result is
    /// a [`Value::Object`] with the post's fields plus the `site` object.
    fn post_value(&self, post: &Post) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), Value::String(post.title.clone()));
        m.insert(
            "date".to_owned(),
            Value::String(post.date.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        m.insert(
            "pretty_date".to_owned(),
            Value::String(post.pretty_date()),
        );
        m.insert(
            "tags".to_owned(),
            Value::Array(
                post.tags
                    .iter()
                    .map(|tag| Value::String(tag.clone()))
                    .collect(),
            ),
        );
        m.insert("category".to_owned(), Value::String(post.category.clone()));
        m.insert(
            "description".to_owned(),
            Value::String(post.description.clone()),
        );
        m.insert("cover".to_owned(), Value::String(post.cover.clone()));
        m.insert("url".to_owned(), Value::String(post.url.to_string()));
        m.insert("body".to_owned(), Value::String(post.body.clone()));
        m.insert("site".to_owned(), self.site_value());
        Value::Object(m)
    }

    fn site_value(&self) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), Value::String(self.site_title.to_owned()));
        m.insert(
            "description".to_owned(),
            Value::String(self.site_description.to_owned()),
        );
        m.insert("url".to_owned(), Value::String(self.site_url.to_string()));
        Value::Object(m)
    }
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(String),

    /// An error writing the output files.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use
    /// the `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`].
    /// This allows us to use the `?` operator for fallible template
    /// operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}

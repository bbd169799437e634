//! Exports the [`build_site`] function which stitches together the
//! high-level steps of building the output site: parsing the posts
//! ([`crate::post`]), rendering the post pages and the blog index shell
//! ([`crate::write`]), writing the JSON post index ([`crate::index`]), the
//! sitemap ([`crate::sitemap`]), and the feeds ([`crate::feed`]), and
//! copying the static source directory into the static output directory.

use crate::config::Config;
use crate::feed::{self, Error as FeedError, FeedConfig};
use crate::index;
use crate::post::{Error as ParseError, Parser as PostParser};
use crate::sitemap;
use crate::write::{Error as WriteError, Writer};
use gtmpl::Template;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Builds the site from a [`Config`] object. This calls into
/// [`PostParser::parse_posts`] and [`Writer`] which do the heavy-lifting,
/// then emits the machine-readable outputs (JSON index, sitemap, feeds)
/// and copies the static assets. Returns the number of posts built.
pub fn build_site(config: &Config) -> Result<usize> {
    let posts = PostParser::new(&config.blog_url).parse_posts(&config.posts_source_directory)?;

    // Parse the template files.
    let post_template = parse_template(config.post_template.iter())?;
    let index_template = parse_template(config.index_template.iter())?;

    // Blow away the old blog and static output directories so stale pages
    // from deleted or renamed posts don't linger. The root output
    // directory itself is left alone in case the user pointed it at a
    // directory with other contents.
    rmdir(&config.blog_output_directory)?;
    rmdir(&config.static_output_directory)?;
    std::fs::create_dir_all(&config.root_output_directory)?;

    // Write the post pages and the index shell.
    let writer = Writer {
        post_template: &post_template,
        index_template: &index_template,
        blog_output_directory: &config.blog_output_directory,
        site_title: &config.title,
        site_description: &config.description,
        site_url: &config.site_url,
    };
    writer.write_posts(&posts)?;
    writer.write_blog_index()?;

    // Write the JSON index consumed by the browser half.
    std::fs::create_dir_all(&config.assets_output_directory)?;
    index::write_index(
        &posts,
        File::create(config.assets_output_directory.join("posts.json"))?,
    )?;

    // Write the sitemap and the feeds.
    sitemap::write_sitemap(
        &config.site_url,
        &config.blog_url,
        &posts,
        File::create(config.root_output_directory.join("sitemap.xml"))?,
    )?;
    let feed_config = FeedConfig {
        title: config.title.clone(),
        description: config.description.clone(),
        home_page: config.site_url.clone(),
        blog_url: config.blog_url.clone(),
        author: config.author.clone(),
    };
    feed::write_rss(
        &feed_config,
        &posts,
        File::create(config.root_output_directory.join("feed.xml"))?,
    )?;
    feed::write_atom(
        &feed_config,
        &posts,
        File::create(config.root_output_directory.join("feed.atom"))?,
    )?;

    // Copy the static directory, if the project has one.
    if config.static_source_directory.is_dir() {
        copy_dir(
            &config.static_source_directory,
            &config.static_output_directory,
        )?;
    }

    Ok(posts.len())
}

fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    for result in WalkDir::new(src) {
        let entry = result?;
        // strip_prefix shouldn't fail since the walk is rooted at `src`.
        let target = dst.join(entry.path().strip_prefix(src).unwrap());
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

// Loads the template file contents, concatenates them, and parses the
// result into a template.
fn parse_template<P: AsRef<Path>>(template_files: impl Iterator<Item = P>) -> Result<Template> {
    let mut contents = String::new();
    for template_file in template_files {
        use std::io::Read;
        let template_file = template_file.as_ref();
        File::open(&template_file)
            .map_err(|e| Error::OpenTemplateFile {
                path: template_file.to_owned(),
                err: e,
            })?
            .read_to_string(&mut contents)?;
        contents.push(' ');
    }

    let mut template = Template::default();
    template
        .parse(&contents)
        .map_err(|e| Error::ParseTemplate(e.to_string()))?;
    Ok(template)
}

fn rmdir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(x) => Ok(x),
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => Ok(()),
            _ => Err(Error::Clean {
                path: dir.to_owned(),
                err: e,
            }),
        },
    }
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during parsing,
/// writing, cleaning output directories, parsing template files, and
/// other I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors during parsing.
    Parse(ParseError),

    /// Returned for errors writing [`crate::post::Post`]s to disk as HTML
    /// files.
    Write(WriteError),

    /// Returned for I/O problems while cleaning output directories.
    Clean { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems while opening template files.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing template files.
    ParseTemplate(String),

    /// Returned for errors writing the JSON post index.
    Index(serde_json::Error),

    /// Returned for errors writing the feeds.
    Feed(FeedError),

    /// Returned for WalkDir I/O errors while copying static assets.
    WalkDir(walkdir::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory '{}': {}", path.display(), err)
            }
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate(err) => err.fmt(f),
            Error::Index(err) => write!(f, "Writing post index: {}", err),
            Error::Feed(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Write(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate(_) => None,
            Error::Index(err) => Some(err),
            Error::Feed(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<ParseError> for Error {
    /// Converts [`ParseError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}

impl From<serde_json::Error> for Error {
    /// Converts [`serde_json::Error`]s into [`Error`]. This allows us to
    /// use the `?` operator.
    fn from(err: serde_json::Error) -> Error {
        Error::Index(err)
    }
}

impl From<FeedError> for Error {
    /// Converts [`FeedError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: FeedError) -> Error {
        Error::Feed(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts [`walkdir::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_build_site() -> Result<()> {
        let output = std::env::temp_dir().join("stele-build-test");
        let _ = std::fs::remove_dir_all(&output);

        let config = Config::from_directory(Path::new("./testdata"), &output)
            .expect("loading the testdata project");
        let count = build_site(&config)?;
        assert_eq!(3, count);

        // The post pages and the index shell.
        let post_page =
            std::fs::read_to_string(output.join("blog/rust-basics/index.html"))?;
        assert!(post_page.contains("Rust Basics"));
        assert!(post_page.contains("<h1>Getting started</h1>"));
        let shell = std::fs::read_to_string(output.join("blog/index.html"))?;
        assert!(shell.contains("My Portfolio"));
        assert!(shell.contains(r#"id="posts""#));

        // The machine-readable outputs.
        let json = std::fs::read_to_string(output.join("assets/posts.json"))?;
        assert!(json.contains("\"prettyDate\""));
        let sitemap = std::fs::read_to_string(output.join("sitemap.xml"))?;
        assert!(sitemap.contains("https://example.org/blog/rust-basics/"));
        let rss = std::fs::read_to_string(output.join("feed.xml"))?;
        assert!(rss.contains("<rss"));
        let atom = std::fs::read_to_string(output.join("feed.atom"))?;
        assert!(atom.contains("<feed"));

        // The static assets.
        assert!(output.join("static/styles.css").is_file());

        std::fs::remove_dir_all(&output)?;
        Ok(())
    }
}

//! Project configuration. A project is a directory containing a
//! `stele.yaml` file, a `posts` directory of markdown sources, a `theme`
//! directory with the page templates, and optionally a `static` directory
//! of assets copied verbatim into the output.

use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

const PROJECT_FILE: &str = "stele.yaml";

/// The site author, rendered into the feeds.
#[derive(Clone, Debug, Deserialize)]
pub struct Author {
    pub name: String,

    #[serde(default)]
    pub email: Option<String>,
}

/// The `stele.yaml` schema.
#[derive(Deserialize)]
struct Project {
    /// The absolute URL the site is served from. A trailing slash is
    /// significant: without one, [`Url::join`] treats the last path
    /// component as a file name and drops it.
    site_url: Url,

    /// The site title.
    title: String,

    /// The site description, used in the feeds and the index page.
    #[serde(default)]
    description: String,

    #[serde(default)]
    author: Option<Author>,
}

/// The `theme/theme.yaml` schema. Each template is a list of files
/// concatenated before parsing, so themes can share partials.
#[derive(Deserialize)]
struct Theme {
    post_template: Vec<PathBuf>,
    index_template: Vec<PathBuf>,
}

/// The fully-resolved build configuration.
pub struct Config {
    pub site_url: Url,
    pub blog_url: Url,
    pub title: String,
    pub description: String,
    pub author: Option<Author>,
    pub posts_source_directory: PathBuf,
    pub static_source_directory: PathBuf,
    pub post_template: Vec<PathBuf>,
    pub index_template: Vec<PathBuf>,
    pub root_output_directory: PathBuf,
    pub blog_output_directory: PathBuf,
    pub assets_output_directory: PathBuf,
    pub static_output_directory: PathBuf,
}

impl Config {
    /// Looks for `stele.yaml` in `dir` or the nearest ancestor directory
    /// that has one, then resolves it via [`Config::from_project_file`].
    pub fn from_directory(dir: &Path, output_directory: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path, output_directory)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent, output_directory),
                None => Err(Error::ProjectFileNotFound),
            }
        }
    }

    /// Resolves a project file into a [`Config`]: source directories are
    /// siblings of the project file, template paths are relative to the
    /// theme directory, and the output layout hangs off
    /// `output_directory`.
    pub fn from_project_file(path: &Path, output_directory: &Path) -> Result<Config> {
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        let project_root = path.parent().ok_or(Error::ProjectFileNotFound)?;

        let theme_dir = project_root.join("theme");
        let theme: Theme =
            serde_yaml::from_reader(open(&theme_dir.join("theme.yaml"), "theme")?)?;

        Ok(Config {
            blog_url: project.site_url.join("blog/")?,
            posts_source_directory: project_root.join("posts"),
            static_source_directory: project_root.join("static"),
            post_template: theme
                .post_template
                .iter()
                .map(|relpath| theme_dir.join(relpath))
                .collect(),
            index_template: theme
                .index_template
                .iter()
                .map(|relpath| theme_dir.join(relpath))
                .collect(),
            root_output_directory: output_directory.to_owned(),
            blog_output_directory: output_directory.join("blog"),
            assets_output_directory: output_directory.join("assets"),
            static_output_directory: output_directory.join("static"),
            site_url: project.site_url,
            title: project.title,
            description: project.description,
            author: project.author,
        })
    }
}

fn open(path: &Path, kind: &'static str) -> Result<File> {
    File::open(path).map_err(|err| Error::Open {
        kind,
        path: path.to_owned(),
        err,
    })
}

/// The result of loading a configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading the project configuration.
#[derive(Debug)]
pub enum Error {
    /// Returned when no `stele.yaml` exists in the starting directory or
    /// any of its ancestors.
    ProjectFileNotFound,

    /// Returned for I/O problems opening the project or theme file.
    Open {
        kind: &'static str,
        path: PathBuf,
        err: std::io::Error,
    },

    /// Returned when there was an error parsing a configuration file as
    /// YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when there is a problem joining the blog URL.
    UrlParse(url::ParseError),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ProjectFileNotFound => {
                write!(f, "Could not find `{}` in any parent directory", PROJECT_FILE)
            }
            Error::Open { kind, path, err } => {
                write!(f, "Opening {} file '{}': {}", kind, path.display(), err)
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::UrlParse(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ProjectFileNotFound => None,
            Error::Open { err, .. } => Some(err),
            Error::DeserializeYaml(err) => Some(err),
            Error::UrlParse(err) => Some(err),
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

impl From<url::ParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`]. It allows us to
    /// use the `?` operator for URL parsing and joining functions.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_directory_walks_up() -> Result<()> {
        // Starting below the project root still finds `stele.yaml`.
        let config =
            Config::from_directory(Path::new("./testdata/posts"), Path::new("/tmp/out"))?;
        assert_eq!("My Portfolio", config.title);
        assert_eq!("https://example.org/", config.site_url.as_str());
        assert_eq!("https://example.org/blog/", config.blog_url.as_str());
        Ok(())
    }

    #[test]
    fn test_resolved_layout() -> Result<()> {
        let config =
            Config::from_directory(Path::new("./testdata"), Path::new("/tmp/out"))?;
        assert_eq!(PathBuf::from("./testdata/posts"), config.posts_source_directory);
        assert_eq!(
            PathBuf::from("./testdata/theme/post.html"),
            config.post_template[0],
        );
        assert_eq!(PathBuf::from("/tmp/out/blog"), config.blog_output_directory);
        assert_eq!(PathBuf::from("/tmp/out/assets"), config.assets_output_directory);
        Ok(())
    }

    #[test]
    fn test_missing_project_file() {
        match Config::from_directory(Path::new("/"), Path::new("/tmp/out")) {
            Err(Error::ProjectFileNotFound) => {}
            _ => panic!("wanted a ProjectFileNotFound error"),
        }
    }
}

//! Writes the JSON post index: the Post Source document the browser half
//! fetches and [`crate::source`] parses.

use crate::post::Post;
use crate::source::Summary;
use std::io::Write;

/// Serializes the posts' wire records ([`Post::summary`]) as a
/// pretty-printed JSON array, preserving the newest-first order the posts
/// were parsed in.
pub fn write_index<W: Write>(posts: &[Post], w: W) -> Result<()> {
    let summaries: Vec<Summary> = posts.iter().map(Post::summary).collect();
    serde_json::to_writer_pretty(w, &summaries)
}

/// The result of writing the index. [`serde_json::Error`] wraps the
/// underlying I/O error, so no dedicated error type is needed here.
pub type Result<T> = serde_json::Result<T>;

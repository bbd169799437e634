//! Writes `sitemap.xml`: the site root, the blog index, and one entry per
//! post.

use crate::post::Post;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use std::io;
use std::io::Write;
use url::Url;

/// Writes the sitemap. The two index entries carry the newest post date
/// as their `lastmod` (the Unix epoch when there are no posts); each post
/// entry carries its own date. Priorities follow the usual root > index >
/// leaf ordering.
pub fn write_sitemap<W: Write>(
    site_url: &Url,
    blog_url: &Url,
    posts: &[Post],
    mut w: W,
) -> io::Result<()> {
    let latest = posts
        .iter()
        .map(|post| post.date)
        .max()
        .unwrap_or_else(|| Utc.timestamp(0, 0));

    writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        w,
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#
    )?;
    write_entry(&mut w, site_url.as_str(), &latest, "weekly", "1.0")?;
    write_entry(&mut w, blog_url.as_str(), &latest, "weekly", "0.8")?;
    for post in posts {
        write_entry(&mut w, post.url.as_str(), &post.date, "monthly", "0.6")?;
    }
    writeln!(w, "</urlset>")
}

fn write_entry<W: Write>(
    w: &mut W,
    loc: &str,
    lastmod: &DateTime<Utc>,
    changefreq: &str,
    priority: &str,
) -> io::Result<()> {
    writeln!(w, "  <url>")?;
    writeln!(w, "    <loc>{}</loc>", loc)?;
    writeln!(
        w,
        "    <lastmod>{}</lastmod>",
        lastmod.to_rfc3339_opts(SecondsFormat::Millis, true)
    )?;
    writeln!(w, "    <changefreq>{}</changefreq>", changefreq)?;
    writeln!(w, "    <priority>{}</priority>", priority)?;
    writeln!(w, "  </url>")
}

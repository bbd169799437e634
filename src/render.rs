//! Renders views to HTML strings. These are pure functions; the browser
//! adapter ([`crate::wasm`]) only assigns their output to the document, so
//! everything the user sees can be asserted on without a DOM.

use crate::page::PageView;

/// Renders the visible post list: one card per post with the cover image
/// (or an icon placeholder), the display date, the category badge when the
/// post has one, the title, the description excerpt, and the read-more
/// link.
pub fn post_list(view: &PageView) -> String {
    view.items
        .iter()
        .map(|post| {
            let image = match post.cover.is_empty() {
                true => String::from(r#"<i class="fas fa-file-alt"></i>"#),
                false => format!(
                    r#"<img src="{}" alt="{}">"#,
                    escape(&post.cover),
                    escape(&post.title),
                ),
            };
            let category = match post.category.is_empty() {
                true => String::new(),
                false => format!(
                    r#"<span class="blog-category">{}</span>"#,
                    escape(&post.category),
                ),
            };
            format!(
                concat!(
                    r#"<article class="blog-card">"#,
                    r#"<div class="blog-image">{image}</div>"#,
                    r#"<div class="blog-content">"#,
                    r#"<div class="blog-meta">"#,
                    r#"<span class="blog-date">{date}</span>{category}"#,
                    r#"</div>"#,
                    r#"<h3>{title}</h3>"#,
                    r#"<p>{description}</p>"#,
                    r#"<a href="{url}" class="read-more">Read More →</a>"#,
                    r#"</div>"#,
                    r#"</article>"#,
                ),
                image = image,
                date = escape(&post.pretty_date),
                category = category,
                title = escape(&post.title),
                description = escape(&post.description),
                url = escape(&post.url),
            )
        })
        .collect()
}

/// Renders the pagination control: a Prev button targeting `page - 1`, one
/// numbered button per page (the current page disabled), and a Next button
/// targeting `page + 1`. Prev and Next are rendered even at the
/// boundaries; their out-of-range targets are clamped by the click
/// handler ([`crate::browse::Browse::goto`]), not by hiding the buttons.
pub fn pagination(view: &PageView) -> String {
    let mut html = String::new();
    html.push_str(&button(view.page.saturating_sub(1), "Prev", false));
    for page in 1..=view.total_pages {
        html.push_str(&button(page, &page.to_string(), page == view.page));
    }
    html.push_str(&button(view.page + 1, "Next", false));
    html
}

fn button(target: usize, label: &str, disabled: bool) -> String {
    format!(
        r#"<button class="btn btn-secondary" data-page="{}"{}>{}</button>"#,
        target,
        if disabled { " disabled" } else { "" },
        escape(label),
    )
}

/// Renders the tag filter buttons from the tag vocabulary.
pub fn tag_buttons(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| {
            format!(
                r#"<button class="skill-tag" data-tag="{}">{}</button>"#,
                escape(tag),
                escape(tag),
            )
        })
        .collect()
}

/// Renders the category dropdown options, starting with the all-categories
/// default.
pub fn category_options(categories: &[String]) -> String {
    let mut html = String::from(r#"<option value="">All Categories</option>"#);
    for category in categories {
        html.push_str(&format!("<option>{}</option>", escape(category)));
    }
    html
}

/// The message shown in place of the post list when the Post Source can't
/// be loaded. Not fatal to the rest of the page; there is no retry.
pub fn load_error() -> &'static str {
    "<p>Failed to load posts.</p>"
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::page::paginate;
    use crate::source::Summary;

    fn post(title: &str, category: &str, cover: &str) -> Summary {
        Summary {
            title: title.to_owned(),
            slug: slug::slugify(title),
            date: String::new(),
            pretty_date: String::from("January 15, 2024"),
            tags: Vec::new(),
            category: category.to_owned(),
            description: String::from("A description."),
            cover: cover.to_owned(),
            url: format!("https://example.org/blog/{}/", slug::slugify(title)),
        }
    }

    #[test]
    fn test_post_list_renders_the_card_fields() {
        let posts = vec![post("Rust Basics", "Tech", "https://example.org/c.png")];
        let refs: Vec<&Summary> = posts.iter().collect();
        let html = post_list(&paginate(&refs, 1));
        assert!(html.contains("<h3>Rust Basics</h3>"));
        assert!(html.contains(r#"<span class="blog-date">January 15, 2024</span>"#));
        assert!(html.contains(r#"<span class="blog-category">Tech</span>"#));
        assert!(html.contains(r#"<img src="https://example.org/c.png""#));
        assert!(html.contains(r#"href="https://example.org/blog/rust-basics/""#));
    }

    #[test]
    fn test_post_list_placeholder_and_missing_category() {
        let posts = vec![post("Untagged", "", "")];
        let refs: Vec<&Summary> = posts.iter().collect();
        let html = post_list(&paginate(&refs, 1));
        assert!(html.contains(r#"<i class="fas fa-file-alt"></i>"#));
        assert!(!html.contains("blog-category"));
    }

    #[test]
    fn test_post_list_escapes_interpolated_text() {
        let posts = vec![post("<script>alert(1)</script>", "", "")];
        let refs: Vec<&Summary> = posts.iter().collect();
        let html = post_list(&paginate(&refs, 1));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_pagination_renders_boundary_buttons() {
        let posts: Vec<Summary> = (0..8).map(|i| post(&format!("P{}", i), "", "")).collect();
        let refs: Vec<&Summary> = posts.iter().collect();

        // Page 1: Prev is rendered, targeting page 0 (clamped on click).
        let html = pagination(&paginate(&refs, 1));
        assert!(html.contains(r#"data-page="0">Prev</button>"#));
        assert!(html.contains(r#"data-page="1" disabled>1</button>"#));
        assert!(html.contains(r#"data-page="2">2</button>"#));
        assert!(html.contains(r#"data-page="2">Next</button>"#));

        // Last page: Next targets one past the end.
        let html = pagination(&paginate(&refs, 2));
        assert!(html.contains(r#"data-page="1">Prev</button>"#));
        assert!(html.contains(r#"data-page="2" disabled>2</button>"#));
        assert!(html.contains(r#"data-page="3">Next</button>"#));
    }

    #[test]
    fn test_filter_controls() {
        assert_eq!(
            concat!(
                r#"<button class="skill-tag" data-tag="food">food</button>"#,
                r#"<button class="skill-tag" data-tag="rust">rust</button>"#,
            ),
            tag_buttons(&[String::from("food"), String::from("rust")]),
        );
        assert_eq!(
            concat!(
                r#"<option value="">All Categories</option>"#,
                "<option>Life</option>",
                "<option>Tech</option>",
            ),
            category_options(&[String::from("Life"), String::from("Tech")]),
        );
    }
}

//! The browse core: ties the immutable post list to the query-string
//! [`Store`] and recomputes the visible page on every interaction. This is
//! the whole state model: the four query parameters are the only mutable
//! state, every interaction is a total function from (state, action) to a
//! new state, and the filtered/paginated views are derived on demand.

use crate::filter::filter;
use crate::page::{paginate, PageView};
use crate::query::{Patch, Store};
use crate::source::Summary;

/// Owns the post list (loaded once from the Post Source, never mutated)
/// and the [`Store`]. The filter/page state itself lives in the store;
/// `Browse` reads it fresh on every recomputation rather than caching a
/// copy that could drift.
pub struct Browse<S: Store> {
    posts: Vec<Summary>,
    store: S,
}

impl<S: Store> Browse<S> {
    /// Constructs a `Browse` over a post list and a store. The list must
    /// already be in display order (the Post Source guarantees
    /// newest-first); it is never re-sorted.
    pub fn new(posts: Vec<Summary>, store: S) -> Browse<S> {
        Browse { posts, store }
    }

    /// Recomputes the visible page from the current query state: filter,
    /// then paginate. When pagination had to clamp the requested page, the
    /// clamped page is written back through the store so the URL never
    /// shows an out-of-range page.
    pub fn view(&mut self) -> PageView {
        let state = self.store.read();
        let filtered = filter(&self.posts, &state);
        let view = paginate(&filtered, state.page);
        if view.page != state.page {
            self.store.write(&Patch {
                page: Some(view.page),
                ..Patch::default()
            });
        }
        view
    }

    /// Applies typed search text: resets to page 1 and clears any active
    /// tag. The category filter is left untouched.
    pub fn search(&mut self, text: &str) -> PageView {
        self.store.write(&Patch {
            page: Some(1),
            search: Some(text.to_owned()),
            tag: Some(String::new()),
            ..Patch::default()
        });
        self.view()
    }

    /// Applies a chosen category: resets to page 1 and clears both the
    /// search text and any active tag.
    pub fn select_category(&mut self, category: &str) -> PageView {
        self.store.write(&Patch {
            page: Some(1),
            search: Some(String::new()),
            tag: Some(String::new()),
            category: Some(category.to_owned()),
        });
        self.view()
    }

    /// Applies a clicked tag: resets to page 1. The search and category
    /// parameters stay active (clearing the search *display* is the UI
    /// adapter's concern, not persisted state).
    pub fn select_tag(&mut self, tag: &str) -> PageView {
        self.store.write(&Patch {
            page: Some(1),
            tag: Some(tag.to_owned()),
            ..Patch::default()
        });
        self.view()
    }

    /// Navigates to a page. Prev/Next buttons are rendered even at the
    /// boundaries, so the target may be out of range; it is clamped here
    /// (the lower bound) and by [`Browse::view`]'s write-back (the upper
    /// bound) rather than surfaced as an error. Clicking Prev on page 1
    /// stays on page 1.
    pub fn goto(&mut self, page: usize) -> PageView {
        self.store.write(&Patch {
            page: Some(page.max(1)),
            ..Patch::default()
        });
        self.view()
    }

    /// The sorted, deduplicated tag vocabulary over the whole post list,
    /// for building the tag filter buttons.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .posts
            .iter()
            .flat_map(|post| post.tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// The sorted, deduplicated category vocabulary over the whole post
    /// list, excluding the empty (uncategorized) value.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .posts
            .iter()
            .filter(|post| !post.category.is_empty())
            .map(|post| post.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::query::MemoryStore;

    fn post(title: &str, tags: &[&str], category: &str) -> Summary {
        Summary {
            title: title.to_owned(),
            slug: slug::slugify(title),
            date: String::new(),
            pretty_date: String::new(),
            tags: tags.iter().map(|t| String::from(*t)).collect(),
            category: category.to_owned(),
            description: String::new(),
            cover: String::new(),
            url: format!("https://example.org/blog/{}/", slug::slugify(title)),
        }
    }

    fn eight_posts() -> Vec<Summary> {
        (0..8)
            .map(|i| post(&format!("Post {}", i), &["rust"], "Tech"))
            .collect()
    }

    fn browse(posts: Vec<Summary>, query: &str) -> Browse<MemoryStore> {
        Browse::new(posts, MemoryStore::new(query))
    }

    #[test]
    fn test_view_writes_back_the_clamped_page() {
        let mut browse = browse(eight_posts(), "page=9999");
        let view = browse.view();
        assert_eq!(2, view.total_pages);
        assert_eq!(2, view.page);
        assert_eq!(2, view.items.len());
        // The URL never shows an out-of-range page.
        assert_eq!("page=2", browse.store().query());
    }

    #[test]
    fn test_view_leaves_an_in_range_page_alone() {
        let mut browse = browse(eight_posts(), "page=2");
        browse.view();
        assert_eq!("page=2", browse.store().query());
    }

    #[test]
    fn test_prev_on_page_one_stays_on_page_one() {
        // The Prev button is rendered on page 1 and targets page 0; the
        // handler clamps instead of navigating out of range.
        let mut browse = browse(eight_posts(), "");
        let view = browse.goto(0);
        assert_eq!(1, view.page);
        assert_eq!("", browse.store().query());
    }

    #[test]
    fn test_next_past_the_last_page_clamps() {
        let mut browse = browse(eight_posts(), "page=2");
        let view = browse.goto(3);
        assert_eq!(2, view.page);
        assert_eq!("page=2", browse.store().query());
    }

    #[test]
    fn test_goto_changes_only_the_page() {
        let mut browse = browse(eight_posts(), "q=post&category=Tech");
        browse.goto(2);
        assert_eq!("q=post&category=Tech&page=2", browse.store().query());
    }

    #[test]
    fn test_search_resets_page_and_clears_tag_but_not_category() {
        let mut browse = browse(
            vec![post("Rust Basics", &["rust"], "Tech")],
            "tag=rust&category=Tech&page=2",
        );
        browse.search("basics");
        assert_eq!("q=basics&category=Tech", browse.store().query());
    }

    #[test]
    fn test_select_category_clears_search_and_tag() {
        let mut browse = browse(
            vec![post("Rust Basics", &["rust"], "Tech")],
            "q=rust&tag=rust&page=2",
        );
        browse.select_category("Tech");
        assert_eq!("category=Tech", browse.store().query());
    }

    #[test]
    fn test_select_tag_keeps_search_and_category_parameters() {
        let mut browse = browse(
            vec![post("Rust Basics", &["rust"], "Tech")],
            "q=rust&category=Tech&page=2",
        );
        browse.select_tag("rust");
        assert_eq!("q=rust&tag=rust&category=Tech", browse.store().query());
    }

    #[test]
    fn test_filtered_navigation_uses_the_filtered_length() {
        let mut posts = eight_posts();
        posts.push(post("Cooking 101", &["food"], "Life"));
        let mut browse = browse(posts, "tag=food&page=5");
        let view = browse.view();
        assert_eq!(1, view.total_pages);
        assert_eq!(1, view.items.len());
        assert_eq!("tag=food", browse.store().query());
    }

    #[test]
    fn test_tag_and_category_vocabularies() {
        let browse = browse(
            vec![
                post("A", &["rust", "systems"], "Tech"),
                post("B", &["rust"], ""),
                post("C", &["food"], "Life"),
            ],
            "",
        );
        assert_eq!(vec!["food", "rust", "systems"], browse.tags());
        assert_eq!(vec!["Life", "Tech"], browse.categories());
    }
}

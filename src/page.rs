//! Slices the filtered post list into pages. Like [`crate::filter`], this
//! is pure: a [`PageView`] is recomputed from scratch on every state change
//! and holds no state of its own.

use crate::source::Summary;

/// The number of posts per page.
pub const PAGE_SIZE: usize = 6;

/// One page-size slice of the filtered list, plus the numbers the
/// pagination control needs.
#[derive(Debug)]
pub struct PageView<'a> {
    /// The posts on this page. At most [`PAGE_SIZE`] of them.
    pub items: Vec<&'a Summary>,

    /// The page actually shown. This is the requested page clamped into
    /// `[1, total_pages]`; callers compare it against the requested page
    /// and write it back to the URL when the two differ.
    pub page: usize,

    /// The number of pages the filtered list spans. At least 1, even for
    /// an empty list.
    pub total_pages: usize,

    /// The length of the whole filtered list.
    pub total: usize,
}

/// Paginates a filtered list. `total_pages = max(1, ceil(total / 6))`, the
/// requested page is clamped into `[1, total_pages]`, and the slice is
/// `[(page - 1) * 6, page * 6)` capped at the end of the list. An
/// out-of-range request is clamped silently, never surfaced as an error.
pub fn paginate<'a>(filtered: &[&'a Summary], requested: usize) -> PageView<'a> {
    let total = filtered.len();
    let total_pages = ((total + PAGE_SIZE - 1) / PAGE_SIZE).max(1);
    let page = requested.max(1).min(total_pages);

    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(total);

    PageView {
        items: filtered[start..end].to_vec(),
        page,
        total_pages,
        total,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn posts(count: usize) -> Vec<Summary> {
        (0..count)
            .map(|i| Summary {
                title: format!("Post {}", i),
                slug: format!("post-{}", i),
                date: String::new(),
                pretty_date: String::new(),
                tags: Vec::new(),
                category: String::new(),
                description: String::new(),
                cover: String::new(),
                url: format!("https://example.org/blog/post-{}/", i),
            })
            .collect()
    }

    fn titles(view: &PageView) -> Vec<String> {
        view.items.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn test_empty_list_still_has_one_page() {
        let view = paginate(&[], 1);
        assert!(view.items.is_empty());
        assert_eq!(1, view.page);
        assert_eq!(1, view.total_pages);
        assert_eq!(0, view.total);
    }

    #[test]
    fn test_pages_never_exceed_page_size() {
        let posts = posts(20);
        let refs: Vec<&Summary> = posts.iter().collect();
        for requested in 1..=4 {
            assert!(paginate(&refs, requested).items.len() <= PAGE_SIZE);
        }
    }

    #[test]
    fn test_last_page_holds_the_remainder() {
        let posts = posts(8);
        let refs: Vec<&Summary> = posts.iter().collect();
        let view = paginate(&refs, 2);
        assert_eq!(2, view.total_pages);
        // len(PageView) == min(6, len(filtered) - offset) on the last page.
        assert_eq!(vec!["Post 6", "Post 7"], titles(&view));
    }

    #[test]
    fn test_out_of_range_page_clamps_to_the_last_page() {
        let posts = posts(8);
        let refs: Vec<&Summary> = posts.iter().collect();
        let view = paginate(&refs, 9999);
        assert_eq!(2, view.total_pages);
        assert_eq!(2, view.page);
        assert_eq!(vec!["Post 6", "Post 7"], titles(&view));
    }

    #[test]
    fn test_page_zero_clamps_to_the_first_page() {
        let posts = posts(8);
        let refs: Vec<&Summary> = posts.iter().collect();
        let view = paginate(&refs, 0);
        assert_eq!(1, view.page);
        assert_eq!(
            vec!["Post 0", "Post 1", "Post 2", "Post 3", "Post 4", "Post 5"],
            titles(&view),
        );
    }

    #[test]
    fn test_exact_multiple_of_page_size() {
        let posts = posts(12);
        let refs: Vec<&Summary> = posts.iter().collect();
        assert_eq!(2, paginate(&refs, 1).total_pages);
        assert_eq!(6, paginate(&refs, 2).items.len());
    }
}

//! Filters the post list against the active [`QueryState`] predicates.
//! Filtering is a pure function over the immutable post list and the
//! current state: it never re-sorts (the source list is pre-sorted
//! newest-first) and holds no state of its own, so it is safe to recompute
//! on every interaction.

use crate::query::QueryState;
use crate::source::Summary;

/// Reports whether a single post passes all three predicates:
///
/// * text: case-insensitive substring match against the title OR the
///   description; empty search text matches everything;
/// * tag: case-insensitive equality against any of the post's tags; empty
///   matches everything (there are no multi-tag semantics; at most one
///   tag is ever active);
/// * category: case-insensitive equality against the post's category;
///   empty matches everything.
pub fn matches(post: &Summary, state: &QueryState) -> bool {
    let matches_search = state.search.is_empty() || {
        let needle = state.search.to_lowercase();
        post.title.to_lowercase().contains(&needle)
            || post.description.to_lowercase().contains(&needle)
    };

    let matches_tag = state.tag.is_empty() || {
        let wanted = state.tag.to_lowercase();
        post.tags.iter().any(|tag| tag.to_lowercase() == wanted)
    };

    let matches_category = state.category.is_empty()
        || post.category.to_lowercase() == state.category.to_lowercase();

    matches_search && matches_tag && matches_category
}

/// Returns the subsequence of `posts` matching the active predicates, in
/// the order of the input list.
pub fn filter<'a>(posts: &'a [Summary], state: &QueryState) -> Vec<&'a Summary> {
    posts.iter().filter(|post| matches(post, state)).collect()
}

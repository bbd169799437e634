//! Defines [`QueryState`], the filter/page state persisted in the URL query
//! string, and [`Store`], the abstraction over wherever that query string
//! lives (the browser address bar in production, a plain [`String`] in
//! tests). The query string is the single source of truth: there is no
//! second in-memory copy of the filter state that could drift from it.

use url::form_urlencoded;

/// The filter/page parameters encoded in the URL query string. Parsed fresh
/// from the [`Store`] on every recomputation and written back through it on
/// every qualifying interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState {
    /// The requested page number (parameter `page`). Always ≥ 1.
    pub page: usize,

    /// The search text (parameter `q`).
    pub search: String,

    /// The selected tag (parameter `tag`). At most one tag is active.
    pub tag: String,

    /// The selected category (parameter `category`). At most one category
    /// is active.
    pub category: String,
}

impl Default for QueryState {
    /// The state an empty query string parses to: page 1, no filters.
    fn default() -> QueryState {
        QueryState {
            page: 1,
            search: String::new(),
            tag: String::new(),
            category: String::new(),
        }
    }
}

impl QueryState {
    /// Parses a query string (a leading `?` is tolerated) into a
    /// [`QueryState`], applying defaults for anything missing. A `page`
    /// value that doesn't parse as an integer ≥ 1 falls back to 1;
    /// unrecognized parameters are ignored.
    pub fn from_query(query: &str) -> QueryState {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = QueryState::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "page" => {
                    state.page = match value.parse::<usize>() {
                        Ok(page) if page >= 1 => page,
                        _ => 1,
                    }
                }
                "q" => state.search = value.into_owned(),
                "tag" => state.tag = value.into_owned(),
                "category" => state.category = value.into_owned(),
                _ => {}
            }
        }
        state
    }

    /// Encodes the state as a query string (without a leading `?`). Every
    /// parameter holding its default value is omitted entirely, so the URL
    /// never contains `page=1` or an empty `q=` and a default state encodes
    /// to the empty string.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.search.is_empty() {
            serializer.append_pair("q", &self.search);
        }
        if !self.tag.is_empty() {
            serializer.append_pair("tag", &self.tag);
        }
        if !self.category.is_empty() {
            serializer.append_pair("category", &self.category);
        }
        if self.page != 1 {
            serializer.append_pair("page", &self.page.to_string());
        }
        serializer.finish()
    }

    /// Merges a [`Patch`] into the state, field by field.
    pub fn apply(&mut self, patch: &Patch) {
        if let Some(page) = patch.page {
            self.page = page;
        }
        if let Some(search) = &patch.search {
            self.search = search.clone();
        }
        if let Some(tag) = &patch.tag {
            self.tag = tag.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
    }
}

/// A partial [`QueryState`]: the fields a single interaction wants to
/// change. Setting a field to its default value removes the corresponding
/// parameter from the URL (see [`QueryState::to_query`]).
#[derive(Clone, Debug, Default)]
pub struct Patch {
    pub page: Option<usize>,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub category: Option<String>,
}

/// The URL State Store: reads the current [`QueryState`] and merges
/// [`Patch`]es back into it. Writes replace the current state in place
/// (implementations must not create history entries), which keeps the
/// store the single mutation path for persisted filter/page state.
pub trait Store {
    /// Parses the current query string into a [`QueryState`].
    fn read(&self) -> QueryState;

    /// Merges `patch` into the current state and re-encodes the whole
    /// query string.
    fn write(&mut self, patch: &Patch);
}

/// A [`Store`] over a plain in-memory query string. This is the test
/// double for the browser address bar, but it is a complete
/// implementation; headless callers can use it directly.
#[derive(Debug, Default)]
pub struct MemoryStore {
    query: String,
}

impl MemoryStore {
    /// Constructs a store holding `query` (a leading `?` is tolerated).
    pub fn new(query: &str) -> MemoryStore {
        MemoryStore {
            query: query.strip_prefix('?').unwrap_or(query).to_owned(),
        }
    }

    /// The current query string, as it would appear after the `?`.
    pub fn query(&self) -> &str {
        &self.query
    }
}

impl Store for MemoryStore {
    fn read(&self) -> QueryState {
        QueryState::from_query(&self.query)
    }

    fn write(&mut self, patch: &Patch) {
        let mut state = self.read();
        state.apply(patch);
        self.query = state.to_query();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_query_defaults() {
        assert_eq!(QueryState::default(), QueryState::from_query(""));
        assert_eq!(QueryState::default(), QueryState::from_query("?"));
    }

    #[test]
    fn test_from_query_all_fields() {
        assert_eq!(
            QueryState {
                page: 3,
                search: String::from("rust basics"),
                tag: String::from("systems"),
                category: String::from("Tech"),
            },
            QueryState::from_query("q=rust+basics&tag=systems&category=Tech&page=3"),
        );
    }

    #[test]
    fn test_from_query_bad_page_falls_back_to_one() {
        assert_eq!(1, QueryState::from_query("page=abc").page);
        assert_eq!(1, QueryState::from_query("page=0").page);
        assert_eq!(1, QueryState::from_query("page=-2").page);
    }

    #[test]
    fn test_from_query_ignores_unknown_parameters() {
        assert_eq!(
            QueryState::default(),
            QueryState::from_query("utm_source=newsletter"),
        );
    }

    #[test]
    fn test_to_query_omits_defaults() {
        assert_eq!("", QueryState::default().to_query());
        assert_eq!(
            "q=rust",
            QueryState {
                search: String::from("rust"),
                ..QueryState::default()
            }
            .to_query(),
        );
        // page=1 is the default and must never appear in the URL.
        assert_eq!(
            "tag=food",
            QueryState {
                page: 1,
                tag: String::from("food"),
                ..QueryState::default()
            }
            .to_query(),
        );
    }

    #[test]
    fn test_round_trip() {
        let state = QueryState {
            page: 2,
            search: String::from("hello world"),
            tag: String::from("c++"),
            category: String::from("Life & Times"),
        };
        assert_eq!(state, QueryState::from_query(&state.to_query()));
    }

    #[test]
    fn test_store_write_merges_and_drops_defaults() {
        let mut store = MemoryStore::new("?q=rust&page=4");
        store.write(&Patch {
            page: Some(1),
            tag: Some(String::from("systems")),
            ..Patch::default()
        });
        assert_eq!("q=rust&tag=systems", store.query());
    }

    #[test]
    fn test_store_write_back_to_default_empties_query() {
        let mut store = MemoryStore::new("q=rust");
        store.write(&Patch {
            search: Some(String::new()),
            ..Patch::default()
        });
        assert_eq!("", store.query());
    }
}

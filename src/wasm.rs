//! The browser adapter: binds the browse core to the address bar and the
//! document when the crate is compiled to WebAssembly. This layer is
//! deliberately thin: it moves strings across the JS boundary and owns
//! the [`Store`] backed by `location.search`, while all filtering,
//! pagination, and rendering logic stays in the testable core modules.
//!
//! The page's script fetches the JSON index exactly once at startup and
//! hands the text to [`Blog::new`]; on fetch failure it shows
//! [`Blog::load_error`] in place of the list. After that, every
//! interaction is synchronous: the event handler calls the matching
//! method, which writes the state change to the URL and returns the
//! re-rendered frame for the handler to assign to the document.

use wasm_bindgen::prelude::*;

use crate::browse::Browse;
use crate::page::PageView;
use crate::query::{Patch, QueryState, Store};
use crate::render;
use crate::source;

/// A [`Store`] over the browser address bar: reads `location.search` and
/// writes through `history.replaceState`, which replaces the current
/// entry in place, so navigating the filters never grows the history.
pub struct BrowserStore;

impl BrowserStore {
    fn window() -> web_sys::Window {
        // A window always exists in the browsing contexts this module
        // runs in; unwrap_throw surfaces anything else as a JS error.
        web_sys::window().unwrap_throw()
    }
}

impl Store for BrowserStore {
    fn read(&self) -> QueryState {
        let search = Self::window().location().search().unwrap_or_default();
        QueryState::from_query(&search)
    }

    fn write(&mut self, patch: &Patch) {
        let mut state = self.read();
        state.apply(patch);
        let query = state.to_query();

        let location = Self::window().location();
        let pathname = location.pathname().unwrap_or_else(|_| String::from("/"));
        let url = match query.is_empty() {
            true => pathname,
            false => format!("{}?{}", pathname, query),
        };
        if let Ok(history) = Self::window().history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&url));
        }
    }
}

/// One re-rendered frame: the post-list and pagination markup the event
/// handler assigns to the document.
#[derive(serde::Serialize)]
pub struct Frame {
    pub posts: String,
    pub pagination: String,
}

/// The JS-facing blog browser.
#[wasm_bindgen]
pub struct Blog {
    inner: Browse<BrowserStore>,
}

#[wasm_bindgen]
impl Blog {
    /// Constructs the browser from the fetched JSON index text. Fails
    /// when the document is unusable; the caller shows
    /// [`Blog::load_error`] instead of a post list.
    #[wasm_bindgen(constructor)]
    pub fn new(posts_json: &str) -> Result<Blog, JsValue> {
        console_error_panic_hook::set_once();
        let posts =
            source::parse(posts_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Blog {
            inner: Browse::new(posts, BrowserStore),
        })
    }

    /// The markup shown in place of the post list when the index can't be
    /// loaded at all.
    pub fn load_error() -> String {
        render::load_error().to_owned()
    }

    /// Renders the frame for the current URL state. Called once after
    /// construction and again whenever the user navigates externally.
    pub fn frame(&mut self) -> Result<JsValue, JsValue> {
        let view = self.inner.view();
        to_frame(&view)
    }

    /// Handles input in the search field.
    pub fn search(&mut self, text: &str) -> Result<JsValue, JsValue> {
        let view = self.inner.search(text);
        to_frame(&view)
    }

    /// Handles a category selection.
    pub fn select_category(&mut self, category: &str) -> Result<JsValue, JsValue> {
        let view = self.inner.select_category(category);
        to_frame(&view)
    }

    /// Handles a click on a tag button.
    pub fn select_tag(&mut self, tag: &str) -> Result<JsValue, JsValue> {
        let view = self.inner.select_tag(tag);
        to_frame(&view)
    }

    /// Handles a click on a pagination button. Out-of-range targets (the
    /// always-rendered boundary Prev/Next buttons) are clamped, never
    /// errors.
    pub fn goto(&mut self, page: usize) -> Result<JsValue, JsValue> {
        let view = self.inner.goto(page);
        to_frame(&view)
    }

    /// The tag filter buttons, rendered from the whole post list.
    pub fn tag_buttons(&self) -> String {
        render::tag_buttons(&self.inner.tags())
    }

    /// The category dropdown options, rendered from the whole post list.
    pub fn category_options(&self) -> String {
        render::category_options(&self.inner.categories())
    }

    /// The search text currently in the URL, for initializing the search
    /// field's display on load.
    pub fn search_text(&self) -> String {
        self.inner.store().read().search
    }

    /// The category currently in the URL, for initializing the dropdown's
    /// display on load.
    pub fn category(&self) -> String {
        self.inner.store().read().category
    }
}

fn to_frame(view: &PageView) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&Frame {
        posts: render::post_list(view),
        pagination: render::pagination(view),
    })
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

//! The library code for the `stele` site generator and blog browser. The
//! architecture breaks down into two distinct halves:
//!
//! 1. The build half, run by the `stele` binary at publish time: parsing
//!    posts from markdown source files ([`crate::post`]) and converting
//!    them into output files on disk: HTML pages ([`crate::write`]), the
//!    JSON post index ([`crate::index`]), the sitemap
//!    ([`crate::sitemap`]), and the feeds ([`crate::feed`]).
//! 2. The browse half, run in the browser against the JSON index: the
//!    query string is parsed into a filter/page state ([`crate::query`]),
//!    the post list is filtered ([`crate::filter`]) and paginated
//!    ([`crate::page`]), and the result is rendered to HTML
//!    ([`crate::render`]).
//!
//! Of the two, the browse half has the more interesting invariant: the
//! URL query string is the single source of truth for the filter/page
//! state. Every interaction writes its state change through
//! [`crate::query::Store`] before re-rendering, and every recomputation
//! reads the state back out of the store, so a shared or reloaded URL
//! always reproduces exactly what the user was looking at.
//! [`crate::browse`] ties the pieces together; [`crate::wasm`] binds them
//! to the browser when the crate is compiled to WebAssembly.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod browse;
pub mod build;
pub mod config;
pub mod feed;
pub mod filter;
pub mod index;
pub mod markdown;
pub mod page;
pub mod post;
pub mod query;
pub mod render;
pub mod sitemap;
pub mod source;
pub mod write;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

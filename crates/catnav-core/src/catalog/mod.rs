//! Catalog data model and service abstraction.
//!
//! The catalog itself lives behind the [`service::CatalogService`] trait.
//! This module holds the value types exchanged with it ([`item::CatalogItem`],
//! [`path::CatalogPath`], search parameters) and [`memory::InMemoryCatalog`],
//! a JSON-backed implementation used by the terminal host and the tests.

pub mod item;
pub mod memory;
pub mod path;
pub mod service;

pub use item::{CatalogItem, ItemKind, ItemPayload, Resource};
pub use memory::InMemoryCatalog;
pub use path::CatalogPath;
pub use service::{
    find_article, CatalogError, CatalogService, LookupOptions, ScoredItem, SearchFlag,
    SearchParameters,
};

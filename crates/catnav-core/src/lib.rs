//! catnav core library: UI-agnostic catalog navigation.
//!
//! `catnav-core` models a hierarchical product catalog reached through an
//! async [`CatalogService`], and a navigator that browses it folder by
//! folder or through scored search. No UI framework is involved, so the
//! terminal host (`catnav-tui`) and tests drive the same logic.
//!
//! # Modules
//!
//! - [`catalog`]: items, paths, the service trait and a JSON-backed in-memory service.
//! - [`nav`]: the [`CatalogNavigator`] state machine, background fetches and a sequential driver.
//! - [`config`]: TOML settings, key bindings and theme.
//! - [`action`]: user actions with metadata for the command palette.
//! - [`event`]: [`Command`]s into the navigator and [`Event`]s out of it.
//! - [`error`]: [`CoreError`] and [`CoreResult`].

pub mod action;
pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod nav;

pub use action::{Action, ActionCategory, ActionDescriptor, ActionRegistry};
pub use catalog::{
    find_article, CatalogError, CatalogItem, CatalogPath, CatalogService, InMemoryCatalog,
    ItemKind, ItemPayload, LookupOptions, Resource, ScoredItem, SearchFlag, SearchParameters,
};
pub use config::keymap::Keymap;
pub use config::settings::{Config, StartupArticle};
pub use config::theme::{parse_color, Theme};
pub use error::{CoreError, CoreResult};
pub use event::{Command, Event};
pub use nav::browser::{CatalogBrowser, NavigatorHost};
pub use nav::fetch::{execute, spawn_fetch};
pub use nav::navigator::{
    ApplyOutcome, CatalogNavigator, NavigationMode, Reply, Request, Response, Step, Ticket,
};
pub use nav::view::{CatalogView, ViewStatus};

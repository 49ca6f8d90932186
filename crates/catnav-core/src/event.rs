//! Event system for communication between the host UI and the navigator.
//!
//! The UI translates user input into [`Command`]s, which the navigator
//! processes. Selections that leave the navigator (inserting an article,
//! opening a document) come back as [`Event`]s for the host to carry out.

use crate::catalog::{CatalogItem, CatalogPath};

/// A navigation request from the UI.
///
/// Commands flow **UI → Core**. The core never creates commands itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// (Re)start browsing at the given path, or at the top level.
    Enter(Option<CatalogPath>),
    /// Re-query the service for the current path or search.
    Refresh,
    /// Submit a search inside the current catalog root.
    Search(String),
    /// Activate the row at the given index of the current view.
    Select(usize),
    /// Leave search results, or go up one folder.
    Back,
}

/// Work the navigator hands back to its host.
///
/// Events flow **Core → UI**. None of them changes navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An article was picked and should be inserted into the scene.
    InsertArticle(CatalogItem),
    /// A container was picked and should be inserted into the scene.
    InsertContainer(CatalogItem),
    /// A document should be opened (e.g. a PDF data sheet).
    OpenUrl(String),
}

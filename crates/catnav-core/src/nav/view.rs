//! The navigator's rendering surface.

use crate::catalog::CatalogItem;

/// Load state of the current view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewStatus {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    /// A request for this view is in flight.
    Loading,
    /// Rows reflect the latest service response.
    Ready,
    /// The service call failed; rows are empty.
    Failed(String),
}

/// What the host should display: controls plus one row per item.
///
/// The view is replaced wholesale on every transition, so rows from an
/// earlier (path, mode) never survive into a later one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogView {
    show_back: bool,
    show_search_bar: bool,
    rows: Vec<CatalogItem>,
    status: ViewStatus,
}

impl CatalogView {
    /// An empty view waiting for a response.
    pub(crate) fn loading(show_back: bool, show_search_bar: bool) -> Self {
        Self {
            show_back,
            show_search_bar,
            rows: Vec::new(),
            status: ViewStatus::Loading,
        }
    }

    pub(crate) fn with_rows(self, rows: Vec<CatalogItem>) -> Self {
        Self {
            rows,
            status: ViewStatus::Ready,
            ..self
        }
    }

    pub(crate) fn with_failure(self, message: String) -> Self {
        Self {
            rows: Vec::new(),
            status: ViewStatus::Failed(message),
            ..self
        }
    }

    pub fn show_back(&self) -> bool {
        self.show_back
    }

    pub fn show_search_bar(&self) -> bool {
        self.show_search_bar
    }

    pub fn rows(&self) -> &[CatalogItem] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&CatalogItem> {
        self.rows.get(index)
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == ViewStatus::Loading
    }
}

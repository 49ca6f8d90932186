//! The catalog service contract.
//!
//! Listing, search and path resolution are delegated to an external
//! service. Implementations must be `Send + Sync` so requests can run on
//! background tasks (see [`crate::nav::fetch`]).

use async_trait::async_trait;

use crate::catalog::item::{CatalogItem, ItemKind};
use crate::catalog::path::CatalogPath;

/// Maximum number of hits requested by a catalog search.
pub const SEARCH_HIT_LIMIT: usize = 100;

/// Errors a catalog service can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("unknown catalog path: {0}")]
    UnknownPath(String),

    #[error("unknown node {node_key} in catalog {catalog_id}")]
    UnknownNode {
        catalog_id: String,
        node_key: String,
    },
}

/// Which item kinds a lookup should return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOptions {
    pub item_types: Vec<ItemKind>,
}

impl LookupOptions {
    /// Articles, folders, containers and information items.
    pub fn navigable() -> Self {
        Self {
            item_types: ItemKind::ALL.to_vec(),
        }
    }

    pub fn only(kind: ItemKind) -> Self {
        Self {
            item_types: vec![kind],
        }
    }

    pub fn accepts(&self, kind: ItemKind) -> bool {
        self.item_types.contains(&kind)
    }
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self::navigable()
    }
}

/// Search modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFlag {
    /// Match folder texts as well, not only leaf items.
    FolderText,
}

/// A scored full-text search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    pub catalog_ids: Vec<String>,
    pub query: String,
    pub number_of_hits: usize,
    pub flags: Vec<SearchFlag>,
}

impl SearchParameters {
    /// Search inside one catalog root, folder texts included.
    pub fn scoped(catalog_id: &str, query: &str) -> Self {
        Self {
            catalog_ids: vec![catalog_id.to_owned()],
            query: query.to_owned(),
            number_of_hits: SEARCH_HIT_LIMIT,
            flags: vec![SearchFlag::FolderText],
        }
    }

    pub fn has_flag(&self, flag: SearchFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// A search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem {
    pub item: CatalogItem,
    pub score: f64,
}

/// Remote catalog operations consumed by the navigator.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Lists the children of `path` in service order.
    async fn list_children(
        &self,
        path: &CatalogPath,
        options: &LookupOptions,
    ) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Runs a scored search. Hits come back best first.
    async fn search(
        &self,
        params: &SearchParameters,
        options: &LookupOptions,
    ) -> Result<Vec<ScoredItem>, CatalogError>;

    /// Resolves the absolute path of a node, root id first.
    async fn resolve_path(
        &self,
        catalog_id: &str,
        node_key: &str,
    ) -> Result<CatalogPath, CatalogError>;
}

/// Looks up an article by its number inside one catalog.
///
/// Exact article-number matches win over other hits; otherwise the best
/// scored article is returned.
pub async fn find_article(
    service: &dyn CatalogService,
    catalog_id: &str,
    article_number: &str,
) -> Result<Option<CatalogItem>, CatalogError> {
    let params = SearchParameters {
        catalog_ids: vec![catalog_id.to_owned()],
        query: article_number.to_owned(),
        number_of_hits: SEARCH_HIT_LIMIT,
        flags: Vec::new(),
    };
    let hits = service
        .search(&params, &LookupOptions::only(ItemKind::Article))
        .await?;
    let idx = hits
        .iter()
        .position(|hit| hit.item.article_number() == Some(article_number))
        .unwrap_or(0);
    Ok(hits.into_iter().nth(idx).map(|hit| hit.item))
}

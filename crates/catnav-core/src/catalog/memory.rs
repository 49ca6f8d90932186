//! JSON-backed in-memory catalog service.
//!
//! The file format is a list of catalog roots, each with a tree of nodes
//! tagged by `"type"`:
//!
//! ```json
//! { "catalogs": [
//!     { "id": "egr:0", "label": "Demo", "children": [
//!         { "type": "Folder", "name": "Chairs", "children": [
//!             { "type": "Article", "name": "4520", "label": "Lounge chair",
//!               "article_number": "4520" }
//!         ] }
//!     ] }
//! ] }
//! ```
//!
//! Node keys default to the slash-joined folder names below the root
//! (`"Chairs/4520"`), which is also what [`CatalogService::resolve_path`]
//! accepts.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::catalog::item::{CatalogItem, ItemPayload};
use crate::catalog::path::CatalogPath;
use crate::catalog::service::{
    CatalogError, CatalogService, LookupOptions, ScoredItem, SearchFlag, SearchParameters,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    catalogs: Vec<RawRoot>,
}

#[derive(Debug, Deserialize)]
struct RawRoot {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    children: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    node_key: Option<String>,
    #[serde(default)]
    children: Vec<RawNode>,
    #[serde(flatten)]
    payload: ItemPayload,
}

#[derive(Debug, Clone)]
struct Node {
    item: CatalogItem,
    children: Vec<Node>,
}

impl Node {
    fn child_folder(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|c| c.item.is_folder() && c.item.name == name)
    }
}

/// A [`CatalogService`] serving a catalog tree held in memory.
#[derive(Debug)]
pub struct InMemoryCatalog {
    roots: Vec<Node>,
    folder_paths: HashMap<(String, String), CatalogPath>,
    latency: Duration,
    offline: AtomicBool,
}

impl InMemoryCatalog {
    /// Loads a catalog from a JSON file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::CatalogFormat`] if the JSON is malformed or a node is invalid.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = crate::error::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses a catalog from a JSON string.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| CoreError::CatalogFormat(e.to_string()))?;

        let mut folder_paths = HashMap::new();
        let mut roots = Vec::with_capacity(file.catalogs.len());
        for raw in file.catalogs {
            if raw.id.is_empty() {
                return Err(CoreError::CatalogFormat("catalog id is empty".to_string()));
            }
            if roots.iter().any(|r: &Node| r.item.name == raw.id) {
                return Err(CoreError::CatalogFormat(format!(
                    "duplicate catalog id {}",
                    raw.id
                )));
            }
            let root_path = CatalogPath::from_segments([raw.id.as_str()]);
            let children = raw
                .children
                .into_iter()
                .map(|child| build_node(child, &raw.id, &root_path, &mut folder_paths))
                .collect::<CoreResult<Vec<_>>>()?;
            let item = CatalogItem {
                label: raw.label.unwrap_or_else(|| raw.id.clone()),
                icon: raw.icon,
                ..CatalogItem::folder(&raw.id, &raw.id)
            };
            roots.push(Node { item, children });
        }

        tracing::debug!(
            catalogs = roots.len(),
            folders = folder_paths.len(),
            "loaded in-memory catalog"
        );

        Ok(Self {
            roots,
            folder_paths,
            latency: Duration::ZERO,
            offline: AtomicBool::new(false),
        })
    }

    /// Returns a catalog that delays every call by `latency`.
    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        Self { latency, ..self }
    }

    /// While offline, every call fails with [`CatalogError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, AtomicOrdering::SeqCst);
    }

    /// Ids of all catalog roots, in file order.
    pub fn catalog_ids(&self) -> Vec<&str> {
        self.roots.iter().map(|r| r.item.name.as_str()).collect()
    }

    async fn simulate_transport(&self) -> Result<(), CatalogError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.offline.load(AtomicOrdering::SeqCst) {
            return Err(CatalogError::Unavailable("catalog is offline".to_string()));
        }
        Ok(())
    }

    fn root(&self, id: &str) -> Option<&Node> {
        self.roots.iter().find(|r| r.item.name == id)
    }

    fn find(&self, path: &CatalogPath) -> Option<&Node> {
        let (first, rest) = path.segments().split_first()?;
        rest.iter()
            .try_fold(self.root(first)?, |node, segment| node.child_folder(segment))
    }
}

fn build_node(
    raw: RawNode,
    catalog_id: &str,
    parent: &CatalogPath,
    folder_paths: &mut HashMap<(String, String), CatalogPath>,
) -> CoreResult<Node> {
    if raw.name.is_empty() {
        return Err(CoreError::CatalogFormat(format!(
            "node with empty name under {parent}"
        )));
    }
    let is_folder = matches!(raw.payload, ItemPayload::Folder);
    if !is_folder && !raw.children.is_empty() {
        return Err(CoreError::CatalogFormat(format!(
            "non-folder node {} has children",
            raw.name
        )));
    }

    let path = parent.with_segment(raw.name.as_str());
    let node_key = raw
        .node_key
        .unwrap_or_else(|| path.segments()[1..].join("/"));

    if is_folder {
        let key = (catalog_id.to_owned(), node_key.clone());
        if folder_paths.insert(key, path.clone()).is_some() {
            return Err(CoreError::CatalogFormat(format!(
                "duplicate node key {node_key} in catalog {catalog_id}"
            )));
        }
    }

    let children = raw
        .children
        .into_iter()
        .map(|child| build_node(child, catalog_id, &path, folder_paths))
        .collect::<CoreResult<Vec<_>>>()?;

    let item = CatalogItem {
        label: raw.label.unwrap_or_else(|| raw.name.clone()),
        name: raw.name,
        icon: raw.icon,
        catalog_id: catalog_id.to_owned(),
        node_key,
        payload: raw.payload,
    };
    Ok(Node { item, children })
}

/// Case-insensitive relevance of `item` for an already lower-cased `needle`.
fn score_item(item: &CatalogItem, needle: &str, folder_text: bool) -> Option<f64> {
    if item.is_folder() && !folder_text {
        return None;
    }
    let label = item.label.to_lowercase();
    if label == needle {
        return Some(1.0);
    }
    if label.starts_with(needle) {
        return Some(0.75);
    }
    if label.contains(needle) {
        return Some(0.5);
    }
    let in_name = item.name.to_lowercase().contains(needle);
    let in_number = item
        .article_number()
        .is_some_and(|n| n.to_lowercase().contains(needle));
    (in_name || in_number).then_some(0.25)
}

fn collect_hits(
    nodes: &[Node],
    needle: &str,
    folder_text: bool,
    options: &LookupOptions,
    hits: &mut Vec<ScoredItem>,
) {
    for node in nodes {
        if options.accepts(node.item.kind()) {
            if let Some(score) = score_item(&node.item, needle, folder_text) {
                hits.push(ScoredItem {
                    item: node.item.clone(),
                    score,
                });
            }
        }
        collect_hits(&node.children, needle, folder_text, options, hits);
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn list_children(
        &self,
        path: &CatalogPath,
        options: &LookupOptions,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        self.simulate_transport().await?;
        let children: &[Node] = if path.is_empty() {
            &self.roots
        } else {
            &self
                .find(path)
                .ok_or_else(|| CatalogError::UnknownPath(path.to_string()))?
                .children
        };
        Ok(children
            .iter()
            .map(|c| &c.item)
            .filter(|item| options.accepts(item.kind()))
            .cloned()
            .collect())
    }

    async fn search(
        &self,
        params: &SearchParameters,
        options: &LookupOptions,
    ) -> Result<Vec<ScoredItem>, CatalogError> {
        self.simulate_transport().await?;
        let needle = params.query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let folder_text = params.has_flag(SearchFlag::FolderText);

        let mut hits = Vec::new();
        for id in &params.catalog_ids {
            let root = self
                .root(id)
                .ok_or_else(|| CatalogError::UnknownPath(id.clone()))?;
            collect_hits(&root.children, &needle, folder_text, options, &mut hits);
        }
        // Stable: equal scores keep traversal order.
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        hits.truncate(params.number_of_hits);
        Ok(hits)
    }

    async fn resolve_path(
        &self,
        catalog_id: &str,
        node_key: &str,
    ) -> Result<CatalogPath, CatalogError> {
        self.simulate_transport().await?;
        self.folder_paths
            .get(&(catalog_id.to_owned(), node_key.to_owned()))
            .cloned()
            .ok_or_else(|| CatalogError::UnknownNode {
                catalog_id: catalog_id.to_owned(),
                node_key: node_key.to_owned(),
            })
    }
}

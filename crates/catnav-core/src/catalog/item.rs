//! Catalog item types.
//!
//! A [`CatalogItem`] is owned by the catalog service; the navigator only
//! keeps the items of the current view. The kind-specific data lives in
//! [`ItemPayload`], so dispatch on the item kind is a plain `match`.

use serde::{Deserialize, Serialize};

/// MIME prefix of a resource value that points at a PDF document.
pub const PDF_MIME_PREFIX: &str = "application/pdf";

/// The four item kinds a catalog listing can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Article,
    Folder,
    Container,
    Information,
}

impl ItemKind {
    /// Every kind the navigator lists or searches for.
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Article,
        ItemKind::Folder,
        ItemKind::Container,
        ItemKind::Information,
    ];

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Article => "Article",
            Self::Folder => "Folder",
            Self::Container => "Container",
            Self::Information => "Information",
        }
    }
}

/// A typed resource attached to an item, e.g. a downloadable document.
///
/// `value` is encoded as `"<mime>;<url>"` for documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl Resource {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: Some(value.into()),
        }
    }
}

/// Kind-specific data of a [`CatalogItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ItemPayload {
    /// An insertable article. `variant_code` selects a configuration.
    Article {
        article_number: String,
        #[serde(default)]
        variant_code: Option<String>,
    },
    /// A folder; descended into by name or resolved by node key.
    Folder,
    /// A pre-assembled group of articles.
    Container,
    /// Downloadable information (data sheets, manuals).
    Information {
        #[serde(default)]
        resources: Vec<Resource>,
    },
}

/// A single entry of a catalog listing or search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Segment name used when descending into a folder.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Icon reference (URL or icon name).
    #[serde(default)]
    pub icon: Option<String>,
    /// Catalog root this item belongs to.
    pub catalog_id: String,
    /// Service-side key identifying the node inside its catalog.
    pub node_key: String,
    #[serde(flatten)]
    pub payload: ItemPayload,
}

impl CatalogItem {
    fn with_payload(catalog_id: &str, name: &str, payload: ItemPayload) -> Self {
        Self {
            name: name.to_owned(),
            label: name.to_owned(),
            icon: None,
            catalog_id: catalog_id.to_owned(),
            node_key: name.to_owned(),
            payload,
        }
    }

    /// Creates a folder item whose label and node key equal `name`.
    pub fn folder(catalog_id: &str, name: &str) -> Self {
        Self::with_payload(catalog_id, name, ItemPayload::Folder)
    }

    /// Creates an article item without a preset variant code.
    pub fn article(catalog_id: &str, name: &str, article_number: &str) -> Self {
        Self::with_payload(
            catalog_id,
            name,
            ItemPayload::Article {
                article_number: article_number.to_owned(),
                variant_code: None,
            },
        )
    }

    /// Creates a container item.
    pub fn container(catalog_id: &str, name: &str) -> Self {
        Self::with_payload(catalog_id, name, ItemPayload::Container)
    }

    /// Creates an information item carrying `resources`.
    pub fn information(catalog_id: &str, name: &str, resources: Vec<Resource>) -> Self {
        Self::with_payload(catalog_id, name, ItemPayload::Information { resources })
    }

    /// Returns a copy with a different display label.
    ///
    /// Services build items from their own records; this and
    /// [`CatalogItem::with_node_key`] exist for hand-built fixtures.
    #[must_use]
    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..self
        }
    }

    /// Returns a copy with a different node key.
    #[must_use]
    pub fn with_node_key(self, node_key: impl Into<String>) -> Self {
        Self {
            node_key: node_key.into(),
            ..self
        }
    }

    /// Returns a copy with the variant code set. No-op for non-articles.
    #[must_use]
    pub fn with_variant_code(self, code: impl Into<String>) -> Self {
        match self.payload {
            ItemPayload::Article { article_number, .. } => Self {
                payload: ItemPayload::Article {
                    article_number,
                    variant_code: Some(code.into()),
                },
                ..self
            },
            _ => self,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self.payload {
            ItemPayload::Article { .. } => ItemKind::Article,
            ItemPayload::Folder => ItemKind::Folder,
            ItemPayload::Container => ItemKind::Container,
            ItemPayload::Information { .. } => ItemKind::Information,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.payload, ItemPayload::Folder)
    }

    /// Article number, for articles only.
    pub fn article_number(&self) -> Option<&str> {
        match &self.payload {
            ItemPayload::Article { article_number, .. } => Some(article_number),
            _ => None,
        }
    }

    /// Variant code, for articles that carry one.
    pub fn variant_code(&self) -> Option<&str> {
        match &self.payload {
            ItemPayload::Article { variant_code, .. } => variant_code.as_deref(),
            _ => None,
        }
    }

    /// Returns the download URL of the first PDF resource, if any.
    ///
    /// The URL is the part of the resource value after the first `;`.
    /// A value without `;` is used as-is.
    pub fn pdf_url(&self) -> Option<&str> {
        let ItemPayload::Information { resources } = &self.payload else {
            return None;
        };
        resources
            .iter()
            .filter_map(|r| r.value.as_deref())
            .find(|value| value.starts_with(PDF_MIME_PREFIX))
            .map(|value| match value.find(';') {
                Some(idx) => &value[idx + 1..],
                None => value,
            })
    }
}

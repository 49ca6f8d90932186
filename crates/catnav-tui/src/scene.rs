//! Items inserted into the planning scene (the "basket").
//!
//! Inserting an article or container replaces whatever was placed before,
//! so the scene always shows the last selection together with the variant
//! code it was inserted with.

use catnav_core::{CatalogItem, ItemKind};

/// One inserted catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntry {
    item: CatalogItem,
    variant_code: Option<String>,
}

impl SceneEntry {
    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    pub fn variant_code(&self) -> Option<&str> {
        self.variant_code.as_deref()
    }

    pub fn kind(&self) -> ItemKind {
        self.item.kind()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    entries: Vec<SceneEntry>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Removes all elements, then places `item`.
    ///
    /// Articles keep their variant code; containers never carry one.
    pub fn with_inserted(self, item: CatalogItem) -> Self {
        let variant_code = match item.kind() {
            ItemKind::Article => item.variant_code().map(str::to_string),
            _ => None,
        };
        tracing::info!(
            name = %item.name,
            kind = item.kind().label(),
            variant = variant_code.as_deref().unwrap_or(""),
            "inserting into scene"
        );
        Self {
            entries: vec![SceneEntry { item, variant_code }],
        }
    }

    pub fn cleared(self) -> Self {
        Self::default()
    }
}

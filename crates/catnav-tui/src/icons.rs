//! Nerd Font icon mapping for catalog items.
//!
//! Items are mapped by kind; information items holding a data sheet get
//! the PDF glyph instead of the generic info glyph.

use catnav_core::{CatalogItem, ItemKind};

/// Glyph shown in front of the back row.
pub const BACK_ICON: &str = "\u{f060} ";

/// Returns a Nerd Font icon for the given catalog item.
pub fn icon_for_item(item: &CatalogItem) -> &'static str {
    if item.kind() == ItemKind::Information && item.pdf_url().is_some() {
        return "\u{f1c1} "; // file-pdf
    }
    icon_for_kind(item.kind())
}

pub fn icon_for_kind(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Folder => "\u{f07b} ",
        ItemKind::Article => "\u{f187} ",
        ItemKind::Container => "\u{f1b3} ",
        ItemKind::Information => "\u{f05a} ",
    }
}

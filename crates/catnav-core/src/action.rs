//! User-triggerable actions.
//!
//! Every key binding and command-palette entry resolves to an [`Action`].
//! [`ActionRegistry`] carries the metadata (id, name, description,
//! category) and the fuzzy search behind the palette.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Every user-triggerable action.
///
/// Variants carry no parameters; the selected row and search input are
/// read from the host state at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    CursorUp,
    CursorDown,
    CursorTop,
    CursorBottom,
    Select,
    Back,
    GoTop,
    Refresh,
    // Search
    Search,
    // Basket
    ToggleBasket,
    ClearBasket,
    // System
    Help,
    Quit,
    CommandPalette,
}

/// Broad category for grouping actions in the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Search,
    Basket,
    System,
}

impl ActionCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Search => "Search",
            Self::Basket => "Basket",
            Self::System => "System",
        }
    }
}

/// Palette metadata for one action.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: Action,
    /// Snake-case identifier used in `keymap.toml` (e.g. `"cursor_up"`).
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ActionCategory,
}

/// Registry of all available actions with fuzzy-search support.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        let descriptors = vec![
            // Navigation
            ActionDescriptor {
                action: Action::CursorUp,
                id: "cursor_up",
                name: "Cursor Up",
                description: "Move cursor up one row",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorDown,
                id: "cursor_down",
                name: "Cursor Down",
                description: "Move cursor down one row",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorTop,
                id: "go_first",
                name: "Go to First",
                description: "Jump to the first row",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorBottom,
                id: "go_last",
                name: "Go to Last",
                description: "Jump to the last row",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::Select,
                id: "select",
                name: "Select",
                description: "Open folder, insert article or container, open data sheet",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::Back,
                id: "back",
                name: "Back",
                description: "Leave search results or go up one folder",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::GoTop,
                id: "go_top",
                name: "Catalog List",
                description: "Return to the list of catalogs",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::Refresh,
                id: "refresh",
                name: "Refresh",
                description: "Reload the current folder or search",
                category: ActionCategory::Navigation,
            },
            // Search
            ActionDescriptor {
                action: Action::Search,
                id: "search",
                name: "Search",
                description: "Search the current catalog",
                category: ActionCategory::Search,
            },
            // Basket
            ActionDescriptor {
                action: Action::ToggleBasket,
                id: "toggle_basket",
                name: "Toggle Basket",
                description: "Show or hide inserted articles",
                category: ActionCategory::Basket,
            },
            ActionDescriptor {
                action: Action::ClearBasket,
                id: "clear_basket",
                name: "Clear Basket",
                description: "Remove every inserted item",
                category: ActionCategory::Basket,
            },
            // System
            ActionDescriptor {
                action: Action::Help,
                id: "help",
                name: "Help",
                description: "Show keyboard shortcuts",
                category: ActionCategory::System,
            },
            ActionDescriptor {
                action: Action::Quit,
                id: "quit",
                name: "Quit",
                description: "Exit the catalog browser",
                category: ActionCategory::System,
            },
            ActionDescriptor {
                action: Action::CommandPalette,
                id: "command_palette",
                name: "Command Palette",
                description: "Open command palette",
                category: ActionCategory::System,
            },
        ];
        Self { descriptors }
    }

    pub fn all(&self) -> &[ActionDescriptor] {
        &self.descriptors
    }

    /// Fuzzy-searches descriptors by name, description and id, best first.
    pub fn fuzzy_search(&self, query: &str) -> Vec<&ActionDescriptor> {
        if query.is_empty() {
            return self.descriptors.iter().collect();
        }
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &ActionDescriptor)> = self
            .descriptors
            .iter()
            .filter_map(|d| {
                let best = [d.name, d.description, d.id]
                    .iter()
                    .filter_map(|text| matcher.fuzzy_match(text, query))
                    .max()?;
                (best > 0).then_some((best, d))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, d)| d).collect()
    }

    /// Finds an action by its string id (for keymap.toml parsing).
    pub fn find_by_id(&self, id: &str) -> Option<Action> {
        self.descriptors
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.action)
    }

    pub fn descriptor_for(&self, action: Action) -> Option<&ActionDescriptor> {
        self.descriptors.iter().find(|d| d.action == action)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! Key binding configuration.
//!
//! Key names (e.g. `"j"`, `"gg"`, `"Enter"`) map to [`Action`] values.
//! TOML files use string action ids (e.g. `"cursor_down"`), resolved via
//! [`ActionRegistry::find_by_id`] at load time.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::action::{Action, ActionRegistry};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Deserialize)]
struct RawKeymap {
    #[serde(default)]
    bindings: HashMap<String, String>,
}

/// Complete set of key bindings, with a reverse map for palette display.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, Action>,
    reverse: HashMap<Action, Vec<String>>,
}

impl Default for Keymap {
    fn default() -> Self {
        let bindings: HashMap<String, Action> = [
            ("j", Action::CursorDown),
            ("Down", Action::CursorDown),
            ("k", Action::CursorUp),
            ("Up", Action::CursorUp),
            ("gg", Action::CursorTop),
            ("G", Action::CursorBottom),
            ("l", Action::Select),
            ("Enter", Action::Select),
            ("h", Action::Back),
            ("Backspace", Action::Back),
            ("~", Action::GoTop),
            ("r", Action::Refresh),
            ("/", Action::Search),
            ("b", Action::ToggleBasket),
            ("X", Action::ClearBasket),
            ("?", Action::Help),
            ("q", Action::Quit),
            (":", Action::CommandPalette),
        ]
        .into_iter()
        .map(|(key, action)| (key.to_string(), action))
        .collect();

        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }
}

fn build_reverse(bindings: &HashMap<String, Action>) -> HashMap<Action, Vec<String>> {
    let mut reverse: HashMap<Action, Vec<String>> = HashMap::new();
    for (key, action) in bindings {
        reverse.entry(*action).or_default().push(key.clone());
    }
    for keys in reverse.values_mut() {
        keys.sort();
    }
    reverse
}

impl Keymap {
    /// Loads key bindings from a TOML file at `path`.
    ///
    /// Unknown action ids are ignored. The result replaces the defaults
    /// instead of merging with them.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = crate::error::read_to_string(path)?;
        let raw: RawKeymap =
            toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))?;

        let registry = ActionRegistry::new();
        let bindings: HashMap<String, Action> = raw
            .bindings
            .into_iter()
            .filter_map(|(key, id)| match registry.find_by_id(&id) {
                Some(action) => Some((key, action)),
                None => {
                    tracing::warn!(key = %key, action = %id, "ignoring unknown action in keymap");
                    None
                }
            })
            .collect();
        let reverse = build_reverse(&bindings);
        Ok(Self { bindings, reverse })
    }

    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Returns the key(s) bound to `action`, sorted.
    pub fn keys_for_action(&self, action: Action) -> Option<&[String]> {
        self.reverse.get(&action).map(|v| v.as_slice())
    }

    /// True when some binding is longer than `prefix` and starts with it
    /// (used to wait for the second key of `gg`).
    pub fn is_prefix(&self, prefix: &str) -> bool {
        self.bindings
            .keys()
            .any(|key| key.len() > prefix.len() && key.starts_with(prefix))
    }

    pub fn bindings(&self) -> &HashMap<String, Action> {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_keymap_has_navigation_keys() {
        let keymap = Keymap::default();

        assert_eq!(keymap.action_for_key("j"), Some(Action::CursorDown));
        assert_eq!(keymap.action_for_key("k"), Some(Action::CursorUp));
        assert_eq!(keymap.action_for_key("gg"), Some(Action::CursorTop));
        assert_eq!(keymap.action_for_key("G"), Some(Action::CursorBottom));
        assert_eq!(keymap.action_for_key("Enter"), Some(Action::Select));
        assert_eq!(keymap.action_for_key("Backspace"), Some(Action::Back));
        assert_eq!(keymap.action_for_key("/"), Some(Action::Search));
    }

    #[test]
    fn action_for_unknown_key_returns_none() {
        let keymap = Keymap::default();
        assert_eq!(keymap.action_for_key("z"), None);
        assert_eq!(keymap.action_for_key(""), None);
    }

    #[test]
    fn g_is_a_prefix_of_gg() {
        let keymap = Keymap::default();
        assert!(keymap.is_prefix("g"));
        assert!(!keymap.is_prefix("gg"));
        assert!(!keymap.is_prefix("j"));
    }

    #[test]
    fn load_custom_keymap_replaces_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(
            &path,
            r#"
[bindings]
j = "cursor_up"
x = "quit"
y = "nonexistent_action"
"#,
        )
        .unwrap();

        let keymap = Keymap::load(&path).unwrap();

        assert_eq!(keymap.action_for_key("j"), Some(Action::CursorUp));
        assert_eq!(keymap.action_for_key("x"), Some(Action::Quit));
        assert_eq!(keymap.action_for_key("y"), None);
        assert_eq!(keymap.action_for_key("Enter"), None);
    }

    #[test]
    fn load_empty_keymap_has_no_bindings() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(&path, "").unwrap();

        let keymap = Keymap::load(&path).unwrap();
        assert!(keymap.bindings().is_empty());
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Keymap::load(&tmp.path().join("nope.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(&path, "invalid[[[toml").unwrap();

        let result = Keymap::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }

    #[test]
    fn keys_for_action_are_sorted() {
        let keymap = Keymap::default();
        let keys = keymap.keys_for_action(Action::Back).unwrap();
        assert_eq!(keys, ["Backspace".to_string(), "h".to_string()]);
        assert!(Keymap {
            bindings: HashMap::new(),
            reverse: HashMap::new(),
        }
        .keys_for_action(Action::Quit)
        .is_none());
    }
}

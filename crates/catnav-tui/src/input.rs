use catnav_core::action::Action;
use catnav_core::config::keymap::Keymap;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::AppMode;

/// Actions that can result from a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Move the row cursor up one row.
    CursorUp,
    /// Move the row cursor down one row.
    CursorDown,
    /// Jump cursor to the first row (gg).
    CursorTop,
    /// Jump cursor to the last row (G).
    CursorBottom,
    /// Select the row under the cursor.
    Select,
    /// Leave search results or go up one folder.
    Back,
    /// Return to the catalog list.
    GoTop,
    /// Reload the current view.
    Refresh,
    /// Enter a new AppMode.
    EnterMode(AppMode),
    ToggleBasket,
    ClearBasket,
    /// Quit the application.
    Quit,
    /// Append a character to the search input.
    SearchChar(char),
    /// Remove the last character from the search input.
    SearchBackspace,
    /// Run the search with the current input.
    SearchSubmit,
    /// Leave the search input without searching.
    SearchCancel,
    // Command Palette actions
    /// Append a character to the command palette query.
    CommandPaletteChar(char),
    /// Remove the last character from the palette query.
    CommandPaletteBackspace,
    /// Move selection down in command palette.
    CommandPaletteDown,
    /// Move selection up in command palette.
    CommandPaletteUp,
    /// Confirm the selected command palette action.
    CommandPaletteConfirm,
    /// Cancel command palette, return to Normal.
    CommandPaletteCancel,
    /// No action for this key.
    None,
}

/// Tracks state for multi-key sequences like "gg".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputState {
    pending: Option<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }
}

/// Maps a key event to an InputAction based on the current mode.
/// Returns the action and a new InputState (immutable pattern).
///
/// In Normal mode every key is resolved through the `Keymap`, including
/// multi-key sequences such as `gg`. Ctrl+C always quits. The search and
/// palette inputs are hardcoded.
pub fn handle_key(
    key: KeyEvent,
    mode: &AppMode,
    state: &InputState,
    keymap: &Keymap,
) -> (InputAction, InputState) {
    match mode {
        AppMode::Normal => handle_normal_key(key, state, keymap),
        AppMode::Search => handle_search_key(key),
        AppMode::Help => handle_help_key(key),
        AppMode::CommandPalette { .. } => handle_command_palette_key(key),
    }
}

/// Converts an `Action` enum variant to the corresponding `InputAction`.
fn action_to_input_action(action: Action) -> InputAction {
    match action {
        Action::CursorUp => InputAction::CursorUp,
        Action::CursorDown => InputAction::CursorDown,
        Action::CursorTop => InputAction::CursorTop,
        Action::CursorBottom => InputAction::CursorBottom,
        Action::Select => InputAction::Select,
        Action::Back => InputAction::Back,
        Action::GoTop => InputAction::GoTop,
        Action::Refresh => InputAction::Refresh,
        Action::Search => InputAction::EnterMode(AppMode::Search),
        Action::ToggleBasket => InputAction::ToggleBasket,
        Action::ClearBasket => InputAction::ClearBasket,
        Action::Help => InputAction::EnterMode(AppMode::Help),
        Action::Quit => InputAction::Quit,
        Action::CommandPalette => InputAction::EnterMode(AppMode::CommandPalette {
            query: String::new(),
            selected: 0,
        }),
    }
}

/// Keymap name of a key press, e.g. `"j"`, `"G"`, `"Enter"`.
fn key_name(key: &KeyEvent) -> Option<String> {
    let name = match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        _ => return None,
    };
    Some(name)
}

fn handle_normal_key(
    key: KeyEvent,
    state: &InputState,
    keymap: &Keymap,
) -> (InputAction, InputState) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return (InputAction::Quit, InputState::new());
    }

    let Some(name) = key_name(&key) else {
        return (InputAction::None, InputState::new());
    };

    // Continue a pending sequence; an unknown continuation drops both keys.
    if let Some(prefix) = state.pending() {
        let sequence = format!("{prefix}{name}");
        return match keymap.action_for_key(&sequence) {
            Some(action) => (action_to_input_action(action), InputState::new()),
            None if keymap.is_prefix(&sequence) => (
                InputAction::None,
                InputState {
                    pending: Some(sequence),
                },
            ),
            None => (InputAction::None, InputState::new()),
        };
    }

    if keymap.is_prefix(&name) {
        return (InputAction::None, InputState { pending: Some(name) });
    }

    let action = keymap
        .action_for_key(&name)
        .map(action_to_input_action)
        .unwrap_or(InputAction::None);
    (action, InputState::new())
}

fn handle_search_key(key: KeyEvent) -> (InputAction, InputState) {
    let new_state = InputState::new();
    let action = match key.code {
        KeyCode::Esc => InputAction::SearchCancel,
        KeyCode::Enter => InputAction::SearchSubmit,
        KeyCode::Backspace => InputAction::SearchBackspace,
        KeyCode::Char(c) => InputAction::SearchChar(c),
        _ => InputAction::None,
    };
    (action, new_state)
}

fn handle_help_key(key: KeyEvent) -> (InputAction, InputState) {
    let new_state = InputState::new();
    let action = match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            InputAction::EnterMode(AppMode::Normal)
        }
        _ => InputAction::None,
    };
    (action, new_state)
}

fn handle_command_palette_key(key: KeyEvent) -> (InputAction, InputState) {
    let new_state = InputState::new();
    let action = match key.code {
        KeyCode::Esc => InputAction::CommandPaletteCancel,
        KeyCode::Enter => InputAction::CommandPaletteConfirm,
        KeyCode::Backspace => InputAction::CommandPaletteBackspace,
        KeyCode::Down => InputAction::CommandPaletteDown,
        KeyCode::Up => InputAction::CommandPaletteUp,
        KeyCode::Char(c) => InputAction::CommandPaletteChar(c),
        _ => InputAction::None,
    };
    (action, new_state)
}

/// Public wrapper so the command palette can resolve a chosen action.
pub fn resolve_action(action: Action) -> InputAction {
    action_to_input_action(action)
}

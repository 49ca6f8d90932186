use std::path::PathBuf;

use catnav_core::action::ActionRegistry;
use catnav_core::config::keymap::Keymap;
use catnav_core::config::settings::Config;
use catnav_core::config::theme::Theme;
use catnav_core::event::{Command, Event};
use catnav_core::{
    ApplyOutcome, CatalogItem, CatalogNavigator, NavigationMode, Reply, Request, Step,
};

use crate::input::{resolve_action, InputAction};
use crate::scene::Scene;

/// Application mode. Determines how input is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// Typing into the search bar.
    Search,
    Help,
    /// Command palette: fuzzy-search actions to execute.
    CommandPalette {
        query: String,
        selected: usize,
    },
}

/// Side effect the main loop performs after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start a catalog service call.
    Fetch(Request),
    /// Open a data sheet in the system viewer.
    OpenUrl(String),
}

/// Top-level application state.
pub struct App {
    mode: AppMode,
    navigator: CatalogNavigator,
    cursor: usize,
    search_input: String,
    scene: Scene,
    show_basket: bool,
    show_icons: bool,
    status_message: Option<String>,
    keymap: Keymap,
    theme: Theme,
    action_registry: ActionRegistry,
    should_quit: bool,
}

/// Directory holding `config.toml`, `keymap.toml` and `theme.toml`.
pub fn config_dir() -> PathBuf {
    // Check for project-local config directory first, then fall back
    let local = PathBuf::from("config");
    if local.exists() {
        return local;
    }
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("catnav")
}

impl App {
    pub fn new(config: &Config, keymap: Keymap, theme: Theme) -> Self {
        Self {
            mode: AppMode::Normal,
            navigator: CatalogNavigator::new(),
            cursor: 0,
            search_input: String::new(),
            scene: Scene::new(),
            show_basket: config.ui.show_basket,
            show_icons: config.ui.show_icons,
            status_message: None,
            keymap,
            theme,
            action_registry: ActionRegistry::new(),
            should_quit: false,
        }
    }

    // --- Getters ---

    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    pub fn navigator(&self) -> &CatalogNavigator {
        &self.navigator
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn show_basket(&self) -> bool {
        self.show_basket
    }

    pub fn show_icons(&self) -> bool {
        self.show_icons
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn action_registry(&self) -> &ActionRegistry {
        &self.action_registry
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The row under the cursor, if the view has any rows.
    pub fn selected_item(&self) -> Option<&CatalogItem> {
        self.navigator.view().row(self.cursor)
    }

    // --- Immutable transitions ---

    pub fn with_mode(self, mode: AppMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_quit(self) -> Self {
        Self {
            should_quit: true,
            ..self
        }
    }

    /// Set a status message.
    pub fn with_status(self, msg: String) -> Self {
        Self {
            status_message: Some(msg),
            ..self
        }
    }

    /// Clear the status message.
    pub fn with_clear_status(self) -> Self {
        Self {
            status_message: None,
            ..self
        }
    }

    /// Moves the cursor, clamped to the current rows.
    pub fn with_cursor(self, cursor: usize) -> Self {
        let last = self.navigator.view().rows().len().saturating_sub(1);
        Self {
            cursor: cursor.min(last),
            ..self
        }
    }

    pub fn with_cursor_up(self) -> Self {
        let cursor = self.cursor.saturating_sub(1);
        self.with_cursor(cursor)
    }

    pub fn with_cursor_down(self) -> Self {
        let cursor = self.cursor + 1;
        self.with_cursor(cursor)
    }

    pub fn with_cursor_bottom(self) -> Self {
        self.with_cursor(usize::MAX)
    }

    pub fn with_search_input(self, search_input: String) -> Self {
        Self {
            search_input,
            ..self
        }
    }

    pub fn with_basket_toggled(self) -> Self {
        Self {
            show_basket: !self.show_basket,
            ..self
        }
    }

    pub fn with_cleared_scene(self) -> Self {
        Self {
            scene: self.scene.cleared(),
            ..self
        }
    }

    /// Places `item` into the scene, replacing whatever was there.
    pub fn with_inserted(self, item: CatalogItem) -> Self {
        let msg = format!("Inserted {} {}", item.kind().label().to_lowercase(), item.label);
        Self {
            scene: self.scene.with_inserted(item),
            ..self
        }
        .with_status(msg)
    }

    // --- Navigation ---

    /// Runs one navigation command and returns the effect it asks for.
    pub fn dispatch(self, command: Command) -> (Self, Option<Effect>) {
        let (navigator, step) = self.navigator.handle_command(command);
        let app = Self { navigator, ..self };
        match step {
            Step::Idle => (app, None),
            Step::Fetch(request) => (app.with_cursor(0), Some(Effect::Fetch(request))),
            Step::Emit(event) => app.handle_event(event),
        }
    }

    /// Applies a service reply. Returns the follow-up request a resolved
    /// search-result folder produces.
    pub fn apply_reply(self, reply: Reply) -> (Self, Option<Request>) {
        let (navigator, outcome) = self.navigator.apply(reply);
        let app = Self { navigator, ..self };
        match outcome {
            ApplyOutcome::Rendered => {
                let cursor = app.cursor;
                (app.with_cursor(cursor), None)
            }
            ApplyOutcome::Stale => (app, None),
            ApplyOutcome::Failed(e) => (app.with_cursor(0).with_status(e.to_string()), None),
            ApplyOutcome::FollowUp(request) => (app.with_cursor(0), Some(request)),
        }
    }

    fn handle_event(self, event: Event) -> (Self, Option<Effect>) {
        match event {
            Event::InsertArticle(item) | Event::InsertContainer(item) => {
                (self.with_inserted(item), None)
            }
            Event::OpenUrl(url) => {
                let msg = format!("Opening {url}");
                (self.with_status(msg), Some(Effect::OpenUrl(url)))
            }
        }
    }

    // --- Input ---

    /// Applies a resolved key action.
    pub fn handle_input(self, action: InputAction) -> (Self, Option<Effect>) {
        match action {
            InputAction::CursorUp => (self.with_cursor_up(), None),
            InputAction::CursorDown => (self.with_cursor_down(), None),
            InputAction::CursorTop => (self.with_cursor(0), None),
            InputAction::CursorBottom => (self.with_cursor_bottom(), None),
            InputAction::Select => {
                if self.selected_item().is_none() {
                    return (self, None);
                }
                let cursor = self.cursor;
                self.with_clear_status().dispatch(Command::Select(cursor))
            }
            InputAction::Back => self.with_clear_status().dispatch(Command::Back),
            InputAction::GoTop => self.with_clear_status().dispatch(Command::Enter(None)),
            InputAction::Refresh => self.with_clear_status().dispatch(Command::Refresh),
            InputAction::EnterMode(AppMode::Search) => (self.begin_search(), None),
            InputAction::EnterMode(mode) => (self.with_mode(mode), None),
            InputAction::ToggleBasket => (self.with_basket_toggled(), None),
            InputAction::ClearBasket => (
                self.with_cleared_scene()
                    .with_status("Basket cleared".to_string()),
                None,
            ),
            InputAction::Quit => (self.with_quit(), None),
            InputAction::SearchChar(c) => {
                let mut input = self.search_input.clone();
                input.push(c);
                (self.with_search_input(input), None)
            }
            InputAction::SearchBackspace => {
                let mut input = self.search_input.clone();
                input.pop();
                (self.with_search_input(input), None)
            }
            InputAction::SearchSubmit => {
                let query = self.search_input.clone();
                let app = self.with_mode(AppMode::Normal);
                if query.trim().is_empty() {
                    return (app.with_status("Type something to search".to_string()), None);
                }
                app.with_clear_status().dispatch(Command::Search(query))
            }
            InputAction::SearchCancel => (self.with_mode(AppMode::Normal), None),
            InputAction::CommandPaletteChar(c) => match self.mode.clone() {
                AppMode::CommandPalette { query, .. } => {
                    let query = format!("{query}{c}");
                    (self.with_mode(AppMode::CommandPalette { query, selected: 0 }), None)
                }
                _ => (self, None),
            },
            InputAction::CommandPaletteBackspace => match self.mode.clone() {
                AppMode::CommandPalette { mut query, .. } => {
                    query.pop();
                    (self.with_mode(AppMode::CommandPalette { query, selected: 0 }), None)
                }
                _ => (self, None),
            },
            InputAction::CommandPaletteDown => match self.mode.clone() {
                AppMode::CommandPalette { query, selected } => {
                    let max = self
                        .action_registry
                        .fuzzy_search(&query)
                        .len()
                        .saturating_sub(1);
                    let selected = (selected + 1).min(max);
                    (self.with_mode(AppMode::CommandPalette { query, selected }), None)
                }
                _ => (self, None),
            },
            InputAction::CommandPaletteUp => match self.mode.clone() {
                AppMode::CommandPalette { query, selected } => {
                    let selected = selected.saturating_sub(1);
                    (self.with_mode(AppMode::CommandPalette { query, selected }), None)
                }
                _ => (self, None),
            },
            InputAction::CommandPaletteConfirm => match self.mode.clone() {
                AppMode::CommandPalette { query, selected } => {
                    let chosen = self
                        .action_registry
                        .fuzzy_search(&query)
                        .get(selected)
                        .map(|desc| desc.action);
                    // Return to Normal first, then re-process the resolved action
                    let app = self.with_mode(AppMode::Normal);
                    match chosen {
                        Some(action) => app.handle_input(resolve_action(action)),
                        None => (app, None),
                    }
                }
                _ => (self, None),
            },
            InputAction::CommandPaletteCancel => (self.with_mode(AppMode::Normal), None),
            InputAction::None => (self, None),
        }
    }

    /// Opens the search bar, prefilled with the active query.
    fn begin_search(self) -> Self {
        if !self.navigator.view().show_search_bar() {
            return self.with_status("Open a catalog to search".to_string());
        }
        let input = match self.navigator.mode() {
            NavigationMode::SearchResults { query } => query.clone(),
            NavigationMode::Browsing => String::new(),
        };
        self.with_search_input(input).with_mode(AppMode::Search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catnav_core::{execute, CatalogPath, CatalogService, InMemoryCatalog, ItemKind};

    const SHOWROOM: &str = r#"{
        "catalogs": [
            { "id": "Chairs", "children": [
                { "type": "Folder", "name": "Lounge", "children": [
                    { "type": "Article", "name": "L1", "label": "Lounge chair", "article_number": "L-1" }
                ] },
                { "type": "Article", "name": "C1", "label": "Red chair", "article_number": "4520",
                  "variant_code": "Polster.Ausf=13" },
                { "type": "Container", "name": "K1", "label": "Red corner" },
                { "type": "Information", "name": "I1", "label": "Care",
                  "resources": [ { "kind": "Document", "value": "application/pdf;https://example.com/care.pdf" } ] }
            ] }
        ]
    }"#;

    fn setup_app() -> App {
        App::new(&Config::default(), Keymap::default(), Theme::default())
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::from_json(SHOWROOM).unwrap()
    }

    /// Runs every fetch effect against `service` until the app settles.
    async fn settle(
        service: &dyn CatalogService,
        app: App,
        effect: Option<Effect>,
    ) -> (App, Option<Effect>) {
        let mut app = app;
        let mut effect = effect;
        while let Some(Effect::Fetch(request)) = effect {
            let reply = execute(service, request).await;
            let (next, follow_up) = app.apply_reply(reply);
            app = next;
            effect = follow_up.map(Effect::Fetch);
        }
        (app, effect)
    }

    async fn in_chairs(service: &dyn CatalogService) -> App {
        let chairs = CatalogPath::from_segments(["Chairs"]);
        let (app, effect) = setup_app().dispatch(Command::Enter(Some(chairs)));
        let (app, _) = settle(service, app, effect).await;
        app
    }

    fn row_index(app: &App, name: &str) -> usize {
        app.navigator()
            .view()
            .rows()
            .iter()
            .position(|item| item.name == name)
            .unwrap()
    }

    // --- App creation ---

    #[test]
    fn app_new_starts_idle_in_normal_mode() {
        let app = setup_app();
        assert_eq!(app.mode(), &AppMode::Normal);
        assert!(!app.should_quit());
        assert!(app.status_message().is_none());
        assert!(app.scene().is_empty());
        assert!(app.show_basket());
        assert!(app.selected_item().is_none());
    }

    #[test]
    fn app_new_honours_ui_config() {
        let mut config = Config::default();
        config.ui.show_basket = false;
        config.ui.show_icons = false;
        let app = App::new(&config, Keymap::default(), Theme::default());
        assert!(!app.show_basket());
        assert!(!app.show_icons());
    }

    #[test]
    fn config_dir_ends_with_catnav_or_is_local() {
        let dir = config_dir();
        assert!(dir.ends_with("catnav") || dir == PathBuf::from("config"));
    }

    // --- Cursor ---

    #[tokio::test]
    async fn cursor_is_clamped_to_rows() {
        let service = catalog();
        let app = in_chairs(&service).await;
        let rows = app.navigator().view().rows().len();

        let app = app.with_cursor_bottom();
        assert_eq!(app.cursor(), rows - 1);
        let app = app.with_cursor_down();
        assert_eq!(app.cursor(), rows - 1);
        let app = app.with_cursor(0).with_cursor_up();
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn select_on_empty_view_does_nothing() {
        let (app, effect) = setup_app().handle_input(InputAction::Select);
        assert!(effect.is_none());
        assert!(app.navigator().pending().is_none());
    }

    // --- Navigation ---

    #[tokio::test]
    async fn selecting_folder_descends_and_resets_cursor() {
        let service = catalog();
        let app = in_chairs(&service).await;
        let lounge = row_index(&app, "Lounge");
        let app = app.with_cursor(lounge);

        let (app, effect) = app.handle_input(InputAction::Select);
        assert!(matches!(effect, Some(Effect::Fetch(Request::ListChildren { .. }))));
        assert_eq!(app.cursor(), 0);

        let (app, _) = settle(&service, app, effect).await;
        assert_eq!(app.navigator().path().segments(), ["Chairs", "Lounge"]);
        assert_eq!(app.selected_item().unwrap().label, "Lounge chair");
    }

    #[tokio::test]
    async fn selecting_article_inserts_into_scene() {
        let service = catalog();
        let app = in_chairs(&service).await;
        let chair = row_index(&app, "C1");

        let (app, effect) = app.with_cursor(chair).handle_input(InputAction::Select);
        assert!(effect.is_none());
        assert_eq!(app.scene().len(), 1);
        assert_eq!(app.scene().entries()[0].variant_code(), Some("Polster.Ausf=13"));
        assert_eq!(app.status_message(), Some("Inserted article Red chair"));
    }

    #[tokio::test]
    async fn selecting_container_replaces_scene() {
        let service = catalog();
        let app = in_chairs(&service).await;
        let chair = row_index(&app, "C1");
        let corner = row_index(&app, "K1");

        let (app, _) = app.with_cursor(chair).handle_input(InputAction::Select);
        let (app, _) = app.with_cursor(corner).handle_input(InputAction::Select);
        assert_eq!(app.scene().len(), 1);
        assert_eq!(app.scene().entries()[0].kind(), ItemKind::Container);
    }

    #[tokio::test]
    async fn selecting_information_opens_pdf() {
        let service = catalog();
        let app = in_chairs(&service).await;
        let care = row_index(&app, "I1");

        let (app, effect) = app.with_cursor(care).handle_input(InputAction::Select);
        assert_eq!(
            effect,
            Some(Effect::OpenUrl("https://example.com/care.pdf".to_string()))
        );
        assert!(app.scene().is_empty());
    }

    #[tokio::test]
    async fn search_submit_runs_query_and_back_leaves_it() {
        let service = catalog();
        let app = in_chairs(&service).await;

        let (app, _) = app.handle_input(InputAction::EnterMode(AppMode::Search));
        assert_eq!(app.mode(), &AppMode::Search);
        let (app, _) = app.handle_input(InputAction::SearchChar('r'));
        let (app, _) = app.handle_input(InputAction::SearchChar('e'));
        let (app, _) = app.handle_input(InputAction::SearchChar('d'));
        let (app, effect) = app.handle_input(InputAction::SearchSubmit);
        assert!(matches!(effect, Some(Effect::Fetch(Request::Search { .. }))));
        assert_eq!(app.mode(), &AppMode::Normal);

        let (app, _) = settle(&service, app, effect).await;
        assert_eq!(
            app.navigator().mode(),
            &NavigationMode::SearchResults {
                query: "red".to_string()
            }
        );
        let labels: Vec<&str> = app
            .navigator()
            .view()
            .rows()
            .iter()
            .map(|item| item.label.as_str())
            .collect();
        assert!(labels.contains(&"Red chair"));

        // Reopening the bar keeps the active query.
        let (app, _) = app.handle_input(InputAction::EnterMode(AppMode::Search));
        assert_eq!(app.search_input(), "red");
        let (app, _) = app.handle_input(InputAction::SearchCancel);

        let (app, effect) = app.handle_input(InputAction::Back);
        let (app, _) = settle(&service, app, effect).await;
        assert_eq!(app.navigator().mode(), &NavigationMode::Browsing);
        assert_eq!(app.navigator().path().segments(), ["Chairs"]);
    }

    #[test]
    fn blank_search_submit_sets_status() {
        let (app, effect) = setup_app()
            .with_mode(AppMode::Search)
            .handle_input(InputAction::SearchSubmit);
        assert!(effect.is_none());
        assert_eq!(app.status_message(), Some("Type something to search"));
    }

    #[test]
    fn search_unavailable_at_catalog_list() {
        let (app, _) = setup_app().handle_input(InputAction::EnterMode(AppMode::Search));
        assert_eq!(app.mode(), &AppMode::Normal);
        assert_eq!(app.status_message(), Some("Open a catalog to search"));
    }

    #[tokio::test]
    async fn stale_reply_is_dropped() {
        let service = catalog();
        let (app, first) = setup_app().dispatch(Command::Enter(None));
        let (app, second) = app.handle_input(InputAction::Refresh);
        let (Some(Effect::Fetch(first)), Some(Effect::Fetch(second))) = (first, second) else {
            panic!("expected two fetches");
        };

        let (app, follow_up) = app.apply_reply(execute(&service, first).await);
        assert!(follow_up.is_none());
        assert!(app.navigator().view().is_loading());

        let (app, _) = app.apply_reply(execute(&service, second).await);
        assert!(!app.navigator().view().is_loading());
        assert_eq!(app.navigator().view().rows().len(), 1);
    }

    #[tokio::test]
    async fn offline_service_reports_status() {
        let service = catalog();
        service.set_offline(true);
        let (app, effect) = setup_app().dispatch(Command::Enter(None));
        let (app, _) = settle(&service, app, effect).await;
        assert!(app.navigator().view().rows().is_empty());
        assert!(app.status_message().is_some());
    }

    // --- Basket ---

    #[test]
    fn toggle_and_clear_basket() {
        let app = setup_app().with_inserted(CatalogItem::article("egr:0", "C1", "4520"));
        let (app, _) = app.handle_input(InputAction::ToggleBasket);
        assert!(!app.show_basket());
        let (app, _) = app.handle_input(InputAction::ClearBasket);
        assert!(app.scene().is_empty());
        assert_eq!(app.status_message(), Some("Basket cleared"));
    }

    // --- Modes ---

    #[test]
    fn quit_sets_flag() {
        let (app, _) = setup_app().handle_input(InputAction::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn help_mode_round_trip() {
        let (app, _) = setup_app().handle_input(InputAction::EnterMode(AppMode::Help));
        assert_eq!(app.mode(), &AppMode::Help);
        let (app, _) = app.handle_input(InputAction::EnterMode(AppMode::Normal));
        assert_eq!(app.mode(), &AppMode::Normal);
    }

    #[test]
    fn command_palette_query_editing() {
        let app = setup_app().with_mode(AppMode::CommandPalette {
            query: String::new(),
            selected: 3,
        });
        let (app, _) = app.handle_input(InputAction::CommandPaletteChar('q'));
        assert_eq!(
            app.mode(),
            &AppMode::CommandPalette {
                query: "q".to_string(),
                selected: 0
            }
        );
        let (app, _) = app.handle_input(InputAction::CommandPaletteBackspace);
        assert_eq!(
            app.mode(),
            &AppMode::CommandPalette {
                query: String::new(),
                selected: 0
            }
        );
    }

    #[test]
    fn command_palette_selection_is_clamped() {
        let app = setup_app().with_mode(AppMode::CommandPalette {
            query: String::new(),
            selected: 0,
        });
        let (app, _) = app.handle_input(InputAction::CommandPaletteUp);
        assert!(matches!(app.mode(), AppMode::CommandPalette { selected: 0, .. }));

        let total = app.action_registry().all().len();
        let mut app = app;
        for _ in 0..total + 3 {
            app = app.handle_input(InputAction::CommandPaletteDown).0;
        }
        assert_eq!(
            app.mode(),
            &AppMode::CommandPalette {
                query: String::new(),
                selected: total - 1
            }
        );
    }

    #[test]
    fn command_palette_confirm_runs_action() {
        let app = setup_app().with_mode(AppMode::CommandPalette {
            query: "quit".to_string(),
            selected: 0,
        });
        let (app, _) = app.handle_input(InputAction::CommandPaletteConfirm);
        assert_eq!(app.mode(), &AppMode::Normal);
        assert!(app.should_quit());
    }

    #[test]
    fn command_palette_cancel_returns_to_normal() {
        let app = setup_app().with_mode(AppMode::CommandPalette {
            query: "x".to_string(),
            selected: 0,
        });
        let (app, _) = app.handle_input(InputAction::CommandPaletteCancel);
        assert_eq!(app.mode(), &AppMode::Normal);
    }
}

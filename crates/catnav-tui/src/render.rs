use catnav_core::action::ActionRegistry;
use catnav_core::config::keymap::Keymap;
use catnav_core::config::theme::{parse_color, Theme};
use catnav_core::NavigationMode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

use crate::app::{App, AppMode};
use crate::ui::basket::render_basket;
use crate::ui::breadcrumb::render_breadcrumb;
use crate::ui::command_palette::render_command_palette;
use crate::ui::panel::render_catalog_list;
use crate::ui::popup::render_popup;
use crate::ui::search_bar::render_search_bar;
use crate::ui::statusbar::{render_statusbar, StatusBarProps};

/// Computes the visible window `(start, end)` for a list of `total` items
/// so that `selected` is always in view within `max_visible` lines.
pub fn visible_window(selected: usize, total: usize, max_visible: usize) -> (usize, usize) {
    if total <= max_visible {
        return (0, total);
    }
    let half = max_visible / 2;
    let start = if selected <= half {
        0
    } else if selected + half >= total {
        total.saturating_sub(max_visible)
    } else {
        selected - half
    };
    let end = (start + max_visible).min(total);
    (start, end)
}

/// Composes the full UI layout each frame.
pub fn render(f: &mut Frame, app: &App) {
    let theme = app.theme();
    let navigator = app.navigator();
    let view = navigator.view();

    let search_height = if view.show_search_bar() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(search_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_breadcrumb(f, chunks[0], navigator.path(), navigator.mode(), theme);

    if view.show_search_bar() {
        let active_query = match navigator.mode() {
            NavigationMode::SearchResults { query } => Some(query.as_str()),
            NavigationMode::Browsing => None,
        };
        render_search_bar(
            f,
            chunks[1],
            app.search_input(),
            active_query,
            matches!(app.mode(), AppMode::Search),
            theme,
        );
    }

    let (list_area, basket_area) = body_areas(chunks[2], app.show_basket());
    let title = match navigator.path().leaf() {
        Some(leaf) => format!(" {leaf} "),
        None => " Catalogs ".to_string(),
    };
    render_catalog_list(
        f,
        list_area,
        view,
        app.cursor(),
        &title,
        theme,
        app.show_icons(),
    );
    if let Some(area) = basket_area {
        render_basket(f, area, app.scene(), theme, app.show_icons());
    }

    let props = StatusBarProps {
        row_count: view.rows().len(),
        selected_index: app.cursor(),
        selected_item: app.selected_item(),
        searching: navigator.mode().is_search(),
        loading: view.is_loading(),
        basket_count: app.scene().len(),
        status_message: app.status_message(),
    };
    render_statusbar(f, chunks[3], &props, theme);

    // Render modal overlays based on mode
    match app.mode() {
        AppMode::Help => render_help_popup(f, app.action_registry(), app.keymap(), theme),
        AppMode::CommandPalette { query, selected } => render_command_palette(
            f,
            query,
            *selected,
            app.action_registry(),
            app.keymap(),
            theme,
        ),
        AppMode::Normal | AppMode::Search => {}
    }
}

/// Splits the body into the catalog list and, when shown, the basket.
fn body_areas(area: Rect, show_basket: bool) -> (Rect, Option<Rect>) {
    if !show_basket {
        return (area, None);
    }
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);
    (chunks[0], Some(chunks[1]))
}

fn render_help_popup(f: &mut Frame, registry: &ActionRegistry, keymap: &Keymap, theme: &Theme) {
    let mut lines = help_lines(registry, keymap, theme);
    lines.push(Line::from(""));
    lines.push(Line::from("Press Esc or ? to close"));
    render_popup(f, "Help", lines, theme);
}

/// One line per bound action: its keys, then its description.
fn help_lines(registry: &ActionRegistry, keymap: &Keymap, theme: &Theme) -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(parse_color(&theme.popup.border_fg))
        .add_modifier(Modifier::BOLD);
    registry
        .all()
        .iter()
        .filter_map(|desc| {
            let keys = keymap.keys_for_action(desc.action)?.join("/");
            Some(Line::from(vec![
                Span::styled(format!("{keys:<12}"), key_style),
                Span::raw(format!("- {}", desc.description)),
            ]))
        })
        .collect()
}

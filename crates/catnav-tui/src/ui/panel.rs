//! Catalog list panel.
//!
//! Renders the navigator's view as a scrollable `List`, with a back row
//! above it when the view offers one and a placeholder line while the
//! view is loading, empty or failed.

use catnav_core::config::theme::{parse_color, Theme};
use catnav_core::{CatalogItem, CatalogView, ItemKind, ViewStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::icons::{icon_for_item, BACK_ICON};

/// Renders the catalog rows of `view`; the row at `selected` is reversed.
pub fn render_catalog_list(
    f: &mut Frame,
    area: Rect,
    view: &CatalogView,
    selected: usize,
    title: &str,
    theme: &Theme,
    show_icons: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_owned())
        .border_style(Style::default().fg(parse_color(&theme.panel.selected_fg)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (back_area, list_area) = if view.show_back() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, inner)
    };

    if let Some(back_area) = back_area {
        let icon = if show_icons { BACK_ICON } else { "<- " };
        let back = Paragraph::new(Line::from(Span::styled(
            format!("  {icon}.."),
            Style::default().fg(parse_color(&theme.panel.back_fg)),
        )));
        f.render_widget(back, back_area);
    }

    if let Some(placeholder) = placeholder_line(view.status(), view.rows().is_empty(), theme) {
        f.render_widget(Paragraph::new(placeholder), list_area);
        return;
    }

    let items: Vec<ListItem> = view
        .rows()
        .iter()
        .map(|item| ListItem::new(row_line(item, theme, show_icons)))
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::REVERSED)
                .fg(parse_color(&theme.panel.selected_fg)),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(selected));

    f.render_stateful_widget(list, list_area, &mut state);
}

fn row_line(item: &CatalogItem, theme: &Theme, show_icons: bool) -> Line<'static> {
    let icon = if show_icons {
        icon_for_item(item)
    } else if item.is_folder() {
        "/"
    } else {
        " "
    };
    let mut spans = vec![Span::styled(
        format!("{icon}{}", item.label),
        item_style(item.kind(), theme),
    )];
    if let Some(number) = item.article_number() {
        spans.push(Span::styled(
            format!("  {number}"),
            Style::default().fg(parse_color(&theme.panel.back_fg)),
        ));
    }
    Line::from(spans)
}

/// Text shown instead of rows, or `None` when there are rows to show.
fn placeholder_line(status: &ViewStatus, empty: bool, theme: &Theme) -> Option<Line<'static>> {
    let dim = Style::default()
        .fg(parse_color(&theme.panel.back_fg))
        .add_modifier(Modifier::ITALIC);
    match status {
        ViewStatus::Loading => Some(Line::from(Span::styled("  Loading…", dim))),
        ViewStatus::Failed(message) => Some(Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(parse_color(&theme.panel.error_fg)),
        ))),
        ViewStatus::Idle | ViewStatus::Ready if empty => {
            Some(Line::from(Span::styled("  (empty)", dim)))
        }
        ViewStatus::Idle | ViewStatus::Ready => None,
    }
}

fn item_style(kind: ItemKind, theme: &Theme) -> Style {
    let style = Style::default().fg(parse_color(theme.panel.kind_fg(kind)));
    if kind == ItemKind::Folder {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

//! Basket panel listing what has been inserted into the scene.

use catnav_core::config::theme::{parse_color, Theme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::icons::icon_for_kind;
use crate::scene::{Scene, SceneEntry};

pub fn render_basket(f: &mut Frame, area: Rect, scene: &Scene, theme: &Theme, show_icons: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            "Basket",
            Style::default()
                .fg(parse_color(&theme.basket.title_fg))
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(parse_color(&theme.basket.border_fg)));

    let lines: Vec<Line> = if scene.is_empty() {
        vec![Line::from(Span::styled(
            "nothing inserted",
            Style::default()
                .fg(parse_color(&theme.basket.variant_fg))
                .add_modifier(Modifier::ITALIC),
        ))]
    } else {
        scene
            .entries()
            .iter()
            .flat_map(|entry| entry_lines(entry, theme, show_icons))
            .collect()
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// One line for the item, plus one for its variant code when present.
fn entry_lines(entry: &SceneEntry, theme: &Theme, show_icons: bool) -> Vec<Line<'static>> {
    let icon = if show_icons { icon_for_kind(entry.kind()) } else { "" };
    let item = entry.item();
    let title = match item.article_number() {
        Some(number) => format!("{icon}{} ({number})", item.label),
        None => format!("{icon}{}", item.label),
    };
    let mut lines = vec![Line::from(Span::styled(
        title,
        Style::default().fg(parse_color(theme.panel.kind_fg(entry.kind()))),
    ))];
    if let Some(code) = entry.variant_code() {
        lines.push(Line::from(Span::styled(
            format!("  {code}"),
            Style::default().fg(parse_color(&theme.basket.variant_fg)),
        )));
    }
    lines
}

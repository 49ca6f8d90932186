//! Status bar rendering.
//!
//! The status bar occupies a single row at the bottom of the terminal and
//! shows the navigation mode, cursor position, selected item info, a
//! loading marker, the basket size and an optional status message.

use catnav_core::config::theme::{parse_color, Theme};
use catnav_core::CatalogItem;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub row_count: usize,
    pub selected_index: usize,
    pub selected_item: Option<&'a CatalogItem>,
    pub searching: bool,
    pub loading: bool,
    pub basket_count: usize,
    pub status_message: Option<&'a str>,
}

/// Renders the bottom status bar.
pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>, theme: &Theme) {
    let bg = parse_color(&theme.statusbar.bg);
    let position_fg = parse_color(&theme.statusbar.position_fg);
    let message_fg = parse_color(&theme.statusbar.message_fg);

    let mut spans = vec![
        mode_span(props.searching, theme),
        Span::styled(
            position_text(props.row_count, props.selected_index),
            Style::default()
                .fg(position_fg)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            props.selected_item.map(item_info).unwrap_or_default(),
            Style::default().fg(position_fg).bg(bg),
        ),
    ];

    if props.loading {
        spans.push(Span::styled(
            "  [loading]",
            Style::default()
                .fg(parse_color(&theme.statusbar.loading_fg))
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if props.basket_count > 0 {
        spans.push(Span::styled(
            format!("  [basket: {}]", props.basket_count),
            Style::default().fg(position_fg).bg(bg),
        ));
    }

    if let Some(msg) = props.status_message {
        spans.push(Span::styled(
            format!("  {msg}"),
            Style::default()
                .fg(message_fg)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    f.render_widget(bar, area);
}

fn mode_span(searching: bool, theme: &Theme) -> Span<'static> {
    let label = if searching { " SEARCH " } else { " BROWSE " };
    Span::styled(
        label,
        Style::default()
            .fg(parse_color(&theme.statusbar.bg))
            .bg(parse_color(&theme.statusbar.mode_fg))
            .add_modifier(Modifier::BOLD),
    )
}

fn position_text(row_count: usize, selected_index: usize) -> String {
    if row_count > 0 {
        format!(" {}/{}", selected_index + 1, row_count)
    } else {
        " 0/0".to_owned()
    }
}

fn item_info(item: &CatalogItem) -> String {
    match item.article_number() {
        Some(number) => format!("  [{}] {} #{number}", item.kind().label(), item.label),
        None => format!("  [{}] {}", item.kind().label(), item.label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn position_text_is_one_based() {
        assert_eq!(position_text(0, 0), " 0/0");
        assert_eq!(position_text(5, 0), " 1/5");
        assert_eq!(position_text(5, 4), " 5/5");
    }

    #[test]
    fn item_info_includes_article_number() {
        let item = CatalogItem::article("egr:0", "C1", "4520").with_label("Red chair");
        assert_eq!(item_info(&item), "  [Article] Red chair #4520");
    }

    #[test]
    fn item_info_for_folder() {
        let item = CatalogItem::folder("egr:0", "Chairs");
        assert_eq!(item_info(&item), "  [Folder] Chairs");
    }

    #[test]
    fn mode_span_reflects_search() {
        let theme = Theme::default();
        assert_eq!(mode_span(false, &theme).content.as_ref(), " BROWSE ");
        let span = mode_span(true, &theme);
        assert_eq!(span.content.as_ref(), " SEARCH ");
        assert_eq!(span.style.bg, Some(Color::Blue));
    }
}

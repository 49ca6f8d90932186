use catnav_core::config::theme::{parse_color, Theme};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Renders the search bar. While `active`, the typed input is shown with a
/// cursor; otherwise the last submitted query, or a placeholder.
pub fn render_search_bar(
    f: &mut Frame,
    area: Rect,
    input: &str,
    active_query: Option<&str>,
    active: bool,
    theme: &Theme,
) {
    let border_fg = if active {
        parse_color(&theme.search.active_border_fg)
    } else {
        parse_color(&theme.search.border_fg)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Search")
        .border_style(Style::default().fg(border_fg));

    let line = search_line(input, active_query, active, theme);
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn search_line(
    input: &str,
    active_query: Option<&str>,
    active: bool,
    theme: &Theme,
) -> Line<'static> {
    let placeholder = Style::default().fg(parse_color(&theme.search.placeholder_fg));
    if active {
        return Line::from(vec![
            Span::raw(format!("/{input}")),
            Span::styled("_", placeholder),
        ]);
    }
    match active_query {
        Some(query) => Line::from(Span::raw(format!("/{query}"))),
        None => Line::from(Span::styled("press / to search this catalog", placeholder)),
    }
}

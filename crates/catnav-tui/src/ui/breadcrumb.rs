use catnav_core::config::theme::{parse_color, Theme};
use catnav_core::{CatalogPath, NavigationMode};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Renders a breadcrumb trail for the current catalog path.
/// In search mode the active query is appended.
/// Example: " Catalogs / Chairs / Lounge  search: red"
pub fn render_breadcrumb(
    f: &mut Frame,
    area: Rect,
    path: &CatalogPath,
    mode: &NavigationMode,
    theme: &Theme,
) {
    let bg = parse_color(&theme.breadcrumb.bg);
    let breadcrumb =
        Paragraph::new(breadcrumb_line(path, mode, theme)).style(Style::default().bg(bg));
    f.render_widget(breadcrumb, area);
}

fn breadcrumb_line(path: &CatalogPath, mode: &NavigationMode, theme: &Theme) -> Line<'static> {
    let root_fg = parse_color(&theme.breadcrumb.root_fg);
    let sep_fg = parse_color(&theme.breadcrumb.separator_fg);
    let comp_fg = parse_color(&theme.breadcrumb.component_fg);

    let mut parts = vec![Span::styled(
        " Catalogs",
        Style::default().fg(root_fg).add_modifier(Modifier::BOLD),
    )];

    for segment in path.segments() {
        parts.push(Span::styled(" / ", Style::default().fg(sep_fg)));
        parts.push(Span::styled(segment.clone(), Style::default().fg(comp_fg)));
    }

    if let NavigationMode::SearchResults { query } = mode {
        parts.push(Span::styled(
            format!("  search: {query}"),
            Style::default()
                .fg(parse_color(&theme.breadcrumb.search_fg))
                .add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(parts)
}

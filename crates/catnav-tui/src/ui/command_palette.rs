use catnav_core::action::{ActionDescriptor, ActionRegistry};
use catnav_core::config::keymap::Keymap;
use catnav_core::config::theme::{parse_color, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::render::visible_window;
use crate::ui::popup::centered_rect;

/// Renders the command palette popup.
///
/// Shows a fuzzy-searchable list of all available actions with their
/// descriptions, categories, and current key bindings.
pub fn render_command_palette(
    f: &mut Frame,
    query: &str,
    selected: usize,
    registry: &ActionRegistry,
    keymap: &Keymap,
    theme: &Theme,
) {
    let area = centered_rect(60, 50, f.area());
    let border_fg = parse_color(&theme.popup.border_fg);
    let dim = Style::default().fg(parse_color(&theme.search.placeholder_fg));

    f.render_widget(Clear, area);

    // Split: input line (1) + divider (1) + list (rest)
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Command Palette")
        .border_style(Style::default().fg(border_fg));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner_area);

    let input_line = Line::from(vec![
        Span::styled(": ", Style::default().fg(border_fg)),
        Span::raw(query),
        Span::styled("_", dim),
    ]);
    f.render_widget(Paragraph::new(input_line), layout[0]);

    let results = registry.fuzzy_search(query);
    let divider = Line::from(Span::styled(
        format!("{}/{} actions", results.len(), registry.all().len()),
        dim,
    ));
    f.render_widget(Paragraph::new(divider), layout[1]);

    let (win_start, win_end) = visible_window(selected, results.len(), layout[2].height as usize);
    let lines: Vec<Line> = results
        .iter()
        .enumerate()
        .skip(win_start)
        .take(win_end - win_start)
        .map(|(i, desc)| format_action_line(desc, keymap, i == selected, theme))
        .collect();

    f.render_widget(Paragraph::new(lines), layout[2]);
}

/// Formats a single action line for the palette list.
fn format_action_line(
    desc: &ActionDescriptor,
    keymap: &Keymap,
    is_selected: bool,
    theme: &Theme,
) -> Line<'static> {
    let marker = if is_selected { "> " } else { "  " };
    let name_style = if is_selected {
        Style::default()
            .fg(parse_color(&theme.panel.selected_fg))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let dim = Style::default().fg(parse_color(&theme.search.placeholder_fg));

    let mut spans = vec![
        Span::styled(format!("{marker}{}", desc.name), name_style),
        Span::styled(format!("  [{}]", desc.category.label()), dim),
        Span::raw(format!("  {}", desc.description)),
    ];

    if let Some(keys) = keymap.keys_for_action(desc.action) {
        spans.push(Span::styled(
            format!("  ({})", keys.join(", ")),
            Style::default().fg(parse_color(&theme.popup.border_fg)),
        ));
    }

    Line::from(spans)
}

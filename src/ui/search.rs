//! Search Input UI
//!
//! Renders the search input box with query, result count, and blinking cursor.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the search input box
///
/// # Arguments
/// - `f`: Ratatui frame
/// - `area`: Rectangular area to render in
/// - `query`: Raw search text (may not be applied yet)
/// - `active`: Whether input is actively receiving keystrokes
/// - `pending`: Whether the debounce timer is still running
/// - `vim_mode`: Whether vim keybindings are enabled
pub fn render_search_input(
    f: &mut Frame,
    area: Rect,
    query: &str,
    active: bool,
    pending: bool,
    vim_mode: bool,
) {
    let title = if active {
        " Search by name - Enter to accept, Esc to cancel ".to_string()
    } else if !query.is_empty() {
        " Search - Esc to clear ".to_string()
    } else {
        // No search query - show trigger key
        let search_key = if vim_mode { "/" } else { "/ or Ctrl-F" };
        format!(" Search ({}) ", search_key)
    };

    let border_color = if active { Color::Cyan } else { Color::Gray };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(border_color));

    let cursor_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::SLOW_BLINK);

    let mut spans = vec![Span::raw("Name: "), Span::raw(query)];
    if active {
        spans.push(Span::styled("█", cursor_style));
    }
    if pending {
        spans.push(Span::styled("  …", Style::default().fg(Color::DarkGray)));
    }
    let style = if active {
        Style::default()
    } else {
        Style::default().fg(Color::Gray)
    };

    let paragraph = Paragraph::new(vec![Line::from(spans)])
        .block(block)
        .style(style);

    f.render_widget(paragraph, area);
}

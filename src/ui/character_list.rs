use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use rmcat::api::{Character, Status};
use rmcat::logic::projection::metadata_line;

/// Color used for a character's life status
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Alive => Color::Green,
        Status::Dead => Color::Red,
        Status::Unknown => Color::Gray,
    }
}

/// Two-line list entry: name with status, then the metadata line
fn character_item(character: &Character, favorite: bool) -> ListItem<'static> {
    let star = if favorite { "★ " } else { "  " };
    let title = Line::from(vec![
        Span::styled(star, Style::default().fg(Color::Yellow)),
        Span::styled(
            character.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("● {}", character.status.label()),
            Style::default().fg(status_color(character.status)),
        ),
    ]);
    let meta = Line::from(Span::styled(
        format!("    {}", metadata_line(character)),
        Style::default().fg(Color::DarkGray),
    ));
    ListItem::new(vec![title, meta])
}

/// Render a character list, or a placeholder message when it is empty
pub fn render_character_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    characters: &[Character],
    selected: Option<usize>,
    is_favorite: impl Fn(u32) -> bool,
    placeholder: Option<(&str, Option<&str>)>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(Color::Cyan));

    if characters.is_empty() {
        let mut lines = Vec::new();
        if let Some((message, hint)) = placeholder {
            lines.push(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Gray),
            )));
            if let Some(hint) = hint {
                lines.push(Line::from(Span::styled(
                    hint.to_string(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = characters
        .iter()
        .map(|c| character_item(c, is_favorite(c.id)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(selected);
    f.render_stateful_widget(list, area, &mut state);
}

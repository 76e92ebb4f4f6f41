//! Character Detail Popup
//!
//! Centered popup showing one character fetched by id.

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use rmcat::api::Character;
use rmcat::logic::ui::format_created;
use rmcat::model::DetailState;

use super::character_list::status_color;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

fn field(label: &str, value: &str) -> Line<'static> {
    let value = if value.is_empty() { "-" } else { value };
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(Color::Yellow)),
        Span::raw(value.to_string()),
    ])
}

fn character_lines(character: &Character, favorite: bool) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                character.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                if favorite { "  ★" } else { "" },
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(Span::styled(
            format!("● {}", character.status.label()),
            Style::default().fg(status_color(character.status)),
        )),
        Line::raw(""),
        field("Species", &character.species),
        field("Type", &character.kind),
        field("Gender", &character.gender),
        field("Origin", &character.origin.name),
        field("Location", &character.location.name),
        field("Episodes", &character.episode.len().to_string()),
        field("Created", &format_created(&character.created)),
    ];
    if !character.image.is_empty() {
        lines.push(field("Image", &character.image));
    }
    lines
}

pub fn render_detail_popup(f: &mut Frame, area: Rect, state: &DetailState, favorite: bool) {
    let lines = match state {
        DetailState::Closed => return,
        DetailState::Loading(id) => vec![Line::from(format!("Loading character #{}...", id))],
        DetailState::Loaded(character) => character_lines(character, favorite),
        DetailState::NotFound(id) => vec![Line::from(Span::styled(
            format!("Character #{} not found", id),
            Style::default().fg(Color::Red),
        ))],
        DetailState::Failed(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))],
    };

    let popup = centered(area, area.width.min(70), (lines.len() as u16 + 2).min(area.height));
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Character ")
        .title_bottom(Line::from(" f:Favorite  Esc:Close ").alignment(Alignment::Right))
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup);
}

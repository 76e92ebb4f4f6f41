use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use rmcat::model::{FavoritesLoad, LoadState};

/// What the list footer should say
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus<'a> {
    Loading,
    Error(&'a str),
    EndOfList,
    Idle,
}

/// Footer state for the characters view
pub fn catalog_status(state: &LoadState, reached_end: bool) -> ListStatus<'_> {
    match state {
        LoadState::Fetching(_) => ListStatus::Loading,
        LoadState::Error(message) => ListStatus::Error(message),
        LoadState::Idle if reached_end => ListStatus::EndOfList,
        LoadState::Idle => ListStatus::Idle,
    }
}

/// Footer state for the favorites view
pub fn favorites_status(load: &FavoritesLoad) -> ListStatus<'_> {
    match load {
        FavoritesLoad::Loading => ListStatus::Loading,
        FavoritesLoad::Failed(message) => ListStatus::Error(message),
        FavoritesLoad::Idle => ListStatus::Idle,
    }
}

/// Render the bottom status bar
/// - Left: load state, error, or end-of-list notice
/// - Right: active filters, item count and the shareable path
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    status: ListStatus,
    filters: &str,
    item_count: usize,
    share_path: Option<&str>,
) {
    let (left, color) = match status {
        ListStatus::Loading => ("Loading...".to_string(), Color::Cyan),
        ListStatus::Error(message) => (format!("{} (r to retry)", message), Color::Red),
        ListStatus::EndOfList => ("No more characters.".to_string(), Color::Gray),
        ListStatus::Idle => (String::new(), Color::Gray),
    };

    let mut spans = vec![
        Span::styled(left, Style::default().fg(color)),
        Span::raw(format!("  │ {} │ {} items", filters, item_count)),
    ];
    if let Some(path) = share_path {
        spans.push(Span::styled(
            format!(" │ {}", path),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcat::model::FetchReason;

    #[test]
    fn test_end_of_list_only_when_idle() {
        assert_eq!(catalog_status(&LoadState::Idle, true), ListStatus::EndOfList);
        assert_eq!(
            catalog_status(&LoadState::Fetching(FetchReason::Append), true),
            ListStatus::Loading
        );
        assert_eq!(catalog_status(&LoadState::Idle, false), ListStatus::Idle);
    }

    #[test]
    fn test_error_message_passes_through() {
        let state = LoadState::Error("Failed to load characters: timeout".to_string());
        assert_eq!(
            catalog_status(&state, false),
            ListStatus::Error("Failed to load characters: timeout")
        );
    }
}

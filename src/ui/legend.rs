use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().fg(Color::Yellow))
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(
    vim_mode: bool,
    on_favorites: bool,
    search_mode: bool,
    has_error: bool,
) -> Vec<Span<'static>> {
    if search_mode {
        return vec![
            key("Enter"),
            Span::raw(":Accept  "),
            key("Esc"),
            Span::raw(":Cancel  "),
        ];
    }

    let mut hotkey_spans = vec![];

    // Navigation keys (different for vim mode)
    if vim_mode {
        hotkey_spans.extend(vec![
            key("jk"),
            Span::raw(":Nav  "),
            key("gg/G"),
            Span::raw(":First/Last  "),
            key("^d/^u"),
            Span::raw(":½Page  "),
        ]);
    } else {
        hotkey_spans.extend(vec![key("↑/↓"), Span::raw(":Nav  ")]);
    }

    hotkey_spans.extend(vec![
        key("Enter"),
        Span::raw(":Details  "),
        key("/"),
        Span::raw(":Search  "),
        key("s"),
        Span::raw(":Status  "),
        key("o"),
        Span::raw(":Sort  "),
        key("f"),
        Span::raw(":Favorite  "),
        key("Tab"),
        Span::raw(if on_favorites { ":Characters  " } else { ":Favorites  " }),
    ]);

    if has_error && !on_favorites {
        hotkey_spans.extend(vec![key("r"), Span::raw(":Retry  ")]);
    }

    hotkey_spans.extend(vec![key("q"), Span::raw(":Quit")]);
    hotkey_spans
}

pub fn render_legend(
    f: &mut Frame,
    area: Rect,
    vim_mode: bool,
    on_favorites: bool,
    search_mode: bool,
    has_error: bool,
) {
    let hotkey_line = Line::from(build_hotkey_spans(
        vim_mode,
        on_favorites,
        search_mode,
        has_error,
    ));

    let legend = Paragraph::new(vec![hotkey_line])
        .block(Block::default().borders(Borders::ALL).title(" Hotkeys "))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });

    f.render_widget(legend, area);
}

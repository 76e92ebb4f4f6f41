//! Keyboard Input Handler
//!
//! Translates key presses into model messages and UI state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use rmcat::logic;
use rmcat::messages::{CatalogMsg, DetailMsg, FavoritesMsg, Msg};
use rmcat::model::{ActiveView, DetailState, LoadState};

use crate::App;

const PAGE_STEP: usize = 10;

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.model.ui.should_quit = true;
        return Ok(());
    }

    // Detail popup captures input while open
    if app.model.detail.is_open() {
        handle_detail_key(app, key);
        return Ok(());
    }

    if app.model.ui.search_mode {
        handle_search_key(app, key);
        return Ok(());
    }

    let vim_mode = app.model.ui.vim_mode;
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') => app.model.ui.should_quit = true,

        KeyCode::Down => move_selection(app, Direction::Down(1)),
        KeyCode::Up => move_selection(app, Direction::Up(1)),
        KeyCode::Char('j') if vim_mode => move_selection(app, Direction::Down(1)),
        KeyCode::Char('k') if vim_mode => move_selection(app, Direction::Up(1)),
        KeyCode::PageDown => move_selection(app, Direction::Down(PAGE_STEP)),
        KeyCode::PageUp => move_selection(app, Direction::Up(PAGE_STEP)),
        KeyCode::Char('d') if vim_mode && ctrl => move_selection(app, Direction::Down(PAGE_STEP / 2)),
        KeyCode::Char('u') if vim_mode && ctrl => move_selection(app, Direction::Up(PAGE_STEP / 2)),
        KeyCode::Home => move_selection(app, Direction::First),
        KeyCode::End => move_selection(app, Direction::Last),
        KeyCode::Char('g') if vim_mode => move_selection(app, Direction::First),
        KeyCode::Char('G') if vim_mode => move_selection(app, Direction::Last),

        KeyCode::Char('f') if ctrl => app.model.ui.search_mode = true,
        KeyCode::Char('/') => app.model.ui.search_mode = true,

        KeyCode::Char('s') => cycle_status(app),
        KeyCode::Char('o') => cycle_sort(app),
        KeyCode::Char('f') => app.toggle_selected_favorite(),
        KeyCode::Tab => app.switch_view(),

        KeyCode::Char('r') => {
            if matches!(app.model.catalog.state(), LoadState::Error(_)) {
                app.model.ui.characters_selection = None;
                app.dispatch(Msg::Catalog(CatalogMsg::Retry));
            }
        }

        KeyCode::Enter => {
            if let Some(character) = app.model.selected_character() {
                app.dispatch(Msg::Detail(DetailMsg::Open(character.id)));
            }
        }

        // Esc clears an accepted search
        KeyCode::Esc => {
            if !current_search(app).is_empty() {
                set_search(app, String::new());
            }
        }

        _ => {}
    }

    Ok(())
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.dispatch(Msg::Detail(DetailMsg::Close));
        }
        KeyCode::Char('f') => {
            if let DetailState::Loaded(character) = app.model.detail.state() {
                let (id, name) = (character.id, character.name.clone());
                app.toggle_favorite(id, &name);
            }
        }
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.model.ui.search_mode = false;
            set_search(app, String::new());
        }
        KeyCode::Enter => app.model.ui.search_mode = false,
        KeyCode::Backspace => {
            let mut text = current_search(app).to_string();
            text.pop();
            set_search(app, text);
        }
        KeyCode::Char(c) => {
            let mut text = current_search(app).to_string();
            text.push(c);
            set_search(app, text);
        }
        _ => {}
    }
}

fn current_search(app: &App) -> &str {
    match app.model.ui.active_view {
        ActiveView::Characters => app.model.catalog.search_input(),
        ActiveView::Favorites => app.model.favorites.search_input(),
    }
}

fn set_search(app: &mut App, text: String) {
    let msg = match app.model.ui.active_view {
        ActiveView::Characters => Msg::Catalog(CatalogMsg::SearchInput(text)),
        ActiveView::Favorites => Msg::Favorites(FavoritesMsg::SearchInput(text)),
    };
    app.dispatch(msg);
}

fn cycle_status(app: &mut App) {
    let msg = match app.model.ui.active_view {
        ActiveView::Characters => {
            let next = logic::ui::cycle_status_filter(app.model.catalog.query().status);
            app.model.ui.characters_selection = None;
            Msg::Catalog(CatalogMsg::StatusChanged(next))
        }
        ActiveView::Favorites => {
            let next = logic::ui::cycle_status_filter(app.model.favorites.filter().status);
            Msg::Favorites(FavoritesMsg::StatusChanged(next))
        }
    };
    app.dispatch(msg);
}

fn cycle_sort(app: &mut App) {
    let msg = match app.model.ui.active_view {
        ActiveView::Characters => {
            Msg::Catalog(CatalogMsg::SortChanged(app.model.catalog.query().sort.cycle()))
        }
        ActiveView::Favorites => {
            Msg::Favorites(FavoritesMsg::SortChanged(app.model.favorites.sort().cycle()))
        }
    };
    app.dispatch(msg);
}

enum Direction {
    Down(usize),
    Up(usize),
    First,
    Last,
}

fn move_selection(app: &mut App, direction: Direction) {
    let len = app.model.visible_characters().len();
    let current = app.model.ui.selection();

    let next = match direction {
        Direction::Down(step) => logic::navigation::move_down(current, len, step),
        Direction::Up(step) => logic::navigation::move_up(current, len, step),
        Direction::First => (len > 0).then_some(0),
        Direction::Last => len.checked_sub(1),
    };
    app.model.ui.set_selection(next);

    // Infinite scroll: ask for the next page when close to the end
    if app.model.ui.active_view == ActiveView::Characters
        && logic::navigation::is_near_end(next, len, app.model.ui.scroll_threshold)
    {
        app.dispatch(Msg::Catalog(CatalogMsg::ScrollNearEnd));
    }
}

use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::Tabs,
    Frame,
};

use rmcat::logic::ui::status_filter_label;
use rmcat::model::{ActiveView, DetailState};

use crate::App;

use super::{character_list, detail, legend, search, status_bar, toast};

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();
    let model = &app.model;
    let on_favorites = model.ui.active_view == ActiveView::Favorites;

    let [tabs_area, search_area, list_area, status_area, legend_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(size);

    // Tabs
    let favorites_title = format!("Favorites ({})", model.favorites.ids().len());
    let tabs = Tabs::new(vec!["Characters".to_string(), favorites_title])
        .select(if on_favorites { 1 } else { 0 })
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, tabs_area);

    let characters = model.visible_characters();
    let selected = model.ui.selection();

    if on_favorites {
        let favorites = &model.favorites;
        search::render_search_input(
            f,
            search_area,
            favorites.search_input(),
            model.ui.search_mode,
            favorites.search_input().trim() != favorites.filter().search,
            model.ui.vim_mode,
        );
        character_list::render_character_list(
            f,
            list_area,
            "Favorites",
            &characters,
            selected,
            |id| app.is_favorite(id),
            favorites.empty_message(),
        );
        let filters = format!(
            "{} │ {}",
            status_filter_label(favorites.filter().status),
            favorites.sort().label()
        );
        status_bar::render_status_bar(
            f,
            status_area,
            status_bar::favorites_status(favorites.load_state()),
            &filters,
            characters.len(),
            None,
        );
    } else {
        let catalog = &model.catalog;
        search::render_search_input(
            f,
            search_area,
            catalog.search_input(),
            model.ui.search_mode,
            catalog.search_pending(),
            model.ui.vim_mode,
        );
        let placeholder = (!catalog.is_loading() && catalog.error_message().is_none())
            .then_some(("No characters found.", None));
        character_list::render_character_list(
            f,
            list_area,
            "Characters",
            &characters,
            selected,
            |id| app.is_favorite(id),
            placeholder,
        );
        let filters = format!(
            "{} │ {}",
            status_filter_label(catalog.query().status),
            catalog.query().sort.label()
        );
        let share_path = app.share_path();
        status_bar::render_status_bar(
            f,
            status_area,
            status_bar::catalog_status(catalog.state(), catalog.reached_end()),
            &filters,
            characters.len(),
            Some(&share_path),
        );
    }

    legend::render_legend(
        f,
        legend_area,
        model.ui.vim_mode,
        on_favorites,
        model.ui.search_mode,
        model.catalog.error_message().is_some(),
    );

    // Popups last so they draw on top
    detail::render_detail_popup(f, size, model.detail.state(), detail_is_favorite(app));

    if let Some((message, _)) = &model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}

fn detail_is_favorite(app: &App) -> bool {
    match app.model.detail.state() {
        DetailState::Loaded(character) => app.is_favorite(character.id),
        _ => false,
    }
}

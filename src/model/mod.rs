//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the application.
//! The Model is organized into focused sub-models:
//!
//! - **CatalogModel**: paginated character list (the sync engine)
//! - **FavoritesModel**: favorite characters with local search/filter/sort
//! - **DetailModel**: single character popup
//! - **UiModel**: active view, selection, toasts
//!
//! Key principles:
//! - No services: all I/O is requested through `Command`s
//! - Every change arrives as a `Msg`

pub mod catalog;
pub mod detail;
pub mod favorites;
pub mod types;
pub mod ui;

use std::time::Duration;

pub use catalog::{CatalogModel, FetchReason, LoadState};
pub use detail::{DetailModel, DetailState};
pub use favorites::{FavoritesLoad, FavoritesModel};
pub use types::*;
pub use ui::{ActiveView, UiModel};

use crate::api::Character;
use crate::messages::{Command, Msg};

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub catalog: CatalogModel,
    pub favorites: FavoritesModel,
    pub detail: DetailModel,
    pub ui: UiModel,
}

impl Model {
    pub fn new(
        query: QueryState,
        debounce_delay: Duration,
        vim_mode: bool,
        scroll_threshold: usize,
    ) -> Self {
        Self {
            catalog: CatalogModel::new(query, debounce_delay),
            favorites: FavoritesModel::new(debounce_delay),
            detail: DetailModel::default(),
            ui: UiModel::new(vim_mode, scroll_threshold),
        }
    }

    /// Route a message to its sub-model
    pub fn update(&mut self, msg: Msg) -> Vec<Command> {
        match msg {
            Msg::Catalog(msg) => self.catalog.update(msg),
            Msg::Favorites(msg) => self.favorites.update(msg),
            Msg::Detail(msg) => self.detail.update(msg),
        }
    }

    /// Characters in display order for the active view
    pub fn visible_characters(&self) -> Vec<Character> {
        match self.ui.active_view {
            ActiveView::Characters => self.catalog.visible(),
            ActiveView::Favorites => self.favorites.visible(),
        }
    }

    /// Currently selected character in the active view
    pub fn selected_character(&self) -> Option<Character> {
        let selected = self.ui.selection()?;
        self.visible_characters().into_iter().nth(selected)
    }
}

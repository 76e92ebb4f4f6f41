//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! active view, selection, input focus and transient messages.

use std::time::Instant;

/// Which list is on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveView {
    Characters,
    Favorites,
}

#[derive(Clone, Debug)]
pub struct UiModel {
    // ============================================
    // PREFERENCES
    // ============================================
    /// Whether vim keybindings are enabled
    pub vim_mode: bool,

    /// Rows from the end of the list that trigger loading the next page
    pub scroll_threshold: usize,

    // ============================================
    // VIEW STATE
    // ============================================
    pub active_view: ActiveView,

    /// Selected row in the characters list (index into the projected list)
    pub characters_selection: Option<usize>,

    /// Selected row in the favorites list
    pub favorites_selection: Option<usize>,

    // ============================================
    // SEARCH
    // ============================================
    /// Whether the search input is receiving keystrokes
    pub search_mode: bool,

    // ============================================
    // VISUAL STATE
    // ============================================
    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool, scroll_threshold: usize) -> Self {
        Self {
            vim_mode,
            scroll_threshold,
            active_view: ActiveView::Characters,
            characters_selection: None,
            favorites_selection: None,
            search_mode: false,
            toast_message: None,
            should_quit: false,
        }
    }

    /// Selection of the list currently on screen
    pub fn selection(&self) -> Option<usize> {
        match self.active_view {
            ActiveView::Characters => self.characters_selection,
            ActiveView::Favorites => self.favorites_selection,
        }
    }

    pub fn set_selection(&mut self, selection: Option<usize>) {
        match self.active_view {
            ActiveView::Characters => self.characters_selection = selection,
            ActiveView::Favorites => self.favorites_selection = selection,
        }
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    pub fn should_dismiss_toast(&self) -> bool {
        self.toast_message.as_ref().is_some_and(|(_, shown)| {
            crate::logic::ui::should_dismiss_toast(shown.elapsed().as_millis())
        })
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}

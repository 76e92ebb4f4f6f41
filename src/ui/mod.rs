// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - render: Main orchestration function that coordinates all rendering
// - character_list: Renders the characters / favorites list
// - detail: Renders the character detail popup
// - search: Renders search input box
// - status_bar: Renders load state, filters and the shareable path
// - legend: Renders hotkey legend
// - toast: Renders toast notifications (brief pop-up messages)

pub mod character_list;
pub mod detail;
pub mod legend;
pub mod render;
pub mod search;
pub mod status_bar;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;

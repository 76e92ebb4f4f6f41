//! UI state transition logic
//!
//! Pure functions for UI state cycling and transitions.

use crate::api::Status;

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u128 = 1500;

/// Cycle the status filter: All → Alive → Dead → Unknown → All
///
/// # Examples
/// ```
/// use rmcat::api::Status;
/// use rmcat::logic::ui::cycle_status_filter;
///
/// assert_eq!(cycle_status_filter(None), Some(Status::Alive));
/// assert_eq!(cycle_status_filter(Some(Status::Alive)), Some(Status::Dead));
/// assert_eq!(cycle_status_filter(Some(Status::Dead)), Some(Status::Unknown));
/// assert_eq!(cycle_status_filter(Some(Status::Unknown)), None);
/// ```
pub fn cycle_status_filter(current: Option<Status>) -> Option<Status> {
    match current {
        None => Some(Status::Alive),
        Some(Status::Alive) => Some(Status::Dead),
        Some(Status::Dead) => Some(Status::Unknown),
        Some(Status::Unknown) => None,
    }
}

/// Label for the status filter control
pub fn status_filter_label(current: Option<Status>) -> &'static str {
    current.map_or("All Status", |s| s.label())
}

/// Check if a toast shown `elapsed_ms` ago should be dismissed
pub fn should_dismiss_toast(elapsed_ms: u128) -> bool {
    elapsed_ms >= TOAST_DURATION_MS
}

/// Format the API's RFC 3339 `created` timestamp as a calendar date.
/// Unparseable input is shown as-is.
pub fn format_created(created: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(created) {
        Ok(dt) => dt.format("%b %-d, %Y").to_string(),
        Err(_) => created.to_string(),
    }
}

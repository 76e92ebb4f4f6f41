//! Navigation selection logic
//!
//! Pure functions for moving the selection through an incrementally loaded
//! list and deciding when the end is close enough to load more.

/// Move the selection down by `step`, clamping at the last item
///
/// The list grows as pages arrive, so the selection never wraps to the top.
/// If no item is selected, selects the first item.
///
/// # Examples
/// ```
/// use rmcat::logic::navigation::move_down;
///
/// assert_eq!(move_down(None, 0, 1), None);
/// assert_eq!(move_down(None, 3, 1), Some(0));
/// assert_eq!(move_down(Some(1), 3, 1), Some(2));
/// assert_eq!(move_down(Some(2), 3, 1), Some(2));
/// assert_eq!(move_down(Some(0), 20, 10), Some(10));
/// ```
pub fn move_down(current: Option<usize>, list_len: usize, step: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(i) => i.saturating_add(step).min(list_len - 1),
        None => 0,
    })
}

/// Move the selection up by `step`, clamping at the first item
///
/// # Examples
/// ```
/// use rmcat::logic::navigation::move_up;
///
/// assert_eq!(move_up(None, 0, 1), None);
/// assert_eq!(move_up(Some(2), 3, 1), Some(1));
/// assert_eq!(move_up(Some(0), 3, 1), Some(0));
/// assert_eq!(move_up(None, 3, 1), Some(0));
/// ```
pub fn move_up(current: Option<usize>, list_len: usize, step: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(i) => i.min(list_len - 1).saturating_sub(step),
        None => 0,
    })
}

/// Keep a selection valid after the list changed length
pub fn clamp_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }
    Some(current.unwrap_or(0).min(list_len - 1))
}

/// Whether the selection is within `threshold` rows of the end of the list
///
/// # Examples
/// ```
/// use rmcat::logic::navigation::is_near_end;
///
/// assert!(!is_near_end(Some(0), 20, 5));
/// assert!(is_near_end(Some(15), 20, 5));
/// assert!(is_near_end(Some(19), 20, 5));
/// assert!(!is_near_end(None, 0, 5));
/// ```
pub fn is_near_end(selected: Option<usize>, list_len: usize, threshold: usize) -> bool {
    if list_len == 0 {
        return false;
    }

    let selected = selected.unwrap_or(0);
    selected.saturating_add(threshold) >= list_len.saturating_sub(1)
}

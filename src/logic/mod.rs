//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - debounce: Timer tokens for debounced search input
//! - errors: Fetch error taxonomy and classification
//! - navigation: Selection movement and scroll-proximity detection
//! - projection: Sorting and client-side filtering of fetched characters
//! - ui: UI state transitions and cycling
//! - url_state: Query state <-> shareable URL parameters

pub mod debounce;
pub mod errors;
pub mod navigation;
pub mod projection;
pub mod ui;
pub mod url_state;

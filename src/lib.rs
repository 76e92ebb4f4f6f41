//! Rick and Morty catalog library
//!
//! Exposes the catalog client, state machines and pure logic for the
//! terminal front end and for testing.

pub mod api;
pub mod config;
pub mod favorites;
pub mod logic;
pub mod messages;
pub mod model;
pub mod services;
pub mod storage;
pub mod utils;

/// Client-side ordering applied to the fetched characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    None,         // Keep fetch order
    NameAsc,      // "name-asc"
    NameDesc,     // "name-desc"
    SpeciesAsc,   // "species-asc"
    SpeciesDesc,  // "species-desc"
}

impl SortKey {
    /// Value used in URL state
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::SpeciesAsc => "species-asc",
            SortKey::SpeciesDesc => "species-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::None => "Unsorted",
            SortKey::NameAsc => "Name (A-Z)",
            SortKey::NameDesc => "Name (Z-A)",
            SortKey::SpeciesAsc => "Species (A-Z)",
            SortKey::SpeciesDesc => "Species (Z-A)",
        }
    }

    /// Parse a sort key. Unrecognized values fall back to `SortKey::None`.
    pub fn parse(value: &str) -> SortKey {
        match value.trim().to_lowercase().as_str() {
            "name-asc" => SortKey::NameAsc,
            "name-desc" => SortKey::NameDesc,
            "species-asc" => SortKey::SpeciesAsc,
            "species-desc" => SortKey::SpeciesDesc,
            _ => SortKey::None,
        }
    }

    /// Next key in the cycle used by the sort hotkey
    pub fn cycle(&self) -> SortKey {
        match self {
            SortKey::None => SortKey::NameAsc,
            SortKey::NameAsc => SortKey::NameDesc,
            SortKey::NameDesc => SortKey::SpeciesAsc,
            SortKey::SpeciesAsc => SortKey::SpeciesDesc,
            SortKey::SpeciesDesc => SortKey::None,
        }
    }
}

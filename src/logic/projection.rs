//! View projection
//!
//! Pure functions that turn fetched characters into the ordered, filtered
//! list that gets rendered. Inputs are never mutated.

use std::cmp::Ordering;

use crate::api::{Character, Status};
use crate::SortKey;

/// Client-side filter used by the favorites view
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalFilter {
    pub search: String,
    pub status: Option<Status>,
}

impl LocalFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.status.is_some()
    }

    /// Case-insensitive substring on name, exact status match
    pub fn matches(&self, character: &Character) -> bool {
        let status_ok = self.status.map_or(true, |s| s == character.status);
        let query = self.search.trim().to_lowercase();
        let name_ok = query.is_empty() || character.name.to_lowercase().contains(&query);
        status_ok && name_ok
    }
}

/// Locale-style string ordering: case folded first, raw string second
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use rmcat::logic::projection::locale_compare;
///
/// assert_eq!(locale_compare("beth", "Rick"), Ordering::Less);
/// assert_eq!(locale_compare("Zeep", "abradolf"), Ordering::Greater);
/// ```
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Compare two characters for the given sort key
///
/// `SortKey::None` treats everything as equal so a stable sort keeps input order.
pub fn compare_characters(a: &Character, b: &Character, sort: SortKey) -> Ordering {
    match sort {
        SortKey::None => Ordering::Equal,
        SortKey::NameAsc => locale_compare(&a.name, &b.name),
        SortKey::NameDesc => locale_compare(&b.name, &a.name),
        SortKey::SpeciesAsc => locale_compare(&a.species, &b.species),
        SortKey::SpeciesDesc => locale_compare(&b.species, &a.species),
    }
}

/// Project fetched characters into display order
///
/// # Arguments
/// * `items` - Fetched characters in fetch order
/// * `sort` - Client-side ordering
/// * `filter` - Optional client-side filter (favorites view only)
///
/// # Returns
/// A new vector. Ties keep their relative input order.
pub fn project(items: &[Character], sort: SortKey, filter: Option<&LocalFilter>) -> Vec<Character> {
    let mut projected: Vec<Character> = items
        .iter()
        .filter(|c| filter.map_or(true, |f| f.matches(c)))
        .cloned()
        .collect();

    if sort != SortKey::None {
        projected.sort_by(|a, b| compare_characters(a, b, sort));
    }

    projected
}

/// Metadata line shown under a character name: species, gender, place
pub fn metadata_line(character: &Character) -> String {
    let place = if character.location.name.is_empty() {
        character.origin.name.as_str()
    } else {
        character.location.name.as_str()
    };

    [character.species.as_str(), character.gender.as_str(), place]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CharacterId, Location};

    fn make(id: CharacterId, name: &str, species: &str, status: Status) -> Character {
        Character {
            id,
            name: name.to_string(),
            status,
            species: species.to_string(),
            kind: String::new(),
            gender: String::new(),
            origin: Location::default(),
            location: Location::default(),
            image: String::new(),
            episode: vec![],
            url: String::new(),
            created: String::new(),
        }
    }

    fn names(items: &[Character]) -> Vec<&str> {
        items.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_name_desc_and_unsorted() {
        let items = vec![
            make(1, "Beth", "Human", Status::Alive),
            make(2, "Rick", "Human", Status::Alive),
        ];

        assert_eq!(names(&project(&items, SortKey::NameDesc, None)), vec!["Rick", "Beth"]);
        assert_eq!(names(&project(&items, SortKey::parse(""), None)), vec!["Beth", "Rick"]);
    }

    #[test]
    fn test_species_sort_is_stable_for_ties() {
        let items = vec![
            make(1, "Rick", "Human", Status::Alive),
            make(2, "Birdperson", "Bird-Person", Status::Dead),
            make(3, "Morty", "Human", Status::Alive),
            make(4, "Squanchy", "Cat-Person", Status::Unknown),
        ];

        let sorted = project(&items, SortKey::SpeciesAsc, None);
        assert_eq!(names(&sorted), vec!["Birdperson", "Squanchy", "Rick", "Morty"]);
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let items = vec![
            make(1, "zeep", "Alien", Status::Alive),
            make(2, "Abradolf", "Human", Status::Dead),
        ];
        assert_eq!(names(&project(&items, SortKey::NameAsc, None)), vec!["Abradolf", "zeep"]);
    }

    #[test]
    fn test_project_does_not_mutate_input() {
        let items = vec![
            make(1, "Rick", "Human", Status::Alive),
            make(2, "Beth", "Human", Status::Alive),
        ];
        let snapshot = items.clone();
        let _ = project(&items, SortKey::NameAsc, None);
        assert_eq!(items, snapshot);
    }

    #[test]
    fn test_local_filter_search_and_status() {
        let items = vec![
            make(1, "Rick Sanchez", "Human", Status::Alive),
            make(2, "Evil Rick", "Human", Status::Dead),
            make(3, "Morty Smith", "Human", Status::Alive),
        ];

        let filter = LocalFilter {
            search: "RICK".to_string(),
            status: Some(Status::Alive),
        };
        assert!(filter.is_active());
        assert_eq!(names(&project(&items, SortKey::None, Some(&filter))), vec!["Rick Sanchez"]);

        let inactive = LocalFilter::default();
        assert!(!inactive.is_active());
        assert_eq!(project(&items, SortKey::None, Some(&inactive)).len(), 3);
    }

    #[test]
    fn test_metadata_line_falls_back_to_origin() {
        let mut rick = make(1, "Rick", "Human", Status::Alive);
        rick.gender = "Male".to_string();
        rick.origin.name = "Earth (C-137)".to_string();
        assert_eq!(metadata_line(&rick), "Human • Male • Earth (C-137)");

        rick.location.name = "Citadel of Ricks".to_string();
        assert_eq!(metadata_line(&rick), "Human • Male • Citadel of Ricks");
    }
}

//! Favorites Model
//!
//! The favorites view loads its characters by id in one batch request and
//! applies search, status and sort locally over that batch. No paging.

use std::time::Duration;

use crate::api::{Character, CharacterId};
use crate::logic::debounce::Debouncer;
use crate::logic::errors::{user_message, FetchError};
use crate::logic::projection::{self, LocalFilter};
use crate::messages::{Command, DebounceTarget, FavoritesMsg, RequestId};
use crate::SortKey;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FavoritesLoad {
    Idle,
    Loading,
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct FavoritesModel {
    ids: Vec<CharacterId>,
    characters: Vec<Character>,
    load: FavoritesLoad,
    pending: Option<RequestId>,
    last_request_id: RequestId,

    filter: LocalFilter,
    sort: SortKey,
    search_input: String,
    debounce: Debouncer,
    debounce_delay: Duration,
}

impl FavoritesModel {
    pub fn new(debounce_delay: Duration) -> Self {
        Self {
            ids: Vec::new(),
            characters: Vec::new(),
            load: FavoritesLoad::Idle,
            pending: None,
            last_request_id: 0,
            filter: LocalFilter::default(),
            sort: SortKey::None,
            search_input: String::new(),
            debounce: Debouncer::new(),
            debounce_delay,
        }
    }

    pub fn ids(&self) -> &[CharacterId] {
        &self.ids
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn load_state(&self) -> &FavoritesLoad {
        &self.load
    }

    pub fn filter(&self) -> &LocalFilter {
        &self.filter
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Favorites after local filtering and sorting
    pub fn visible(&self) -> Vec<Character> {
        projection::project(&self.characters, self.sort, Some(&self.filter))
    }

    /// Placeholder text when nothing is listed, with an optional hint
    pub fn empty_message(&self) -> Option<(&'static str, Option<&'static str>)> {
        if self.ids.is_empty() {
            return Some(("No favorites yet.", None));
        }
        // A failed load is reported by the status bar, not as an empty list
        if self.load != FavoritesLoad::Idle || !self.visible().is_empty() {
            return None;
        }
        let hint = self
            .filter
            .is_active()
            .then_some("Try clearing search or filters.");
        Some(("No matching favorites.", hint))
    }

    pub fn update(&mut self, msg: FavoritesMsg) -> Vec<Command> {
        match msg {
            FavoritesMsg::FavoritesChanged(ids) => self.set_ids(ids),

            FavoritesMsg::SearchInput(text) => {
                self.search_input = text;
                let token = self.debounce.restart();
                vec![Command::StartTimer {
                    target: DebounceTarget::FavoritesSearch,
                    token,
                    delay: self.debounce_delay,
                }]
            }

            FavoritesMsg::DebounceElapsed { token } => {
                if self.debounce.fire(token) {
                    self.filter.search = self.search_input.trim().to_string();
                }
                Vec::new()
            }

            FavoritesMsg::StatusChanged(status) => {
                self.filter.status = status;
                Vec::new()
            }

            FavoritesMsg::SortChanged(sort) => {
                self.sort = sort;
                Vec::new()
            }

            FavoritesMsg::Loaded { request_id, items } => {
                if self.pending != Some(request_id) {
                    tracing::debug!(request_id, "discarding stale favorites load");
                    return Vec::new();
                }
                self.pending = None;
                self.characters = items;
                self.load = FavoritesLoad::Idle;
                Vec::new()
            }

            FavoritesMsg::LoadFailed { request_id, error } => {
                if self.pending != Some(request_id) {
                    return Vec::new();
                }
                self.pending = None;
                self.load = match error {
                    FetchError::Cancelled => FavoritesLoad::Idle,
                    other => FavoritesLoad::Failed(user_message(&other)),
                };
                Vec::new()
            }

            FavoritesMsg::Teardown => {
                self.pending = None;
                self.debounce.cancel();
                if self.load == FavoritesLoad::Loading {
                    self.load = FavoritesLoad::Idle;
                }
                vec![Command::CancelTimer {
                    target: DebounceTarget::FavoritesSearch,
                }]
            }
        }
    }

    fn set_ids(&mut self, ids: Vec<CharacterId>) -> Vec<Command> {
        self.ids = ids;

        if self.ids.is_empty() {
            self.characters.clear();
            self.pending = None;
            self.load = FavoritesLoad::Idle;
            return Vec::new();
        }

        // Removals only: drop locally, no round trip
        let all_loaded = self.pending.is_none()
            && self
                .ids
                .iter()
                .all(|id| self.characters.iter().any(|c| c.id == *id));
        if all_loaded {
            let ids = &self.ids;
            self.characters.retain(|c| ids.contains(&c.id));
            return Vec::new();
        }

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.pending = Some(request_id);
        self.load = FavoritesLoad::Loading;

        vec![Command::FetchByIds {
            request_id,
            ids: self.ids.clone(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Location, Status};

    fn character(id: CharacterId, name: &str, status: Status) -> Character {
        Character {
            id,
            name: name.to_string(),
            status,
            species: "Human".to_string(),
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

    fn loaded_model() -> FavoritesModel {
        let mut model = FavoritesModel::new(Duration::from_millis(500));
        let commands = model.update(FavoritesMsg::FavoritesChanged(vec![1, 2]));
        let [Command::FetchByIds { request_id, .. }] = commands[..] else {
            panic!("expected FetchByIds");
        };
        model.update(FavoritesMsg::Loaded {
            request_id,
            items: vec![
                character(1, "Rick Sanchez", Status::Alive),
                character(2, "Birdperson", Status::Dead),
            ],
        });
        model
    }

    #[test]
    fn test_empty_favorites_skip_request() {
        let mut model = FavoritesModel::new(Duration::from_millis(500));
        assert!(model.update(FavoritesMsg::FavoritesChanged(vec![])).is_empty());
        assert_eq!(model.empty_message(), Some(("No favorites yet.", None)));
    }

    #[test]
    fn test_removal_filters_locally() {
        let mut model = loaded_model();
        let commands = model.update(FavoritesMsg::FavoritesChanged(vec![2]));
        assert!(commands.is_empty());
        assert_eq!(model.characters().len(), 1);
        assert_eq!(model.characters()[0].id, 2);
    }

    #[test]
    fn test_addition_refetches() {
        let mut model = loaded_model();
        let commands = model.update(FavoritesMsg::FavoritesChanged(vec![1, 2, 3]));
        assert!(matches!(
            &commands[..],
            [Command::FetchByIds { ids, .. }] if ids == &vec![1, 2, 3]
        ));
        assert_eq!(model.load_state(), &FavoritesLoad::Loading);
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut model = FavoritesModel::new(Duration::from_millis(500));
        model.update(FavoritesMsg::FavoritesChanged(vec![1]));
        model.update(FavoritesMsg::FavoritesChanged(vec![1, 2]));

        // Response for the first request arrives late
        model.update(FavoritesMsg::Loaded {
            request_id: 1,
            items: vec![character(1, "Rick Sanchez", Status::Alive)],
        });
        assert!(model.characters().is_empty());
        assert_eq!(model.load_state(), &FavoritesLoad::Loading);
    }

    #[test]
    fn test_search_applies_after_debounce_only() {
        let mut model = loaded_model();
        let commands = model.update(FavoritesMsg::SearchInput("bird".to_string()));
        let [Command::StartTimer { token, .. }] = commands[..] else {
            panic!("expected StartTimer");
        };
        assert_eq!(model.visible().len(), 2);

        model.update(FavoritesMsg::DebounceElapsed { token });
        let visible = model.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Birdperson");
    }

    #[test]
    fn test_no_matching_favorites_message() {
        let mut model = loaded_model();
        model.update(FavoritesMsg::StatusChanged(Some(Status::Unknown)));
        assert_eq!(
            model.empty_message(),
            Some(("No matching favorites.", Some("Try clearing search or filters.")))
        );
    }

    #[test]
    fn test_failure_is_reported() {
        let mut model = FavoritesModel::new(Duration::from_millis(500));
        model.update(FavoritesMsg::FavoritesChanged(vec![9]));
        model.update(FavoritesMsg::LoadFailed {
            request_id: 1,
            error: FetchError::Network("timeout".to_string()),
        });
        assert!(matches!(model.load_state(), FavoritesLoad::Failed(_)));
        assert_eq!(model.empty_message(), None);
    }
}

//! Shared types for the Model
//!
//! These types are used across multiple sub-models and represent
//! fundamental domain concepts.

use std::collections::HashSet;

use crate::api::{Character, CharacterId, ListQuery, Status};
use crate::SortKey;

/// Ordered characters, unique by id, in first-seen order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemSet {
    items: Vec<Character>,
    ids: HashSet<CharacterId>,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a sequence, keeping the first occurrence of each id
    pub fn from_items(items: Vec<Character>) -> Self {
        let mut set = Self::new();
        set.append(items);
        set
    }

    /// Replace the whole set (reset fetch)
    pub fn replace(&mut self, items: Vec<Character>) {
        self.clear();
        self.append(items);
    }

    /// Merge a page at the end. Existing ids keep their position and entry.
    ///
    /// Returns the number of characters actually added.
    pub fn append(&mut self, items: Vec<Character>) -> usize {
        let before = self.items.len();
        for item in items {
            if self.ids.insert(item.id) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.ids.contains(&id)
    }

    pub fn as_slice(&self) -> &[Character] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pagination position: last page applied plus whether the server has more
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u32,
    pub has_more: bool,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page: 1,
            has_more: true,
        }
    }
}

impl PageCursor {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn next_page(&self) -> u32 {
        self.page + 1
    }

    /// Move to `page`. Never moves backwards.
    pub fn advance_to(&mut self, page: u32, has_more: bool) {
        self.page = self.page.max(page);
        self.has_more = has_more;
    }
}

/// Active {search, status, sort} tuple driving fetches and ordering
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryState {
    pub search: String,
    pub status: Option<Status>,
    pub sort: SortKey,
}

impl QueryState {
    /// Server request for the given page. Sort is client-only and not sent.
    pub fn list_query(&self, page: u32) -> ListQuery {
        let search = self.search.trim();
        ListQuery {
            page,
            name: (!search.is_empty()).then(|| search.to_string()),
            status: self.status,
            ..ListQuery::default()
        }
    }

    /// Whether switching to `other` changes what the server is asked for
    pub fn affects_server(&self, other: &QueryState) -> bool {
        self.search.trim() != other.search.trim() || self.status != other.status
    }
}

//! Catalog Model - list synchronization engine
//!
//! Owns the fetched character set, the page cursor and the single in-flight
//! list request. All inputs arrive as `CatalogMsg`; all side effects leave as
//! `Command`s.
//!
//! Invariants:
//! - at most one list request is in flight; issuing a new one cancels the old
//! - only the current request id may mutate items or cursor
//! - a search/status change clears items and resets the cursor before fetching
//! - sort changes never fetch

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::types::{ItemSet, PageCursor, QueryState};
use crate::api::{Character, CharacterPage, ListQuery};
use crate::logic::debounce::Debouncer;
use crate::logic::errors::{user_message, FetchError};
use crate::logic::projection;
use crate::messages::{CatalogMsg, Command, DebounceTarget, RequestId};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Why a list request was issued
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchReason {
    /// First page for a (new) query; replaces the item set
    Reset,
    /// Next page; merged into the item set
    Append,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Fetching(FetchReason),
    Error(String),
}

#[derive(Clone, Debug)]
struct InFlight {
    request_id: RequestId,
    query: ListQuery,
    reason: FetchReason,
    cancel: CancellationToken,
}

#[derive(Clone, Debug)]
pub struct CatalogModel {
    query: QueryState,
    items: ItemSet,
    cursor: PageCursor,
    state: LoadState,
    in_flight: Option<InFlight>,
    last_request_id: RequestId,

    /// Live search text; only committed to `query.search` after the debounce
    search_input: String,
    debounce: Debouncer,
    debounce_delay: Duration,
}

impl Default for CatalogModel {
    fn default() -> Self {
        Self::new(QueryState::default(), DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl CatalogModel {
    pub fn new(query: QueryState, debounce_delay: Duration) -> Self {
        Self {
            search_input: query.search.clone(),
            query,
            items: ItemSet::new(),
            cursor: PageCursor::default(),
            state: LoadState::Idle,
            in_flight: None,
            last_request_id: 0,
            debounce: Debouncer::new(),
            debounce_delay,
        }
    }

    // ============================================
    // ACCESSORS
    // ============================================

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Fetching(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Id of the request whose result would currently be accepted
    pub fn in_flight_request(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(|f| f.request_id)
    }

    /// Whether a search keystroke is waiting for the quiet interval
    pub fn search_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Everything has been loaded for the current query
    pub fn reached_end(&self) -> bool {
        !self.cursor.has_more && self.state == LoadState::Idle && !self.items.is_empty()
    }

    /// Display order for the current sort key
    pub fn visible(&self) -> Vec<Character> {
        projection::project(self.items.as_slice(), self.query.sort, None)
    }

    // ============================================
    // UPDATE
    // ============================================

    pub fn update(&mut self, msg: CatalogMsg) -> Vec<Command> {
        match msg {
            CatalogMsg::Mount => self.reset_and_fetch(),

            CatalogMsg::SearchInput(text) => {
                self.search_input = text;
                let token = self.debounce.restart();
                vec![Command::StartTimer {
                    target: DebounceTarget::CatalogSearch,
                    token,
                    delay: self.debounce_delay,
                }]
            }

            CatalogMsg::DebounceElapsed { token } => {
                if !self.debounce.fire(token) {
                    tracing::debug!(token, "ignoring stale search timer");
                    return Vec::new();
                }

                let next = QueryState {
                    search: self.search_input.trim().to_string(),
                    ..self.query.clone()
                };
                self.apply_query(next)
            }

            CatalogMsg::StatusChanged(status) => {
                let mut next = QueryState {
                    status,
                    ..self.query.clone()
                };

                // Typed-but-uncommitted text rides along with the status reset
                let mut commands = Vec::new();
                if self.debounce.is_pending() {
                    self.debounce.cancel();
                    next.search = self.search_input.trim().to_string();
                    commands.push(Command::CancelTimer {
                        target: DebounceTarget::CatalogSearch,
                    });
                }
                commands.extend(self.apply_query(next));
                commands
            }

            CatalogMsg::SortChanged(sort) => {
                self.query.sort = sort;
                Vec::new()
            }

            CatalogMsg::ScrollNearEnd => {
                if self.state != LoadState::Idle || !self.cursor.has_more {
                    return Vec::new();
                }
                let query = self.query.list_query(self.cursor.next_page());
                vec![self.start_fetch(FetchReason::Append, query)]
            }

            CatalogMsg::PageLoaded { request_id, page } => self.apply_page(request_id, page),

            CatalogMsg::PageFailed { request_id, error } => self.apply_failure(request_id, error),

            CatalogMsg::Retry => {
                if !matches!(self.state, LoadState::Error(_)) {
                    return Vec::new();
                }
                self.reset_and_fetch()
            }

            CatalogMsg::Teardown => {
                self.cancel_in_flight();
                self.debounce.cancel();
                self.items.clear();
                self.cursor.reset();
                self.state = LoadState::Idle;
                vec![Command::CancelTimer {
                    target: DebounceTarget::CatalogSearch,
                }]
            }
        }
    }

    /// Switch to `next`, refetching from page 1 only if the server query changed
    fn apply_query(&mut self, next: QueryState) -> Vec<Command> {
        let refetch = self.query.affects_server(&next);
        self.query = next;
        if !refetch {
            return Vec::new();
        }
        self.reset_and_fetch()
    }

    fn reset_and_fetch(&mut self) -> Vec<Command> {
        self.cancel_in_flight();
        self.items.clear();
        self.cursor.reset();
        let query = self.query.list_query(1);
        vec![self.start_fetch(FetchReason::Reset, query)]
    }

    fn start_fetch(&mut self, reason: FetchReason, query: ListQuery) -> Command {
        self.cancel_in_flight();

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        let cancel = CancellationToken::new();

        tracing::debug!(request_id, page = query.page, ?reason, "issuing list request");

        self.in_flight = Some(InFlight {
            request_id,
            query: query.clone(),
            reason,
            cancel: cancel.clone(),
        });
        self.state = LoadState::Fetching(reason);

        Command::FetchPage {
            request_id,
            query,
            cancel,
        }
    }

    fn cancel_in_flight(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            tracing::debug!(request_id = previous.request_id, "cancelling superseded request");
            previous.cancel.cancel();
        }
    }

    /// Take the in-flight entry if `request_id` is the current request
    fn take_current(&mut self, request_id: RequestId) -> Option<InFlight> {
        match &self.in_flight {
            Some(current) if current.request_id == request_id => self.in_flight.take(),
            _ => {
                tracing::debug!(request_id, "discarding result of superseded request");
                None
            }
        }
    }

    fn apply_page(&mut self, request_id: RequestId, page: CharacterPage) -> Vec<Command> {
        let Some(finished) = self.take_current(request_id) else {
            return Vec::new();
        };

        match finished.reason {
            FetchReason::Reset => {
                self.items.replace(page.items);
                self.cursor.reset();
                self.cursor.advance_to(finished.query.page, page.has_more);
            }
            FetchReason::Append => {
                let added = self.items.append(page.items);
                tracing::debug!(request_id, added, total = self.items.len(), "merged page");
                self.cursor.advance_to(finished.query.page, page.has_more);
            }
        }

        self.state = LoadState::Idle;
        Vec::new()
    }

    fn apply_failure(&mut self, request_id: RequestId, error: FetchError) -> Vec<Command> {
        if self.take_current(request_id).is_none() {
            return Vec::new();
        }

        if error.is_cancelled() {
            self.state = LoadState::Idle;
        } else {
            tracing::debug!(request_id, %error, "list request failed");
            self.state = LoadState::Error(user_message(&error));
        }
        Vec::new()
    }
}

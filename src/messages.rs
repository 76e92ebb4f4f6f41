//! Message and command types for the Elm Architecture pattern
//!
//! Every state change flows through a message. Sub-models consume messages in
//! `update` and answer with commands; the runtime executes the commands and
//! feeds their outcomes back as new messages.
//!
//! Message sources:
//! - User input (keyboard handlers translate keys into messages)
//! - Fetch completions (from the command runner)
//! - Debounce timers (from the command runner)

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::{Character, CharacterId, CharacterPage, ListQuery, Status};
use crate::logic::errors::FetchError;
use crate::SortKey;

/// Identifies one issued request so stale completions can be dropped
pub type RequestId = u64;

/// Identifies one debounce timer start
pub type TimerToken = u64;

/// Which debounced input a timer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebounceTarget {
    CatalogSearch,
    FavoritesSearch,
}

impl DebounceTarget {
    /// Message delivered when this target's timer elapses
    pub fn elapsed(self, token: TimerToken) -> Msg {
        match self {
            DebounceTarget::CatalogSearch => Msg::Catalog(CatalogMsg::DebounceElapsed { token }),
            DebounceTarget::FavoritesSearch => {
                Msg::Favorites(FavoritesMsg::DebounceElapsed { token })
            }
        }
    }
}

/// Messages for the list synchronization engine
#[derive(Debug, Clone)]
pub enum CatalogMsg {
    /// View mounted: load the first page for the current query
    Mount,

    /// Raw search text changed (debounced before it affects the query)
    SearchInput(String),

    /// A search debounce timer elapsed
    DebounceElapsed { token: TimerToken },

    /// Status filter changed (server-side)
    StatusChanged(Option<Status>),

    /// Sort key changed (client-side only)
    SortChanged(SortKey),

    /// Selection came close to the end of the loaded list
    ScrollNearEnd,

    /// A list page arrived
    PageLoaded {
        request_id: RequestId,
        page: CharacterPage,
    },

    /// A list request failed or was cancelled
    PageFailed {
        request_id: RequestId,
        error: FetchError,
    },

    /// User asked to retry after an error
    Retry,

    /// View torn down: cancel everything pending
    Teardown,
}

/// Messages for the favorites view
#[derive(Debug, Clone)]
pub enum FavoritesMsg {
    /// The persisted favorite ids changed (or were loaded at startup)
    FavoritesChanged(Vec<CharacterId>),

    SearchInput(String),

    DebounceElapsed { token: TimerToken },

    StatusChanged(Option<Status>),

    SortChanged(SortKey),

    Loaded {
        request_id: RequestId,
        items: Vec<Character>,
    },

    LoadFailed {
        request_id: RequestId,
        error: FetchError,
    },

    Teardown,
}

/// Messages for the detail popup
#[derive(Debug, Clone)]
pub enum DetailMsg {
    Open(CharacterId),

    Loaded {
        request_id: RequestId,
        character: Character,
    },

    Failed {
        request_id: RequestId,
        error: FetchError,
    },

    Close,
}

/// Unified message type routed by `Model::update`
#[derive(Debug, Clone)]
pub enum Msg {
    Catalog(CatalogMsg),
    Favorites(FavoritesMsg),
    Detail(DetailMsg),
}

impl Msg {
    pub fn page_result(request_id: RequestId, result: Result<CharacterPage, FetchError>) -> Self {
        Msg::Catalog(match result {
            Ok(page) => CatalogMsg::PageLoaded { request_id, page },
            Err(error) => CatalogMsg::PageFailed { request_id, error },
        })
    }

    pub fn favorites_result(
        request_id: RequestId,
        result: Result<Vec<Character>, FetchError>,
    ) -> Self {
        Msg::Favorites(match result {
            Ok(items) => FavoritesMsg::Loaded { request_id, items },
            Err(error) => FavoritesMsg::LoadFailed { request_id, error },
        })
    }

    pub fn detail_result(request_id: RequestId, result: Result<Character, FetchError>) -> Self {
        Msg::Detail(match result {
            Ok(character) => DetailMsg::Loaded {
                request_id,
                character,
            },
            Err(error) => DetailMsg::Failed { request_id, error },
        })
    }
}

/// Side effects requested by the models
#[derive(Debug, Clone)]
pub enum Command {
    /// Fetch one list page; the token fires when the request is superseded
    FetchPage {
        request_id: RequestId,
        query: ListQuery,
        cancel: CancellationToken,
    },

    /// Fetch favorite characters by id
    FetchByIds {
        request_id: RequestId,
        ids: Vec<CharacterId>,
    },

    /// Fetch one character for the detail popup
    FetchCharacter {
        request_id: RequestId,
        id: CharacterId,
    },

    /// (Re)start a debounce timer, replacing any running one for the target
    StartTimer {
        target: DebounceTarget,
        token: TimerToken,
        delay: Duration,
    },

    /// Drop the running timer for the target
    CancelTimer { target: DebounceTarget },
}

//! Detail Model
//!
//! State of the character detail popup, loaded by id.

use crate::api::{Character, CharacterId};
use crate::logic::errors::{user_message, FetchError};
use crate::messages::{Command, DetailMsg, RequestId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailState {
    Closed,
    Loading(CharacterId),
    Loaded(Box<Character>),
    NotFound(CharacterId),
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct DetailModel {
    state: DetailState,
    pending: Option<(RequestId, CharacterId)>,
    last_request_id: RequestId,
}

impl Default for DetailModel {
    fn default() -> Self {
        Self {
            state: DetailState::Closed,
            pending: None,
            last_request_id: 0,
        }
    }
}

impl DetailModel {
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DetailState::Closed
    }

    pub fn update(&mut self, msg: DetailMsg) -> Vec<Command> {
        match msg {
            DetailMsg::Open(id) => {
                self.last_request_id += 1;
                let request_id = self.last_request_id;
                self.pending = Some((request_id, id));
                self.state = DetailState::Loading(id);
                vec![Command::FetchCharacter { request_id, id }]
            }

            DetailMsg::Loaded {
                request_id,
                character,
            } => {
                if self.take_pending(request_id).is_some() {
                    self.state = DetailState::Loaded(Box::new(character));
                }
                Vec::new()
            }

            DetailMsg::Failed { request_id, error } => {
                let Some(id) = self.take_pending(request_id) else {
                    return Vec::new();
                };
                self.state = match error {
                    FetchError::NotFound => DetailState::NotFound(id),
                    FetchError::Cancelled => DetailState::Closed,
                    other => DetailState::Failed(user_message(&other)),
                };
                Vec::new()
            }

            DetailMsg::Close => {
                self.pending = None;
                self.state = DetailState::Closed;
                Vec::new()
            }
        }
    }

    fn take_pending(&mut self, request_id: RequestId) -> Option<CharacterId> {
        match self.pending {
            Some((current, id)) if current == request_id => {
                self.pending = None;
                Some(id)
            }
            _ => {
                tracing::debug!(request_id, "discarding stale detail response");
                None
            }
        }
    }
}

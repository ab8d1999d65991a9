use crate::citizens::CitizenId;
use crate::tokens::Token;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Resolver;

/// Token-addressed registry of requests and the resolver chain serving them.
///
/// The manager is the only mutator of request state. Requests are indexed by
/// token, every requester owns the ordered list of its open request tokens.
/// Terminal requests (received or cancelled) are detached and dropped.
#[derive(Default)]
pub struct RequestManager {
    pub(crate) requests: HashMap<Token, Request>,
    pub(crate) owners: HashMap<Token, Vec<Token>>,
    pub(crate) resolvers: Vec<Box<dyn Resolver>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PayloadKind {
    Tool,
    Stack,
    Deliverable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    Tool { class: String, min_level: u8 },
    Stack { item: String, count: u32 },
    Deliverable { name: String },
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Tool { .. } => PayloadKind::Tool,
            Payload::Stack { .. } => PayloadKind::Stack,
            Payload::Deliverable { .. } => PayloadKind::Deliverable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestState {
    Created,
    Assigned,
    InProgress,
    Completed,
    Received,
    Cancelled,
}

impl RequestState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Received | RequestState::Cancelled)
    }

    /// Position in the forward chain, cancellation stands outside of it.
    fn stage(&self) -> Option<u8> {
        match self {
            RequestState::Created => Some(0),
            RequestState::Assigned => Some(1),
            RequestState::InProgress => Some(2),
            RequestState::Completed => Some(3),
            RequestState::Received => Some(4),
            RequestState::Cancelled => None,
        }
    }

    pub fn can_advance_to(&self, next: RequestState) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.stage(), next.stage()) {
            (Some(current), Some(next)) => next == current + 1,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub token: Token,
    pub requester: Token,
    pub citizen: Option<CitizenId>,
    pub payload: Payload,
    pub resolver: Option<String>,
    pub state: RequestState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Requesting {
    RequestCreated {
        request: Token,
        requester: Token,
        kind: PayloadKind,
    },
    RequestAssigned {
        request: Token,
        resolver: String,
    },
    RequestStateChanged {
        request: Token,
        state: RequestState,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RequestingError {
    UnresolvableRequestKind { kind: PayloadKind },
    InvalidArgument { request: Token, reason: String },
    RequestAlreadyExists { request: Token },
}

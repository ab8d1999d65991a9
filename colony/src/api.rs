use crate::building::{BuildingError, Buildings};
use crate::citizens::{Citizens, CitizensError};
use crate::math::Position;
use crate::permissions::{Action, Administration, PermissionsError, Rank};
use crate::replication::ColonyMessage;
use crate::requesting::{Requesting, RequestingError};
use crate::tokens::Token;
use crate::working::{Working, WorkingError};
use serde::{Deserialize, Serialize};

pub const API_VERSION: &str = "0.1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoginResult {
    Success,
    VersionMismatch,
    InvalidPassword,
}

/// Intents of remote observers, the authority validates and may reject each one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObserverRequest {
    Login {
        version: String,
        player: String,
        password: Option<String>,
    },
    Heartbeat,
    Subscribe {
        colony: Token,
    },
    Unsubscribe {
        colony: Token,
    },
    MarkBuildingDirty {
        colony: Token,
        position: Position,
        dimension: i32,
    },
    Rename {
        colony: Token,
        name: String,
    },
    SetPermission {
        colony: Token,
        rank: Rank,
        action: Action,
    },
    RemovePermission {
        colony: Token,
        rank: Rank,
        action: Action,
    },
    TogglePermission {
        colony: Token,
        rank: Rank,
        action: Action,
    },
    AddPlayer {
        colony: Token,
        player: String,
        rank: Rank,
    },
    RemovePlayer {
        colony: Token,
        player: String,
    },
    MarkRequestAsAccepted {
        colony: Token,
        requester: Token,
        request: Token,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AuthorityResponse {
    Login { result: LoginResult },
    Message { message: ColonyMessage },
    Rejected { error: ColonyError },
}

/// Colony level facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Settlement {
    ColonyFounded {
        colony: Token,
        name: String,
        owner: String,
    },
    ColonyDeleted {
        colony: Token,
    },
    ColonyRenamed {
        colony: Token,
        name: String,
    },
    ManualHiringChanged {
        manual_hiring: bool,
    },
    MaxCitizensChanged {
        max_citizens: usize,
    },
    HappinessChanged {
        happiness: f64,
    },
    AchievementTriggered {
        achievement: String,
    },
    FreeInteractionChanged {
        positions: usize,
        blocks: usize,
    },
    ObserverSubscribed {
        player: String,
    },
    ObserverUnsubscribed {
        player: String,
    },
    BuildingMarkedDirty {
        position: Position,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Settlement(Vec<Settlement>),
    Requesting(Vec<Requesting>),
    Working(Vec<Working>),
    Buildings(Vec<Buildings>),
    Citizens(Vec<Citizens>),
    Administration(Vec<Administration>),
}

impl Event {
    pub fn is_empty(&self) -> bool {
        match self {
            Event::Settlement(events) => events.is_empty(),
            Event::Requesting(events) => events.is_empty(),
            Event::Working(events) => events.is_empty(),
            Event::Buildings(events) => events.is_empty(),
            Event::Citizens(events) => events.is_empty(),
            Event::Administration(events) => events.is_empty(),
        }
    }
}

impl From<Vec<Settlement>> for Event {
    fn from(events: Vec<Settlement>) -> Self {
        Self::Settlement(events)
    }
}

impl From<Vec<Requesting>> for Event {
    fn from(events: Vec<Requesting>) -> Self {
        Self::Requesting(events)
    }
}

impl From<Vec<Working>> for Event {
    fn from(events: Vec<Working>) -> Self {
        Self::Working(events)
    }
}

impl From<Vec<Buildings>> for Event {
    fn from(events: Vec<Buildings>) -> Self {
        Self::Buildings(events)
    }
}

impl From<Vec<Citizens>> for Event {
    fn from(events: Vec<Citizens>) -> Self {
        Self::Citizens(events)
    }
}

impl From<Vec<Administration>> for Event {
    fn from(events: Vec<Administration>) -> Self {
        Self::Administration(events)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColonyError {
    Requesting(RequestingError),
    Working(WorkingError),
    Building(BuildingError),
    Citizens(CitizensError),
    Permissions(PermissionsError),
    ColonyNotFound { colony: Token },
    OwnerHasColony { owner: String, colony: Token },
    PermissionDenied { player: String, action: Action },
    NotSubscribed { player: String, colony: Token },
}

impl From<RequestingError> for ColonyError {
    fn from(error: RequestingError) -> Self {
        Self::Requesting(error)
    }
}

impl From<WorkingError> for ColonyError {
    fn from(error: WorkingError) -> Self {
        Self::Working(error)
    }
}

impl From<BuildingError> for ColonyError {
    fn from(error: BuildingError) -> Self {
        Self::Building(error)
    }
}

impl From<CitizensError> for ColonyError {
    fn from(error: CitizensError) -> Self {
        Self::Citizens(error)
    }
}

impl From<PermissionsError> for ColonyError {
    fn from(error: PermissionsError) -> Self {
        Self::Permissions(error)
    }
}

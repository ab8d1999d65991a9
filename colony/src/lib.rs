use std::collections::BTreeSet;

pub use domains::*;

use crate::building::BuildingDomain;
use crate::citizens::{CitizensDomain, DEFAULT_HAPPINESS};
use crate::math::Position;
use crate::permissions::Permissions;
use crate::replication::{ColonyMessage, Subscribers};
use crate::requesting::RequestManager;
use crate::tokens::{Token, TokenFactory};
use crate::working::{Notice, WorkOrderId, WorkingDomain};

mod actions;
pub mod api;
pub mod collections;
pub mod commands;
mod domains;
pub mod manager;
pub mod math;
pub mod persistence;
pub mod replication;
pub mod structures;
pub mod tokens;
mod update;
pub mod view;

/// Collects domain events into `Vec<Event>`, dropping empty batches.
#[macro_export]
macro_rules! occur {
    ($($events:expr),* $(,)?) => {{
        let events: Vec<$crate::api::Event> = vec![$($events.into()),*];
        events
            .into_iter()
            .filter(|event| !event.is_empty())
            .collect::<Vec<$crate::api::Event>>()
    }};
}

/// Authoritative aggregate of one settlement.
///
/// The colony is the sole mutator of its buildings, citizens and work orders.
/// Every mutation entry point returns the events it caused and flags touched
/// entities dirty, the next synchronization pass batches them to observers.
pub struct Colony {
    pub id: Token,
    pub name: String,
    pub dimension: i32,
    pub center: Position,
    pub manual_hiring: bool,
    pub max_citizens: usize,
    pub happiness: f64,
    pub achievements: Vec<String>,
    pub free_positions: BTreeSet<Position>,
    pub free_blocks: BTreeSet<String>,
    pub buildings: BuildingDomain,
    pub citizens: CitizensDomain,
    pub working: WorkingDomain,
    pub requesting: RequestManager,
    pub permissions: Permissions,
    pub tokens: TokenFactory,
    pub(crate) subscribers: Subscribers,
    pub(crate) fields_dirty: bool,
    pub(crate) permissions_dirty: bool,
    pub(crate) removals: Vec<ColonyMessage>,
    pub(crate) notices: Vec<(WorkOrderId, Notice)>,
}

impl Colony {
    pub fn new(id: Token, name: &str, owner: &str, dimension: i32, center: Position) -> Self {
        Self {
            id,
            name: name.to_string(),
            dimension,
            center,
            manual_hiring: false,
            max_citizens: 0,
            happiness: DEFAULT_HAPPINESS,
            achievements: vec![],
            free_positions: BTreeSet::new(),
            free_blocks: BTreeSet::new(),
            buildings: BuildingDomain::default(),
            citizens: CitizensDomain::default(),
            working: WorkingDomain::default(),
            requesting: RequestManager::default(),
            permissions: Permissions::new(owner),
            tokens: TokenFactory::default(),
            subscribers: Subscribers::default(),
            fields_dirty: true,
            permissions_dirty: true,
            removals: vec![],
            notices: vec![],
        }
    }

    pub fn owner(&self) -> Option<&str> {
        self.permissions.owner()
    }
}

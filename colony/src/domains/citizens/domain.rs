use crate::collections::Sequence;
use crate::math::Position;
use crate::working::WorkOrderId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Default)]
pub struct CitizensDomain {
    pub citizens_id: Sequence,
    pub citizens: BTreeMap<CitizenId, Citizen>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CitizenId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Job {
    Builder { work_order: Option<WorkOrderId> },
}

impl Job {
    pub fn builder() -> Self {
        Job::Builder { work_order: None }
    }

    #[inline]
    pub fn work_order(&self) -> Option<WorkOrderId> {
        match self {
            Job::Builder { work_order } => *work_order,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Citizen {
    pub id: CitizenId,
    pub name: String,
    pub job: Option<Job>,
    pub work_building: Option<Position>,
    pub home_building: Option<Position>,
    pub realized: bool,
    pub happiness: f64,
    pub dirty: bool,
}

impl Citizen {
    pub fn new(id: CitizenId, name: String) -> Self {
        Self {
            id,
            name,
            job: None,
            work_building: None,
            home_building: None,
            realized: false,
            happiness: DEFAULT_HAPPINESS,
            dirty: true,
        }
    }

    /// Citizen holding builder job at some work building.
    pub fn builder_hut(&self) -> Option<Position> {
        match self.job {
            Some(Job::Builder { .. }) => self.work_building,
            None => None,
        }
    }
}

pub const DEFAULT_HAPPINESS: f64 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Citizens {
    CitizenAdded {
        id: CitizenId,
        name: String,
    },
    CitizenRemoved {
        id: CitizenId,
    },
    CitizenRealized {
        id: CitizenId,
    },
    JobChanged {
        id: CitizenId,
        job: Option<Job>,
        work_building: Option<Position>,
    },
    HomeChanged {
        id: CitizenId,
        home: Option<Position>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CitizensError {
    CitizenNotFound { id: CitizenId },
    CitizenHasNoJob { id: CitizenId },
    CitizenBusy { id: CitizenId, work_order: WorkOrderId },
}

use crate::citizens::CitizenId;
use crate::math::Position;
use crate::tokens::Token;
use crate::working::WorkOrderId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Default)]
pub struct BuildingDomain {
    pub buildings: BTreeMap<Position, Building>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    TownHall,
    Home { residents: Vec<CitizenId> },
    Builder,
    Workshop { schematic: String },
}

#[derive(Debug, Clone)]
pub struct Building {
    pub id: Token,
    pub position: Position,
    pub role: Role,
    pub level: u8,
    pub rotation: u8,
    pub mirrored: bool,
    pub style: String,
    pub work_order: Option<WorkOrderId>,
    pub repairing: bool,
    pub containers: Vec<Position>,
    pub dirty: bool,
}

impl Building {
    #[inline]
    pub fn residents(&self) -> &[CitizenId] {
        match &self.role {
            Role::Home { residents } => residents,
            _ => &[],
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self.role, Role::Home { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Buildings {
    BuildingPlaced {
        id: Token,
        position: Position,
        level: u8,
    },
    BuildingLevelChanged {
        position: Position,
        level: u8,
    },
    BuildingWorkOrderChanged {
        position: Position,
        work_order: Option<WorkOrderId>,
        repairing: bool,
    },
    ResidentsChanged {
        position: Position,
        residents: Vec<CitizenId>,
    },
    BuildingRemoved {
        id: Token,
        position: Position,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BuildingError {
    BuildingNotFound { position: Position },
    PositionOccupied { position: Position },
    MaxLevelReached { position: Position, level: u8 },
    WorkOrderPending { position: Position, work_order: WorkOrderId },
    NothingToRepair { position: Position },
    InvalidRotation { rotation: u8 },
    NotHome { position: Position },
    HomeIsFull { position: Position },
    NotWorkplace { position: Position },
    TownHallExists { position: Position },
}

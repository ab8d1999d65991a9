use crate::citizens::CitizenId;
use crate::collections::Sequence;
use crate::math::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

#[derive(Default)]
pub struct WorkingDomain {
    pub work_orders_id: Sequence,
    pub work_orders: BTreeMap<WorkOrderId, WorkOrder>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct WorkOrderId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkOrderKind {
    Build,
    Repair,
    Decoration,
}

impl WorkOrderKind {
    pub fn code(&self) -> &'static str {
        match self {
            WorkOrderKind::Build => "build",
            WorkOrderKind::Repair => "repair",
            WorkOrderKind::Decoration => "decoration",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "build" => Some(WorkOrderKind::Build),
            "repair" => Some(WorkOrderKind::Repair),
            "decoration" => Some(WorkOrderKind::Decoration),
            _ => None,
        }
    }
}

/// Upgrade target of build and repair orders, decorations have none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
    pub level: u8,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct WorkOrder {
    pub id: WorkOrderId,
    pub kind: WorkOrderKind,
    pub building: Position,
    pub upgrade: Option<Upgrade>,
    pub name: String,
    pub structure_name: String,
    pub structure_hash: String,
    pub rotation: u8,
    pub mirrored: bool,
    pub cleared: bool,
    pub requested: bool,
    pub claimed_by: Option<CitizenId>,
    pub notified: bool,
    pub dirty: bool,
}

impl WorkOrder {
    #[inline]
    pub fn level(&self) -> u8 {
        self.upgrade.as_ref().map(|upgrade| upgrade.level).unwrap_or(0)
    }

    #[inline]
    pub fn is_claimed(&self) -> bool {
        self.claimed_by.is_some()
    }
}

/// Player facing message about an order nobody can take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    NoBuilder,
    BuilderLevelTooLow { level: u8 },
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::NoBuilder => write!(f, "Build a builder's hut to start working on this order."),
            Notice::BuilderLevelTooLow { level } => {
                write!(f, "This order needs a builder's hut of level {}.", level)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Working {
    WorkOrderCreated {
        id: WorkOrderId,
        kind: WorkOrderKind,
        building: Position,
        level: u8,
    },
    WorkOrderClaimed {
        id: WorkOrderId,
        citizen: CitizenId,
    },
    WorkOrderReleased {
        id: WorkOrderId,
    },
    WorkOrderRequested {
        id: WorkOrderId,
    },
    WorkOrderRemoved {
        id: WorkOrderId,
    },
    NoticeIssued {
        id: WorkOrderId,
        notice: Notice,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkingError {
    WorkOrderNotFound { id: WorkOrderId },
    DuplicateWorkOrder { building: Position, level: u8 },
    WorkOrderAlreadyClaimed { id: WorkOrderId, citizen: CitizenId },
}

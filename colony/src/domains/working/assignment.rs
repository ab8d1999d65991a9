use crate::citizens::CitizenId;
use crate::math::Position;
use crate::working::WorkOrder;

/// Builder citizen snapshot taken for one assignment pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Worker {
    pub citizen: CitizenId,
    pub work_building: Position,
    pub building_level: u8,
    pub building_max_level: bool,
    pub busy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Assignment {
    Claimed { citizen: CitizenId },
    NoBuilder,
    LevelTooLow { level: u8 },
    /// Capable worker exists but holds another order.
    Waiting,
}

pub fn is_eligible(order: &WorkOrder, worker: &Worker, town_hall: Option<Position>) -> bool {
    worker.building_level >= order.level()
        || worker.building_max_level
        || order.building == worker.work_building
        || Some(order.building) == town_hall
}

/// Picks first eligible idle worker in the given order.
///
/// Busy workers never change order state. Any eligible worker, even busy one,
/// suppresses the notice: the order simply waits for the next pass.
pub fn assign(order: &WorkOrder, workers: &[Worker], town_hall: Option<Position>) -> Assignment {
    if workers.is_empty() {
        return Assignment::NoBuilder;
    }
    let mut capable = false;
    for worker in workers {
        if !is_eligible(order, worker, town_hall) {
            continue;
        }
        capable = true;
        if worker.busy {
            continue;
        }
        return Assignment::Claimed {
            citizen: worker.citizen,
        };
    }
    if capable {
        Assignment::Waiting
    } else {
        Assignment::LevelTooLow {
            level: order.level(),
        }
    }
}

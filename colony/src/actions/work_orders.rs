use log::{info, warn};

use crate::api::{ColonyError, Event};
use crate::replication::ColonyMessage;
use crate::working::{WorkOrder, WorkOrderId, WorkOrderKind};
use crate::{occur, Colony};

impl Colony {
    /// Finishes order: builder released, order removed, building advanced.
    pub fn complete_work_order(&mut self, id: WorkOrderId) -> Result<Vec<Event>, ColonyError> {
        let (order, mut events) = self.dismiss_work_order(id)?;
        if order.kind == WorkOrderKind::Decoration {
            return Ok(events);
        }
        if self.buildings.get_building(order.building).is_err() {
            warn!(
                "Work order {:?} completed but building {} vanished",
                id, order.building
            );
            return Ok(events);
        }
        if order.kind == WorkOrderKind::Build {
            events.extend(self.on_upgrade_complete(order.building, order.level())?);
        } else {
            let mark = self
                .buildings
                .change_work_order(order.building, None, false)?;
            events.extend(occur![mark()]);
        }
        info!("Work order {:?} at {} completed", id, order.building);
        Ok(events)
    }

    pub fn cancel_work_order(&mut self, id: WorkOrderId) -> Result<Vec<Event>, ColonyError> {
        let (order, mut events) = self.dismiss_work_order(id)?;
        let pending = self
            .buildings
            .get_building(order.building)
            .map(|building| building.work_order == Some(id))
            .unwrap_or(false);
        if pending {
            let mark = self
                .buildings
                .change_work_order(order.building, None, false)?;
            events.extend(occur![mark()]);
        }
        Ok(events)
    }

    /// Releases claiming builder and removes the order.
    fn dismiss_work_order(
        &mut self,
        id: WorkOrderId,
    ) -> Result<(WorkOrder, Vec<Event>), ColonyError> {
        let mut events = vec![];
        let claimed_by = self.working.get_work_order(id)?.claimed_by;
        if let Some(citizen) = claimed_by {
            events.extend(self.release_citizen_order(citizen)?);
        }
        let (order, remove) = self.working.remove_work_order(id)?;
        events.extend(occur![remove()]);
        self.removals.push(ColonyMessage::RemoveWorkOrder {
            colony: self.id,
            id,
        });
        Ok((order, events))
    }
}

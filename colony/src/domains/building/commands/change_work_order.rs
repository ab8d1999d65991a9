use crate::building::Buildings::BuildingWorkOrderChanged;
use crate::building::{BuildingDomain, BuildingError, Buildings};
use crate::math::Position;
use crate::working::WorkOrderId;

impl BuildingDomain {
    pub fn change_work_order(
        &mut self,
        position: Position,
        work_order: Option<WorkOrderId>,
        repairing: bool,
    ) -> Result<impl FnOnce() -> Vec<Buildings> + '_, BuildingError> {
        let building = self.get_building_mut(position)?;
        let command = move || {
            building.work_order = work_order;
            building.repairing = repairing;
            building.dirty = true;
            vec![BuildingWorkOrderChanged {
                position,
                work_order,
                repairing,
            }]
        };
        Ok(command)
    }
}

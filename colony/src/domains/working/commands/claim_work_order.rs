use crate::citizens::CitizenId;
use crate::working::Working::{WorkOrderClaimed, WorkOrderReleased, WorkOrderRequested};
use crate::working::{WorkOrderId, Working, WorkingDomain, WorkingError};

impl WorkingDomain {
    pub fn claim_work_order(
        &mut self,
        id: WorkOrderId,
        citizen: CitizenId,
    ) -> Result<impl FnOnce() -> Vec<Working> + '_, WorkingError> {
        let order = self.get_work_order_mut(id)?;
        if let Some(holder) = order.claimed_by {
            return Err(WorkingError::WorkOrderAlreadyClaimed {
                id,
                citizen: holder,
            });
        }
        let command = move || {
            order.claimed_by = Some(citizen);
            order.dirty = true;
            vec![WorkOrderClaimed { id, citizen }]
        };
        Ok(command)
    }

    pub fn release_work_order(
        &mut self,
        id: WorkOrderId,
    ) -> Result<impl FnOnce() -> Vec<Working> + '_, WorkingError> {
        let order = self.get_work_order_mut(id)?;
        let command = move || {
            if order.claimed_by.take().is_none() {
                return vec![];
            }
            order.requested = false;
            order.dirty = true;
            vec![WorkOrderReleased { id }]
        };
        Ok(command)
    }

    pub fn mark_requested(
        &mut self,
        id: WorkOrderId,
    ) -> Result<impl FnOnce() -> Vec<Working> + '_, WorkingError> {
        let order = self.get_work_order_mut(id)?;
        let command = move || {
            order.requested = true;
            order.dirty = true;
            vec![WorkOrderRequested { id }]
        };
        Ok(command)
    }
}

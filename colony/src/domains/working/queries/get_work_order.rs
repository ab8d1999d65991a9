use crate::math::Position;
use crate::working::{WorkOrder, WorkOrderId, WorkingDomain, WorkingError};

impl WorkingDomain {
    pub fn get_work_order(&self, id: WorkOrderId) -> Result<&WorkOrder, WorkingError> {
        self.work_orders
            .get(&id)
            .ok_or(WorkingError::WorkOrderNotFound { id })
    }

    pub fn get_work_order_mut(&mut self, id: WorkOrderId) -> Result<&mut WorkOrder, WorkingError> {
        self.work_orders
            .get_mut(&id)
            .ok_or(WorkingError::WorkOrderNotFound { id })
    }

    pub fn work_orders_at(&self, building: Position) -> Vec<WorkOrderId> {
        self.work_orders
            .values()
            .filter(|order| order.building == building)
            .map(|order| order.id)
            .collect()
    }

    pub fn unclaimed_work_orders(&self) -> Vec<WorkOrderId> {
        self.work_orders
            .values()
            .filter(|order| !order.is_claimed())
            .map(|order| order.id)
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.work_orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.work_orders.is_empty()
    }
}

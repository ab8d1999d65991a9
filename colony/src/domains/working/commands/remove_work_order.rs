use crate::working::Working::WorkOrderRemoved;
use crate::working::{WorkOrder, WorkOrderId, Working, WorkingDomain, WorkingError};

impl WorkingDomain {
    pub fn remove_work_order(
        &mut self,
        id: WorkOrderId,
    ) -> Result<(WorkOrder, impl FnOnce() -> Vec<Working> + '_), WorkingError> {
        let order = self.get_work_order(id)?.clone();
        let command = move || {
            self.work_orders.remove(&id);
            vec![WorkOrderRemoved { id }]
        };
        Ok((order, command))
    }
}

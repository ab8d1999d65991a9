use crate::working::{WorkOrder, WorkingDomain};

impl WorkingDomain {
    pub fn load_work_orders(&mut self, work_orders: Vec<WorkOrder>, sequence: usize) {
        self.work_orders_id.set(sequence);
        for work_order in work_orders {
            self.work_orders_id.register(work_order.id.0);
            self.work_orders.insert(work_order.id, work_order);
        }
    }
}

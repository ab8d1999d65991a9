use crate::working::Working::NoticeIssued;
use crate::working::{Notice, WorkOrderId, Working, WorkingDomain, WorkingError};

impl WorkingDomain {
    /// One-shot per order: once notified the order stays silent until replaced.
    pub fn issue_notice(
        &mut self,
        id: WorkOrderId,
        notice: Notice,
    ) -> Result<impl FnOnce() -> Vec<Working> + '_, WorkingError> {
        let order = self.get_work_order_mut(id)?;
        let command = move || {
            if order.notified {
                return vec![];
            }
            order.notified = true;
            vec![NoticeIssued { id, notice }]
        };
        Ok(command)
    }
}

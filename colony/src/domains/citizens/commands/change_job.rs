use crate::citizens::Citizens::JobChanged;
use crate::citizens::{CitizenId, Citizens, CitizensDomain, CitizensError, Job};
use crate::math::Position;
use crate::working::WorkOrderId;

impl CitizensDomain {
    pub fn change_job(
        &mut self,
        id: CitizenId,
        job: Option<Job>,
        work_building: Option<Position>,
    ) -> Result<impl FnOnce() -> Vec<Citizens> + '_, CitizensError> {
        let citizen = self.get_citizen_mut(id)?;
        if let Some(work_order) = citizen.job.and_then(|job| job.work_order()) {
            return Err(CitizensError::CitizenBusy { id, work_order });
        }
        let command = move || {
            citizen.job = job;
            citizen.work_building = work_building;
            citizen.dirty = true;
            vec![JobChanged {
                id,
                job,
                work_building,
            }]
        };
        Ok(command)
    }

    pub fn take_work_order(
        &mut self,
        id: CitizenId,
        work_order: Option<WorkOrderId>,
    ) -> Result<impl FnOnce() -> Vec<Citizens> + '_, CitizensError> {
        let citizen = self.get_citizen_mut(id)?;
        if citizen.job.is_none() {
            return Err(CitizensError::CitizenHasNoJob { id });
        }
        let command = move || {
            citizen.job = Some(Job::Builder { work_order });
            citizen.dirty = true;
            vec![JobChanged {
                id,
                job: citizen.job,
                work_building: citizen.work_building,
            }]
        };
        Ok(command)
    }
}

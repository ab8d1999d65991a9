use crate::citizens::{Citizen, CitizenId, CitizensDomain, CitizensError};
use crate::math::Position;
use crate::working::WorkOrderId;

impl CitizensDomain {
    pub fn get_citizen(&self, id: CitizenId) -> Result<&Citizen, CitizensError> {
        self.citizens
            .get(&id)
            .ok_or(CitizensError::CitizenNotFound { id })
    }

    pub fn get_citizen_mut(&mut self, id: CitizenId) -> Result<&mut Citizen, CitizensError> {
        self.citizens
            .get_mut(&id)
            .ok_or(CitizensError::CitizenNotFound { id })
    }

    pub fn find_citizen_by_name(&self, name: &str) -> Option<&Citizen> {
        self.citizens
            .values()
            .find(|citizen| citizen.name.eq_ignore_ascii_case(name))
    }

    pub fn citizens_working_at(&self, building: Position) -> Vec<CitizenId> {
        self.citizens
            .values()
            .filter(|citizen| citizen.work_building == Some(building))
            .map(|citizen| citizen.id)
            .collect()
    }

    pub fn citizens_living_at(&self, building: Position) -> Vec<CitizenId> {
        self.citizens
            .values()
            .filter(|citizen| citizen.home_building == Some(building))
            .map(|citizen| citizen.id)
            .collect()
    }

    pub fn citizen_holding(&self, work_order: WorkOrderId) -> Option<&Citizen> {
        self.citizens
            .values()
            .find(|citizen| citizen.job.and_then(|job| job.work_order()) == Some(work_order))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.citizens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.citizens.is_empty()
    }
}

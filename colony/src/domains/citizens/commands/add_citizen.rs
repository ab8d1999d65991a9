use crate::citizens::Citizens::{CitizenAdded, CitizenRealized};
use crate::citizens::{Citizen, CitizenId, Citizens, CitizensDomain, CitizensError};

impl CitizensDomain {
    pub fn add_citizen(
        &mut self,
        name: String,
    ) -> Result<(CitizenId, impl FnOnce() -> Vec<Citizens> + '_), CitizensError> {
        let id = CitizenId(self.citizens_id.introduce().one(|value| value));
        let citizen = Citizen::new(id, name.clone());
        let command = move || {
            self.citizens_id.register(id.0);
            self.citizens.insert(id, citizen);
            vec![CitizenAdded { id, name }]
        };
        Ok((id, command))
    }

    /// Realizes citizen state once, repeated calls keep identity untouched.
    pub fn spawn_citizen_if_null(
        &mut self,
        id: CitizenId,
    ) -> Result<impl FnOnce() -> Vec<Citizens> + '_, CitizensError> {
        let citizen = self.get_citizen_mut(id)?;
        let command = move || {
            if citizen.realized {
                return vec![];
            }
            citizen.realized = true;
            citizen.dirty = true;
            vec![CitizenRealized { id }]
        };
        Ok(command)
    }
}

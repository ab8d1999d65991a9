use crate::citizens::Citizens::CitizenRemoved;
use crate::citizens::{CitizenId, Citizens, CitizensDomain, CitizensError};

impl CitizensDomain {
    pub fn remove_citizen(
        &mut self,
        id: CitizenId,
    ) -> Result<impl FnOnce() -> Vec<Citizens> + '_, CitizensError> {
        self.get_citizen(id)?;
        let command = move || {
            self.citizens.remove(&id);
            vec![CitizenRemoved { id }]
        };
        Ok(command)
    }
}

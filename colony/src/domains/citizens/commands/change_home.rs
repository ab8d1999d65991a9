use crate::citizens::Citizens::HomeChanged;
use crate::citizens::{CitizenId, Citizens, CitizensDomain, CitizensError};
use crate::math::Position;

impl CitizensDomain {
    pub fn change_home(
        &mut self,
        id: CitizenId,
        home: Option<Position>,
    ) -> Result<impl FnOnce() -> Vec<Citizens> + '_, CitizensError> {
        let citizen = self.get_citizen_mut(id)?;
        let command = move || {
            citizen.home_building = home;
            citizen.dirty = true;
            vec![HomeChanged { id, home }]
        };
        Ok(command)
    }
}

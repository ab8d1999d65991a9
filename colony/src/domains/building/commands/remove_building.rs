use crate::building::Buildings::BuildingRemoved;
use crate::building::{Building, BuildingDomain, BuildingError, Buildings};
use crate::math::Position;

impl BuildingDomain {
    pub fn remove_building(
        &mut self,
        position: Position,
    ) -> Result<(Building, impl FnOnce() -> Vec<Buildings> + '_), BuildingError> {
        let building = self.get_building(position)?.clone();
        let id = building.id;
        let command = move || {
            self.buildings.remove(&position);
            vec![BuildingRemoved { id, position }]
        };
        Ok((building, command))
    }
}

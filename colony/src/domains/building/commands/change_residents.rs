use crate::building::Buildings::ResidentsChanged;
use crate::building::{BuildingDomain, BuildingError, Buildings, Role};
use crate::citizens::CitizenId;
use crate::math::Position;

impl BuildingDomain {
    pub fn settle_resident(
        &mut self,
        position: Position,
        citizen: CitizenId,
    ) -> Result<impl FnOnce() -> Vec<Buildings> + '_, BuildingError> {
        let building = self.get_building_mut(position)?;
        let capacity = building.max_inhabitants();
        match &building.role {
            Role::Home { residents } => {
                if residents.len() >= capacity && !residents.contains(&citizen) {
                    return Err(BuildingError::HomeIsFull { position });
                }
            }
            _ => return Err(BuildingError::NotHome { position }),
        }
        let command = move || {
            let mut events = vec![];
            if let Role::Home { residents } = &mut building.role {
                if !residents.contains(&citizen) {
                    residents.push(citizen);
                }
                events.push(ResidentsChanged {
                    position,
                    residents: residents.clone(),
                });
            }
            building.dirty = true;
            events
        };
        Ok(command)
    }

    pub fn evict_resident(
        &mut self,
        position: Position,
        citizen: CitizenId,
    ) -> Result<impl FnOnce() -> Vec<Buildings> + '_, BuildingError> {
        let building = self.get_building_mut(position)?;
        if !building.is_home() {
            return Err(BuildingError::NotHome { position });
        }
        let command = move || {
            let mut events = vec![];
            if let Role::Home { residents } = &mut building.role {
                residents.retain(|resident| *resident != citizen);
                events.push(ResidentsChanged {
                    position,
                    residents: residents.clone(),
                });
            }
            building.dirty = true;
            events
        };
        Ok(command)
    }
}

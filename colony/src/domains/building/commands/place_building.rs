use crate::building::Buildings::BuildingPlaced;
use crate::building::{Building, BuildingDomain, BuildingError, Buildings, Role};
use crate::math::Position;
use crate::tokens::Token;

pub struct Placement {
    pub position: Position,
    pub role: Role,
    pub level: u8,
    pub rotation: u8,
    pub mirrored: bool,
    pub style: String,
}

impl BuildingDomain {
    pub fn place_building(
        &mut self,
        id: Token,
        placement: Placement,
    ) -> Result<impl FnOnce() -> Vec<Buildings> + '_, BuildingError> {
        let position = placement.position;
        if self.buildings.contains_key(&position) {
            return Err(BuildingError::PositionOccupied { position });
        }
        if placement.rotation > 3 {
            return Err(BuildingError::InvalidRotation {
                rotation: placement.rotation,
            });
        }
        if placement.role == Role::TownHall {
            if let Some(town_hall) = self.town_hall() {
                return Err(BuildingError::TownHallExists {
                    position: town_hall.position,
                });
            }
        }
        let max_level = placement.role.capabilities().max_level;
        if placement.level > max_level {
            return Err(BuildingError::MaxLevelReached {
                position,
                level: max_level,
            });
        }
        let building = Building {
            id,
            position,
            role: placement.role,
            level: placement.level,
            rotation: placement.rotation,
            mirrored: placement.mirrored,
            style: placement.style,
            work_order: None,
            repairing: false,
            containers: vec![],
            dirty: true,
        };
        let command = move || {
            let level = building.level;
            self.buildings.insert(position, building);
            vec![BuildingPlaced {
                id,
                position,
                level,
            }]
        };
        Ok(command)
    }
}

use crate::building::{Building, BuildingDomain, BuildingError};
use crate::math::Position;
use crate::tokens::Token;

impl BuildingDomain {
    pub fn get_building(&self, position: Position) -> Result<&Building, BuildingError> {
        self.buildings
            .get(&position)
            .ok_or(BuildingError::BuildingNotFound { position })
    }

    pub fn get_building_mut(&mut self, position: Position) -> Result<&mut Building, BuildingError> {
        self.buildings
            .get_mut(&position)
            .ok_or(BuildingError::BuildingNotFound { position })
    }

    pub fn find_building(&self, id: Token) -> Option<&Building> {
        self.buildings.values().find(|building| building.id == id)
    }

    pub fn town_hall(&self) -> Option<&Building> {
        self.buildings
            .values()
            .find(|building| building.is_administrative())
    }

    pub fn homes(&self) -> impl Iterator<Item = &Building> {
        self.buildings.values().filter(|building| building.is_home())
    }

    /// Pure function of home levels.
    pub fn calculate_max_citizens(&self) -> usize {
        self.homes().map(|home| home.max_inhabitants()).sum()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}

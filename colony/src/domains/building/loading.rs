use crate::building::{Building, BuildingDomain};

impl BuildingDomain {
    pub fn load_buildings(&mut self, buildings: Vec<Building>) {
        for building in buildings {
            self.buildings.insert(building.position, building);
        }
    }
}

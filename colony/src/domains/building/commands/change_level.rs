use crate::building::Buildings::{BuildingLevelChanged, BuildingWorkOrderChanged};
use crate::building::{BuildingDomain, BuildingError, Buildings};
use crate::math::Position;

impl BuildingDomain {
    /// Single transition hook of upgrade: new level, pending order cleared.
    pub fn change_level(
        &mut self,
        position: Position,
        level: u8,
    ) -> Result<impl FnOnce() -> Vec<Buildings> + '_, BuildingError> {
        let building = self.get_building_mut(position)?;
        if level > building.max_level() {
            return Err(BuildingError::MaxLevelReached {
                position,
                level: building.max_level(),
            });
        }
        let command = move || {
            building.level = level;
            building.work_order = None;
            building.repairing = false;
            building.dirty = true;
            vec![
                BuildingLevelChanged { position, level },
                BuildingWorkOrderChanged {
                    position,
                    work_order: None,
                    repairing: false,
                },
            ]
        };
        Ok(command)
    }
}

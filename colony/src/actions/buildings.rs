use log::info;

use crate::api::{ColonyError, Event, Settlement};
use crate::building::{Building, BuildingError, Placement, UpgradeEffect};
use crate::math::Position;
use crate::replication::ColonyMessage;
use crate::requesting::RequestingError;
use crate::structures::StructureCatalog;
use crate::tokens::{Token, TokenKind};
use crate::working::{Blueprint, Upgrade, WorkOrderId, WorkOrderKind};
use crate::{occur, Colony};

impl Colony {
    #[inline]
    pub fn get_building(&self, position: Position) -> Option<&Building> {
        self.buildings.buildings.get(&position)
    }

    pub fn add_building(&mut self, placement: Placement) -> Result<(Token, Vec<Event>), ColonyError> {
        let id = self.tokens.next(TokenKind::Building);
        let home = placement.role.capabilities().inhabitants_per_level > 0;
        let place = self.buildings.place_building(id, placement)?;
        let mut events = occur![place()];
        if home {
            events.extend(self.calculate_max_citizens());
        }
        Ok((id, events))
    }

    pub fn request_upgrade(
        &mut self,
        position: Position,
        catalog: &StructureCatalog,
    ) -> Result<(WorkOrderId, Vec<Event>), ColonyError> {
        let building = self.buildings.get_building(position)?;
        if building.is_max_level() {
            return Err(BuildingError::MaxLevelReached {
                position,
                level: building.level,
            }
            .into());
        }
        if let Some(work_order) = building.work_order {
            return Err(BuildingError::WorkOrderPending {
                position,
                work_order,
            }
            .into());
        }
        let level = building.level + 1;
        let blueprint = blueprint_of(building, WorkOrderKind::Build, level, catalog);
        let (id, create) = self.working.create_work_order(blueprint)?;
        let mark = self.buildings.change_work_order(position, Some(id), false)?;
        info!("Request upgrade of {} to level {}", position, level);
        Ok((id, occur![create(), mark()]))
    }

    pub fn request_repair(
        &mut self,
        position: Position,
        catalog: &StructureCatalog,
    ) -> Result<(WorkOrderId, Vec<Event>), ColonyError> {
        let building = self.buildings.get_building(position)?;
        if building.level == 0 {
            return Err(BuildingError::NothingToRepair { position }.into());
        }
        if let Some(work_order) = building.work_order {
            return Err(BuildingError::WorkOrderPending {
                position,
                work_order,
            }
            .into());
        }
        let blueprint = blueprint_of(building, WorkOrderKind::Repair, building.level, catalog);
        let (id, create) = self.working.create_work_order(blueprint)?;
        let mark = self.buildings.change_work_order(position, Some(id), true)?;
        info!("Request repair of {}", position);
        Ok((id, occur![create(), mark()]))
    }

    pub fn request_decoration(
        &mut self,
        position: Position,
        structure_name: &str,
        rotation: u8,
        mirrored: bool,
        catalog: &StructureCatalog,
    ) -> Result<(WorkOrderId, Vec<Event>), ColonyError> {
        let blueprint = Blueprint {
            kind: WorkOrderKind::Decoration,
            building: position,
            upgrade: None,
            name: structure_name.to_string(),
            structure_name: structure_name.to_string(),
            structure_hash: catalog.hash_of(structure_name).unwrap_or_default().to_string(),
            rotation,
            mirrored,
        };
        let (id, create) = self.working.create_work_order(blueprint)?;
        Ok((id, occur![create()]))
    }

    /// Level transition hook, fires level-crossing effects through the colony.
    pub fn on_upgrade_complete(
        &mut self,
        position: Position,
        level: u8,
    ) -> Result<Vec<Event>, ColonyError> {
        let effects = self.buildings.get_building(position)?.upgrade_effects(level);
        let change = self.buildings.change_level(position, level)?;
        let mut events = occur![change()];
        for effect in effects {
            match effect {
                UpgradeEffect::RecalculateMaxCitizens => {
                    events.extend(self.calculate_max_citizens())
                }
                UpgradeEffect::Achievement(achievement) => {
                    events.extend(self.trigger_achievement(achievement))
                }
            }
        }
        Ok(events)
    }

    /// Terminal for building: residents, workers, orders and requests are
    /// detached before removal.
    pub fn destroy_building(&mut self, position: Position) -> Result<Vec<Event>, ColonyError> {
        let building = self.buildings.get_building(position)?.clone();
        let mut events = vec![];
        for citizen in self.citizens.citizens_living_at(position) {
            let leave = self.citizens.change_home(citizen, None)?;
            events.extend(occur![leave()]);
        }
        for citizen in self.citizens.citizens_working_at(position) {
            events.extend(self.release_citizen_order(citizen)?);
            let fire = self.citizens.change_job(citizen, None, None)?;
            events.extend(occur![fire()]);
        }
        for work_order in self.working.work_orders_at(position) {
            events.extend(self.cancel_work_order(work_order)?);
        }
        let cancellations = self.requesting.cancel_requests_of(building.id);
        let (_, remove) = self.buildings.remove_building(position)?;
        events.extend(occur![cancellations, remove()]);
        self.removals.push(ColonyMessage::RemoveBuilding {
            colony: self.id,
            position,
        });
        if building.is_home() {
            events.extend(self.calculate_max_citizens());
        }
        info!("Building {} at {} destroyed", building.id, position);
        Ok(events)
    }

    /// Flags building for next synchronization pass.
    pub fn mark_building_dirty(&mut self, position: Position) -> Result<Vec<Event>, ColonyError> {
        let building = self.buildings.get_building_mut(position)?;
        building.dirty = true;
        Ok(occur![vec![Settlement::BuildingMarkedDirty { position }]])
    }

    /// Building acknowledges pickup of delivered request.
    pub fn accept_request(
        &mut self,
        requester: Token,
        request: Token,
    ) -> Result<Vec<Event>, ColonyError> {
        if self.buildings.find_building(requester).is_none() {
            return Err(RequestingError::InvalidArgument {
                request,
                reason: format!("requester {} is not a building of colony", requester),
            }
            .into());
        }
        let accept = self.requesting.mark_request_as_accepted(requester, request)?;
        Ok(occur![accept()])
    }

    pub fn mark_buildings_dirty(&mut self) {
        for building in self.buildings.buildings.values_mut() {
            building.dirty = true;
        }
    }
}

fn blueprint_of(
    building: &Building,
    kind: WorkOrderKind,
    level: u8,
    catalog: &StructureCatalog,
) -> Blueprint {
    let schematic = building.schematic().to_string();
    let structure_name = StructureCatalog::structure_name(&building.style, &schematic, level);
    let structure_hash = catalog
        .hash_of(&structure_name)
        .unwrap_or_default()
        .to_string();
    Blueprint {
        kind,
        building: building.position,
        upgrade: Some(Upgrade {
            level,
            name: schematic.clone(),
        }),
        name: format!("{} {}", schematic, level),
        structure_name,
        structure_hash,
        rotation: building.rotation,
        mirrored: building.mirrored,
    }
}

use datamap::{Compound, DataError};
use log::info;
use std::collections::BTreeSet;

use crate::building::{Building, Role};
use crate::citizens::{Citizen, CitizenId, Job};
use crate::math::Position;
use crate::permissions::{Permissions, PermissionsData};
use crate::requesting::RequestManager;
use crate::structures::{Relocation, StructureCatalog};
use crate::tokens::Token;
use crate::working::{Upgrade, WorkOrder, WorkOrderId, WorkOrderKind};
use crate::Colony;

impl Colony {
    pub fn save(&self) -> Result<Compound, DataError> {
        let mut compound = Compound::new();
        compound.put("id", self.id)?;
        compound.put_string("name", &self.name);
        compound.put_int("dimension", self.dimension as i64);
        compound.put("center", self.center)?;
        compound.put_string("owner", self.owner().unwrap_or_default());
        compound.put_bool("manualHiring", self.manual_hiring);
        compound.put_int("maxCitizens", self.max_citizens as i64);
        compound.put_double("happiness", self.happiness);
        compound.put("achievements", &self.achievements)?;
        compound.put("freePositions", &self.free_positions)?;
        compound.put("freeBlocks", &self.free_blocks)?;
        let buildings = self
            .buildings
            .buildings
            .values()
            .map(save_building)
            .collect::<Result<Vec<_>, _>>()?;
        compound.put_list("buildings", buildings);
        let citizens = self
            .citizens
            .citizens
            .values()
            .map(save_citizen)
            .collect::<Result<Vec<_>, _>>()?;
        compound.put_list("citizens", citizens);
        let work_orders = self
            .working
            .work_orders
            .values()
            .map(save_work_order)
            .collect::<Result<Vec<_>, _>>()?;
        compound.put_list("workOrders", work_orders);
        compound.put("permissions", self.permissions.to_data())?;
        compound.put_int("tokens", self.tokens.watermark() as i64);
        compound.put_int("citizensSequence", self.citizens.citizens_id.value() as i64);
        compound.put_int("workOrdersSequence", self.working.work_orders_id.value() as i64);
        Ok(compound)
    }

    /// Restores colony, work orders with renamed structures are relocated by hash.
    pub fn load(
        compound: &Compound,
        catalog: &StructureCatalog,
        setup: fn(&mut RequestManager),
    ) -> Result<Colony, DataError> {
        let id: Token = compound.get("id")?;
        let name = compound.get_string("name")?;
        let owner = compound.get_string("owner")?;
        let dimension = compound.get_int("dimension")? as i32;
        let center: Position = compound.get("center")?;
        let mut colony = Colony::new(id, &name, &owner, dimension, center);
        colony.manual_hiring = compound.get_bool("manualHiring")?;
        colony.max_citizens = compound.get_int("maxCitizens")? as usize;
        colony.happiness = compound.get_double("happiness")?;
        colony.achievements = compound.get_or("achievements", vec![])?;
        colony.free_positions = compound.get_or("freePositions", BTreeSet::new())?;
        colony.free_blocks = compound.get_or("freeBlocks", BTreeSet::new())?;
        let permissions: PermissionsData = compound.get("permissions")?;
        colony.permissions = Permissions::from_data(permissions);
        colony.tokens.restore(compound.get_int("tokens")? as usize);

        let mut buildings = vec![];
        for entry in compound.get_list("buildings")? {
            let building = load_building(&entry)?;
            colony.tokens.register(building.id);
            buildings.push(building);
        }
        colony.buildings.load_buildings(buildings);

        let mut citizens = vec![];
        for entry in compound.get_list("citizens")? {
            citizens.push(load_citizen(&entry)?);
        }
        let sequence = compound.get_int("citizensSequence")? as usize;
        colony.citizens.load_citizens(citizens, sequence);

        let mut work_orders = vec![];
        for entry in compound.get_list("workOrders")? {
            work_orders.push(load_work_order(&entry, catalog)?);
        }
        let sequence = compound.get_int("workOrdersSequence")? as usize;
        colony.working.load_work_orders(work_orders, sequence);

        setup(&mut colony.requesting);
        colony.max_citizens = colony.buildings.calculate_max_citizens();
        if !colony.request_claimed_materials().is_empty() {
            info!(
                "Colony {} reissued {} material requests",
                colony.id,
                colony.requesting.len()
            );
        }
        info!(
            "Colony {} {} loaded with {} buildings, {} citizens, {} work orders",
            colony.id,
            colony.name,
            colony.buildings.len(),
            colony.citizens.len(),
            colony.working.len()
        );
        Ok(colony)
    }
}

fn save_building(building: &Building) -> Result<Compound, DataError> {
    let mut compound = Compound::new();
    compound.put("id", building.id)?;
    compound.put("position", building.position)?;
    compound.put_string("role", building.role.name());
    if let Role::Workshop { schematic } = &building.role {
        compound.put_string("schematic", schematic);
    }
    compound.put_int("level", building.level as i64);
    compound.put_int("rotation", building.rotation as i64);
    compound.put_bool("mirrored", building.mirrored);
    compound.put_string("style", &building.style);
    if let Some(work_order) = building.work_order {
        compound.put_int("workOrder", work_order.0 as i64);
    }
    compound.put_bool("repairing", building.repairing);
    compound.put("containers", &building.containers)?;
    let residents: Vec<i64> = building
        .residents()
        .iter()
        .map(|citizen| citizen.0 as i64)
        .collect();
    if !residents.is_empty() {
        compound.put_int_array("residents", &residents);
    }
    Ok(compound)
}

fn load_building(compound: &Compound) -> Result<Building, DataError> {
    let position: Position = compound.get("position")?;
    let role = match compound.get_string("role")?.as_str() {
        "townhall" => Role::TownHall,
        "home" => Role::Home {
            residents: compound
                .get_int_array("residents")?
                .into_iter()
                .map(|id| CitizenId(id as usize))
                .collect(),
        },
        "builder" => Role::Builder,
        "workshop" => Role::Workshop {
            schematic: compound.get_string("schematic")?,
        },
        role => {
            return Err(DataError::Inconsistent {
                message: format!("unknown building role {} at {}", role, position),
            })
        }
    };
    let work_order = if compound.contains("workOrder") {
        Some(WorkOrderId(compound.get_int("workOrder")? as usize))
    } else {
        None
    };
    Ok(Building {
        id: compound.get("id")?,
        position,
        role,
        level: get_u8(compound, "level")?,
        rotation: get_rotation(compound, "rotation")?,
        mirrored: compound.get_bool("mirrored")?,
        style: compound.get_string("style")?,
        work_order,
        repairing: compound.get_bool("repairing")?,
        containers: compound.get_or("containers", vec![])?,
        dirty: true,
    })
}

fn save_citizen(citizen: &Citizen) -> Result<Compound, DataError> {
    let mut compound = Compound::new();
    compound.put_int("id", citizen.id.0 as i64);
    compound.put_string("name", &citizen.name);
    if let Some(job) = citizen.job {
        compound.put_string("job", "builder");
        if let Some(work_order) = job.work_order() {
            compound.put_int("jobWorkOrder", work_order.0 as i64);
        }
    }
    if let Some(work_building) = citizen.work_building {
        compound.put("workBuilding", work_building)?;
    }
    if let Some(home_building) = citizen.home_building {
        compound.put("homeBuilding", home_building)?;
    }
    compound.put_double("happiness", citizen.happiness);
    Ok(compound)
}

fn load_citizen(compound: &Compound) -> Result<Citizen, DataError> {
    let id = CitizenId(compound.get_int("id")? as usize);
    let mut citizen = Citizen::new(id, compound.get_string("name")?);
    if compound.contains("job") {
        let work_order = if compound.contains("jobWorkOrder") {
            Some(WorkOrderId(compound.get_int("jobWorkOrder")? as usize))
        } else {
            None
        };
        citizen.job = Some(Job::Builder { work_order });
    }
    citizen.work_building = compound.get_or("workBuilding", None)?;
    citizen.home_building = compound.get_or("homeBuilding", None)?;
    citizen.happiness = compound.get_double("happiness")?;
    Ok(citizen)
}

fn save_work_order(order: &WorkOrder) -> Result<Compound, DataError> {
    let mut compound = Compound::new();
    compound.put_int("id", order.id.0 as i64);
    compound.put_string("type", order.kind.code());
    if let Some(citizen) = order.claimed_by {
        compound.put_int("claimedBy", citizen.0 as i64);
    }
    compound.put("building", order.building)?;
    if let Some(upgrade) = &order.upgrade {
        compound.put_int("upgradeLevel", upgrade.level as i64);
        compound.put_string("upgrade", &upgrade.name);
    }
    compound.put_string("workOrderName", &order.name);
    compound.put_bool("cleared", order.cleared);
    compound.put_string("structureName", &order.structure_name);
    compound.put_string("schematicMD5", &order.structure_hash);
    compound.put_int("buildingRotation", order.rotation as i64);
    compound.put_bool("requested", order.requested);
    compound.put_bool("mirrored", order.mirrored);
    Ok(compound)
}

fn load_work_order(compound: &Compound, catalog: &StructureCatalog) -> Result<WorkOrder, DataError> {
    let id = WorkOrderId(compound.get_int("id")? as usize);
    let code = compound.get_string("type")?;
    let kind = WorkOrderKind::from_code(&code).ok_or_else(|| DataError::Inconsistent {
        message: format!("unknown work order type {}", code),
    })?;
    let upgrade = if kind != WorkOrderKind::Decoration && compound.contains("upgradeLevel") {
        Some(Upgrade {
            level: get_u8(compound, "upgradeLevel")?,
            name: compound.get_string("upgrade")?,
        })
    } else {
        None
    };
    let claimed_by = if compound.contains("claimedBy") {
        Some(CitizenId(compound.get_int("claimedBy")? as usize))
    } else {
        None
    };
    let mut structure_name = compound.get_string("structureName")?;
    let structure_hash = compound.get_or("schematicMD5", String::new())?;
    if let Relocation::Relocated { name } = catalog.relocate(&structure_name, &structure_hash) {
        structure_name = name;
    }
    Ok(WorkOrder {
        id,
        kind,
        building: compound.get("building")?,
        upgrade,
        name: compound.get_string("workOrderName")?,
        structure_name,
        structure_hash,
        rotation: get_rotation(compound, "buildingRotation")?,
        mirrored: compound.get_bool("mirrored")?,
        cleared: compound.get_bool("cleared")?,
        // requests are not persisted, claimed orders ask again on load
        requested: false,
        claimed_by,
        notified: false,
        dirty: true,
    })
}

fn get_u8(compound: &Compound, key: &str) -> Result<u8, DataError> {
    let value = compound.get_int(key)?;
    u8::try_from(value).map_err(|_| DataError::Inconsistent {
        message: format!("{} {} out of range", key, value),
    })
}

fn get_rotation(compound: &Compound, key: &str) -> Result<u8, DataError> {
    match get_u8(compound, key)? {
        rotation @ 0..=3 => Ok(rotation),
        rotation => Err(DataError::Inconsistent {
            message: format!("{} {} out of range", key, rotation),
        }),
    }
}

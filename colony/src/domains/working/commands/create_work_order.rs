use crate::math::Position;
use crate::working::Working::WorkOrderCreated;
use crate::working::{
    Upgrade, WorkOrder, WorkOrderId, WorkOrderKind, Working, WorkingDomain, WorkingError,
};

pub struct Blueprint {
    pub kind: WorkOrderKind,
    pub building: Position,
    pub upgrade: Option<Upgrade>,
    pub name: String,
    pub structure_name: String,
    pub structure_hash: String,
    pub rotation: u8,
    pub mirrored: bool,
}

impl WorkingDomain {
    pub fn create_work_order(
        &mut self,
        blueprint: Blueprint,
    ) -> Result<(WorkOrderId, impl FnOnce() -> Vec<Working> + '_), WorkingError> {
        if let Some(upgrade) = &blueprint.upgrade {
            let duplicate = self.work_orders.values().any(|order| {
                order.building == blueprint.building && order.level() == upgrade.level
            });
            if duplicate {
                return Err(WorkingError::DuplicateWorkOrder {
                    building: blueprint.building,
                    level: upgrade.level,
                });
            }
        }
        let id = self.work_orders_id.introduce().one(WorkOrderId);
        // site of first level is not cleared yet
        let cleared = blueprint
            .upgrade
            .as_ref()
            .map(|upgrade| upgrade.level > 1)
            .unwrap_or(false);
        let order = WorkOrder {
            id,
            kind: blueprint.kind,
            building: blueprint.building,
            upgrade: blueprint.upgrade,
            name: blueprint.name,
            cleared,
            structure_name: blueprint.structure_name,
            structure_hash: blueprint.structure_hash,
            rotation: blueprint.rotation,
            mirrored: blueprint.mirrored,
            requested: false,
            claimed_by: None,
            notified: false,
            dirty: true,
        };
        let command = move || {
            let event = WorkOrderCreated {
                id,
                kind: order.kind,
                building: order.building,
                level: order.level(),
            };
            self.work_orders_id.register(id.0);
            self.work_orders.insert(id, order);
            vec![event]
        };
        Ok((id, command))
    }
}

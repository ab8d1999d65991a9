use bincode::error::{DecodeError, EncodeError};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::api::Settlement::{ObserverSubscribed, ObserverUnsubscribed};
use crate::api::Event;
use crate::building::{Building, Role};
use crate::citizens::{Citizen, CitizenId, Job};
use crate::math::Position;
use crate::permissions::{Action, PermissionsData};
use crate::tokens::Token;
use crate::working::{Notice, WorkOrder, WorkOrderId, WorkOrderKind};
use crate::{occur, Colony};

/// Colony scalars, always sent complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonySnapshot {
    pub name: String,
    pub dimension: i32,
    pub center: Position,
    pub manual_hiring: bool,
    pub max_citizens: usize,
    pub free_blocks: Vec<String>,
    pub free_positions: Vec<Position>,
    pub happiness: f64,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingView {
    pub id: Token,
    pub position: Position,
    pub role: Role,
    pub level: u8,
    pub max_level: u8,
    pub rotation: u8,
    pub mirrored: bool,
    pub style: String,
    pub work_order: Option<WorkOrderId>,
    pub repairing: bool,
    pub containers: Vec<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitizenView {
    pub id: CitizenId,
    pub name: String,
    pub job: Option<Job>,
    pub work_building: Option<Position>,
    pub home_building: Option<Position>,
    pub happiness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderView {
    pub id: WorkOrderId,
    pub kind: WorkOrderKind,
    pub building: Position,
    pub level: u8,
    pub name: String,
    pub structure_name: String,
    pub claimed_by: Option<CitizenId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColonyMessage {
    View {
        colony: Token,
        new_subscription: bool,
        snapshot: ColonySnapshot,
    },
    Permissions {
        colony: Token,
        permissions: PermissionsData,
    },
    Citizen {
        colony: Token,
        citizen: CitizenView,
    },
    RemoveCitizen {
        colony: Token,
        id: CitizenId,
    },
    Building {
        colony: Token,
        building: BuildingView,
    },
    RemoveBuilding {
        colony: Token,
        position: Position,
    },
    /// Work order view stays opaque bytes until the replica decodes it.
    WorkOrder {
        colony: Token,
        id: WorkOrderId,
        payload: Vec<u8>,
    },
    RemoveWorkOrder {
        colony: Token,
        id: WorkOrderId,
    },
    Notice {
        colony: Token,
        work_order: WorkOrderId,
        text: String,
    },
    RemoveColony {
        colony: Token,
    },
}

impl ColonyMessage {
    pub fn colony(&self) -> Token {
        match self {
            ColonyMessage::View { colony, .. }
            | ColonyMessage::Permissions { colony, .. }
            | ColonyMessage::Citizen { colony, .. }
            | ColonyMessage::RemoveCitizen { colony, .. }
            | ColonyMessage::Building { colony, .. }
            | ColonyMessage::RemoveBuilding { colony, .. }
            | ColonyMessage::WorkOrder { colony, .. }
            | ColonyMessage::RemoveWorkOrder { colony, .. }
            | ColonyMessage::Notice { colony, .. }
            | ColonyMessage::RemoveColony { colony } => *colony,
        }
    }
}

/// Message addressed to one observer.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub observer: String,
    pub message: ColonyMessage,
}

#[derive(Debug, Default)]
pub struct Subscribers {
    pub established: BTreeSet<String>,
    pub joining: BTreeSet<String>,
}

impl Subscribers {
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.established.iter().chain(self.joining.iter())
    }

    pub fn contains(&self, observer: &str) -> bool {
        self.established.contains(observer) || self.joining.contains(observer)
    }
}

pub fn encode_work_order(view: &WorkOrderView) -> Result<Vec<u8>, EncodeError> {
    let config = bincode::config::standard();
    bincode::serde::encode_to_vec(view, config)
}

pub fn decode_work_order(payload: &[u8]) -> Result<WorkOrderView, DecodeError> {
    let config = bincode::config::standard();
    let (view, _) = bincode::serde::decode_from_slice(payload, config)?;
    Ok(view)
}

impl Colony {
    /// Observer joins or rejoins, the next pass sends it full resync.
    pub fn subscribe(&mut self, observer: &str) -> Vec<Event> {
        self.subscribers.established.remove(observer);
        self.subscribers.joining.insert(observer.to_string());
        info!("Observer {} subscribed to colony {}", observer, self.id);
        occur![vec![ObserverSubscribed {
            player: observer.to_string(),
        }]]
    }

    pub fn unsubscribe(&mut self, observer: &str) -> Vec<Event> {
        let established = self.subscribers.established.remove(observer);
        let joining = self.subscribers.joining.remove(observer);
        if !established && !joining {
            return vec![];
        }
        info!("Observer {} unsubscribed from colony {}", observer, self.id);
        occur![vec![ObserverUnsubscribed {
            player: observer.to_string(),
        }]]
    }

    #[inline]
    pub fn is_subscribed(&self, observer: &str) -> bool {
        self.subscribers.contains(observer)
    }

    pub fn subscribers(&self) -> Vec<String> {
        self.subscribers.all().cloned().collect()
    }

    pub fn snapshot(&self) -> ColonySnapshot {
        ColonySnapshot {
            name: self.name.clone(),
            dimension: self.dimension,
            center: self.center,
            manual_hiring: self.manual_hiring,
            max_citizens: self.max_citizens,
            free_blocks: self.free_blocks.iter().cloned().collect(),
            free_positions: self.free_positions.iter().copied().collect(),
            happiness: self.happiness,
            achievements: self.achievements.clone(),
        }
    }

    fn view_message(&self, new_subscription: bool) -> ColonyMessage {
        ColonyMessage::View {
            colony: self.id,
            new_subscription,
            snapshot: self.snapshot(),
        }
    }

    fn permissions_message(&self) -> ColonyMessage {
        ColonyMessage::Permissions {
            colony: self.id,
            permissions: self.permissions.to_data(),
        }
    }

    fn citizen_message(&self, citizen: &Citizen) -> ColonyMessage {
        ColonyMessage::Citizen {
            colony: self.id,
            citizen: CitizenView {
                id: citizen.id,
                name: citizen.name.clone(),
                job: citizen.job,
                work_building: citizen.work_building,
                home_building: citizen.home_building,
                happiness: citizen.happiness,
            },
        }
    }

    fn building_message(&self, building: &Building) -> ColonyMessage {
        ColonyMessage::Building {
            colony: self.id,
            building: BuildingView {
                id: building.id,
                position: building.position,
                role: building.role.clone(),
                level: building.level,
                max_level: building.max_level(),
                rotation: building.rotation,
                mirrored: building.mirrored,
                style: building.style.clone(),
                work_order: building.work_order,
                repairing: building.repairing,
                containers: building.containers.clone(),
            },
        }
    }

    fn work_order_message(&self, order: &WorkOrder) -> Option<ColonyMessage> {
        let view = WorkOrderView {
            id: order.id,
            kind: order.kind,
            building: order.building,
            level: order.level(),
            name: order.name.clone(),
            structure_name: order.structure_name.clone(),
            claimed_by: order.claimed_by,
        };
        match encode_work_order(&view) {
            Ok(payload) => Some(ColonyMessage::WorkOrder {
                colony: self.id,
                id: order.id,
                payload,
            }),
            Err(error) => {
                error!("Unable to encode work order {:?}, {}", order.id, error);
                None
            }
        }
    }

    fn full_resync(&self) -> Vec<ColonyMessage> {
        let mut messages = vec![self.view_message(true), self.permissions_message()];
        for citizen in self.citizens.citizens.values() {
            messages.push(self.citizen_message(citizen));
        }
        for building in self.buildings.buildings.values() {
            messages.push(self.building_message(building));
        }
        for order in self.working.work_orders.values() {
            messages.extend(self.work_order_message(order));
        }
        messages
    }

    fn delta(&mut self) -> Vec<ColonyMessage> {
        let mut messages = std::mem::take(&mut self.removals);
        if self.fields_dirty {
            messages.push(self.view_message(false));
        }
        if self.permissions_dirty {
            messages.push(self.permissions_message());
        }
        for citizen in self.citizens.citizens.values().filter(|citizen| citizen.dirty) {
            messages.push(self.citizen_message(citizen));
        }
        for building in self.buildings.buildings.values().filter(|building| building.dirty) {
            messages.push(self.building_message(building));
        }
        for order in self.working.work_orders.values().filter(|order| order.dirty) {
            messages.extend(self.work_order_message(order));
        }
        messages
    }

    /// Serializes pending changes for observers and clears dirty state.
    ///
    /// Established observers get queued removals, a snapshot when scalars
    /// changed and every dirty entity. Joining observers get full resync and
    /// become established. Notices go to established observers allowed to
    /// receive messages.
    pub fn synchronize(&mut self) -> Vec<Delivery> {
        let mut deliveries = vec![];
        let delta = self.delta();
        let notices = std::mem::take(&mut self.notices);
        for observer in self.subscribers.established.iter() {
            for message in &delta {
                deliveries.push(Delivery {
                    observer: observer.clone(),
                    message: message.clone(),
                });
            }
            if !self.permissions.has_permission(observer, Action::ReceiveMessages) {
                continue;
            }
            for (work_order, notice) in &notices {
                deliveries.push(Delivery {
                    observer: observer.clone(),
                    message: notice_message(self.id, *work_order, notice),
                });
            }
        }
        if !self.subscribers.joining.is_empty() {
            let resync = self.full_resync();
            let joining = std::mem::take(&mut self.subscribers.joining);
            for observer in joining {
                for message in &resync {
                    deliveries.push(Delivery {
                        observer: observer.clone(),
                        message: message.clone(),
                    });
                }
                self.subscribers.established.insert(observer);
            }
        }
        self.clear_dirty();
        deliveries
    }

    /// Eviction message for every observer, used when colony is deleted.
    pub fn evict_subscribers(&mut self) -> Vec<Delivery> {
        let deliveries = self
            .subscribers
            .all()
            .map(|observer| Delivery {
                observer: observer.clone(),
                message: ColonyMessage::RemoveColony { colony: self.id },
            })
            .collect();
        self.subscribers = Default::default();
        deliveries
    }

    fn clear_dirty(&mut self) {
        self.fields_dirty = false;
        self.permissions_dirty = false;
        for citizen in self.citizens.citizens.values_mut() {
            citizen.dirty = false;
        }
        for building in self.buildings.buildings.values_mut() {
            building.dirty = false;
        }
        for order in self.working.work_orders.values_mut() {
            order.dirty = false;
        }
    }
}

fn notice_message(colony: Token, work_order: WorkOrderId, notice: &Notice) -> ColonyMessage {
    ColonyMessage::Notice {
        colony,
        work_order,
        text: notice.to_string(),
    }
}

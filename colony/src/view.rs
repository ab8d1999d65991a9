use log::{debug, error, info};
use std::collections::{BTreeMap, HashMap};

use crate::api::ObserverRequest;
use crate::citizens::CitizenId;
use crate::math::Position;
use crate::permissions::{Action, PermissionsData, Rank};
use crate::replication::{
    decode_work_order, BuildingView, CitizenView, ColonyMessage, ColonySnapshot, WorkOrderView,
};
use crate::tokens::Token;
use crate::working::WorkOrderId;
use crate::Colony;

/// Read-only projection shared by authority and replicas.
pub trait ColonyRead {
    fn colony_id(&self) -> Token;

    fn colony_name(&self) -> Option<&str>;

    fn colony_dimension(&self) -> Option<i32>;

    fn colony_center(&self) -> Option<Position>;

    fn is_manual_hiring(&self) -> Option<bool>;

    fn max_citizens(&self) -> Option<usize>;

    fn overall_happiness(&self) -> Option<f64>;

    fn achievements(&self) -> Vec<String>;

    fn citizen_ids(&self) -> Vec<CitizenId>;

    fn building_positions(&self) -> Vec<Position>;

    fn work_order_ids(&self) -> Vec<WorkOrderId>;
}

impl ColonyRead for Colony {
    fn colony_id(&self) -> Token {
        self.id
    }

    fn colony_name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn colony_dimension(&self) -> Option<i32> {
        Some(self.dimension)
    }

    fn colony_center(&self) -> Option<Position> {
        Some(self.center)
    }

    fn is_manual_hiring(&self) -> Option<bool> {
        Some(self.manual_hiring)
    }

    fn max_citizens(&self) -> Option<usize> {
        Some(self.max_citizens)
    }

    fn overall_happiness(&self) -> Option<f64> {
        Some(self.happiness)
    }

    fn achievements(&self) -> Vec<String> {
        self.achievements.clone()
    }

    fn citizen_ids(&self) -> Vec<CitizenId> {
        self.citizens.citizens.keys().copied().collect()
    }

    fn building_positions(&self) -> Vec<Position> {
        self.buildings.buildings.keys().copied().collect()
    }

    fn work_order_ids(&self) -> Vec<WorkOrderId> {
        self.working.work_orders.keys().copied().collect()
    }
}

/// Eventually consistent client replica of one colony.
///
/// Every field stays absent until first received and then equals the last
/// received value. The replica never changes authority state, mutations are
/// expressed as [`ObserverRequest`] intents the authority may reject.
#[derive(Debug, Clone, PartialEq)]
pub struct ColonyView {
    id: Token,
    snapshot: Option<ColonySnapshot>,
    permissions: Option<PermissionsData>,
    citizens: BTreeMap<CitizenId, CitizenView>,
    buildings: BTreeMap<Position, BuildingView>,
    work_orders: BTreeMap<WorkOrderId, WorkOrderView>,
    notices: Vec<String>,
}

impl ColonyView {
    pub fn new(id: Token) -> Self {
        Self {
            id,
            snapshot: None,
            permissions: None,
            citizens: BTreeMap::new(),
            buildings: BTreeMap::new(),
            work_orders: BTreeMap::new(),
            notices: vec![],
        }
    }

    pub fn apply(&mut self, message: ColonyMessage) {
        match message {
            ColonyMessage::View {
                new_subscription,
                snapshot,
                ..
            } => {
                if new_subscription {
                    self.citizens.clear();
                    self.buildings.clear();
                    self.work_orders.clear();
                }
                self.snapshot = Some(snapshot);
            }
            ColonyMessage::Permissions { permissions, .. } => {
                self.permissions = Some(permissions);
            }
            ColonyMessage::Citizen { citizen, .. } => {
                if !self.citizens.contains_key(&citizen.id) {
                    debug!("Citizen {:?} appears in view {} first time", citizen.id, self.id);
                }
                self.citizens.insert(citizen.id, citizen);
            }
            ColonyMessage::RemoveCitizen { id, .. } => {
                self.citizens.remove(&id);
            }
            ColonyMessage::Building { building, .. } => {
                if !self.buildings.contains_key(&building.position) {
                    debug!(
                        "Building {} appears in view {} first time",
                        building.position, self.id
                    );
                }
                self.buildings.insert(building.position, building);
            }
            ColonyMessage::RemoveBuilding { position, .. } => {
                self.buildings.remove(&position);
            }
            ColonyMessage::WorkOrder { id, payload, .. } => match decode_work_order(&payload) {
                Ok(order) => {
                    self.work_orders.insert(id, order);
                }
                Err(error) => {
                    error!("Unable to decode work order {:?} payload, {}", id, error);
                }
            },
            ColonyMessage::RemoveWorkOrder { id, .. } => {
                self.work_orders.remove(&id);
            }
            ColonyMessage::Notice { text, .. } => {
                self.notices.push(text);
            }
            ColonyMessage::RemoveColony { .. } => {
                debug!("Colony {} removal must be handled by replicas registry", self.id);
            }
        }
    }

    #[inline]
    pub fn snapshot(&self) -> Option<&ColonySnapshot> {
        self.snapshot.as_ref()
    }

    #[inline]
    pub fn permissions(&self) -> Option<&PermissionsData> {
        self.permissions.as_ref()
    }

    #[inline]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn get_building(&self, position: Position) -> Option<&BuildingView> {
        self.buildings.get(&position)
    }

    pub fn get_citizen(&self, id: CitizenId) -> Option<&CitizenView> {
        self.citizens.get(&id)
    }

    pub fn get_work_order(&self, id: WorkOrderId) -> Option<&WorkOrderView> {
        self.work_orders.get(&id)
    }

    pub fn free_blocks(&self) -> &[String] {
        match &self.snapshot {
            Some(snapshot) => &snapshot.free_blocks,
            None => &[],
        }
    }

    pub fn free_positions(&self) -> &[Position] {
        match &self.snapshot {
            Some(snapshot) => &snapshot.free_positions,
            None => &[],
        }
    }

    pub fn rank_of(&self, player: &str) -> Option<Rank> {
        self.permissions.as_ref().map(|permissions| {
            permissions
                .players
                .iter()
                .find(|(name, _)| name == player)
                .map(|(_, rank)| *rank)
                .unwrap_or(Rank::Neutral)
        })
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    pub fn mark_building_dirty(&self, position: Position) -> Option<ObserverRequest> {
        let dimension = self.snapshot.as_ref()?.dimension;
        Some(ObserverRequest::MarkBuildingDirty {
            colony: self.id,
            position,
            dimension,
        })
    }

    pub fn rename(&self, name: &str) -> ObserverRequest {
        ObserverRequest::Rename {
            colony: self.id,
            name: name.to_string(),
        }
    }

    pub fn set_permission(&self, rank: Rank, action: Action) -> ObserverRequest {
        ObserverRequest::SetPermission {
            colony: self.id,
            rank,
            action,
        }
    }

    pub fn remove_permission(&self, rank: Rank, action: Action) -> ObserverRequest {
        ObserverRequest::RemovePermission {
            colony: self.id,
            rank,
            action,
        }
    }

    pub fn toggle_permission(&self, rank: Rank, action: Action) -> ObserverRequest {
        ObserverRequest::TogglePermission {
            colony: self.id,
            rank,
            action,
        }
    }

    pub fn add_player(&self, player: &str, rank: Rank) -> ObserverRequest {
        ObserverRequest::AddPlayer {
            colony: self.id,
            player: player.to_string(),
            rank,
        }
    }

    pub fn remove_player(&self, player: &str) -> ObserverRequest {
        ObserverRequest::RemovePlayer {
            colony: self.id,
            player: player.to_string(),
        }
    }

    pub fn mark_request_as_accepted(&self, requester: Token, request: Token) -> ObserverRequest {
        ObserverRequest::MarkRequestAsAccepted {
            colony: self.id,
            requester,
            request,
        }
    }
}

impl ColonyRead for ColonyView {
    fn colony_id(&self) -> Token {
        self.id
    }

    fn colony_name(&self) -> Option<&str> {
        self.snapshot.as_ref().map(|snapshot| snapshot.name.as_str())
    }

    fn colony_dimension(&self) -> Option<i32> {
        self.snapshot.as_ref().map(|snapshot| snapshot.dimension)
    }

    fn colony_center(&self) -> Option<Position> {
        self.snapshot.as_ref().map(|snapshot| snapshot.center)
    }

    fn is_manual_hiring(&self) -> Option<bool> {
        self.snapshot.as_ref().map(|snapshot| snapshot.manual_hiring)
    }

    fn max_citizens(&self) -> Option<usize> {
        self.snapshot.as_ref().map(|snapshot| snapshot.max_citizens)
    }

    fn overall_happiness(&self) -> Option<f64> {
        self.snapshot.as_ref().map(|snapshot| snapshot.happiness)
    }

    fn achievements(&self) -> Vec<String> {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.achievements.clone())
            .unwrap_or_default()
    }

    fn citizen_ids(&self) -> Vec<CitizenId> {
        self.citizens.keys().copied().collect()
    }

    fn building_positions(&self) -> Vec<Position> {
        self.buildings.keys().copied().collect()
    }

    fn work_order_ids(&self) -> Vec<WorkOrderId> {
        self.work_orders.keys().copied().collect()
    }
}

/// Client side registry of colony replicas.
#[derive(Debug, Default)]
pub struct Replicas {
    views: HashMap<Token, ColonyView>,
}

impl Replicas {
    pub fn apply(&mut self, message: ColonyMessage) {
        let colony = message.colony();
        if let ColonyMessage::RemoveColony { .. } = message {
            if self.views.remove(&colony).is_some() {
                info!("Colony {} replica evicted", colony);
            }
            return;
        }
        self.views
            .entry(colony)
            .or_insert_with(|| ColonyView::new(colony))
            .apply(message);
    }

    pub fn get(&self, colony: Token) -> Option<&ColonyView> {
        self.views.get(&colony)
    }

    pub fn get_mut(&mut self, colony: Token) -> Option<&mut ColonyView> {
        self.views.get_mut(&colony)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

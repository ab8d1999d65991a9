#![allow(dead_code)]

use colony::api::{ColonyError, Event};
use colony::building::{Placement, Role};
use colony::citizens::CitizenId;
use colony::math::Position;
use colony::replication::{ColonyMessage, Delivery};
use colony::requesting::{KindResolver, PayloadKind, RequestManager};
use colony::structures::StructureCatalog;
use colony::tokens::{Token, TokenKind};
use colony::working::WorkOrderId;
use colony::Colony;
use std::collections::HashMap;

pub const CENTER: Position = Position::new(0, 64, 0);

pub fn at(x: i32, z: i32) -> Position {
    Position::new(x, 64, z)
}

pub fn register_warehouse(requesting: &mut RequestManager) {
    let kinds = [PayloadKind::Tool, PayloadKind::Stack, PayloadKind::Deliverable];
    requesting.register_resolver(Box::new(KindResolver::new("warehouse", 0, &kinds)));
}

pub fn test_catalog() -> StructureCatalog {
    let mut catalog = StructureCatalog::default();
    for schematic in ["townhall", "citizen", "builder"] {
        for level in 1..=5 {
            let name = StructureCatalog::structure_name("wooden", schematic, level);
            let content = format!("{} blocks", name);
            catalog.register(&name, content.as_bytes());
        }
    }
    catalog
}

pub struct ColonyTestScenario {
    pub colony: Colony,
    pub catalog: StructureCatalog,
    buildings: HashMap<String, Position>,
    citizens: HashMap<String, CitizenId>,
    work_orders: HashMap<String, WorkOrderId>,
    current_result: Result<Vec<Event>, ColonyError>,
    deliveries: Vec<Delivery>,
}

impl ColonyTestScenario {
    pub fn new() -> Self {
        let id = Token::from_raw(TokenKind::Colony, 1);
        let mut colony = Colony::new(id, "Harbor", "Alice", 0, CENTER);
        register_warehouse(&mut colony.requesting);
        Self {
            colony,
            catalog: test_catalog(),
            buildings: Default::default(),
            citizens: Default::default(),
            work_orders: Default::default(),
            current_result: Ok(vec![]),
            deliveries: vec![],
        }
    }

    pub fn building(&self, name: &str) -> Position {
        *self.buildings.get(name).unwrap()
    }

    pub fn building_token(&self, name: &str) -> Token {
        self.colony.get_building(self.building(name)).unwrap().id
    }

    pub fn citizen(&self, name: &str) -> CitizenId {
        *self.citizens.get(name).unwrap()
    }

    pub fn work_order(&self, name: &str) -> WorkOrderId {
        *self.work_orders.get(name).unwrap()
    }

    pub fn given_building(mut self, name: &str, role: Role, level: u8, position: Position) -> Self {
        let placement = Placement {
            position,
            role,
            level,
            rotation: 0,
            mirrored: false,
            style: "wooden".to_string(),
        };
        self.colony.add_building(placement).unwrap();
        self.buildings.insert(name.to_string(), position);
        self
    }

    pub fn given_town_hall(self, level: u8) -> Self {
        self.given_building("town hall", Role::TownHall, level, CENTER)
    }

    pub fn given_home(self, name: &str, level: u8, position: Position) -> Self {
        self.given_building(name, Role::Home { residents: vec![] }, level, position)
    }

    pub fn given_builder_hut(self, name: &str, level: u8, position: Position) -> Self {
        self.given_building(name, Role::Builder, level, position)
    }

    pub fn given_citizen(mut self, name: &str) -> Self {
        let (id, _) = self.colony.add_citizen(name).unwrap();
        self.citizens.insert(name.to_string(), id);
        self
    }

    pub fn given_builder(self, name: &str, hut: &str) -> Self {
        let scenario = self.given_citizen(name);
        let id = scenario.citizen(name);
        let hut = scenario.building(hut);
        let mut scenario = scenario;
        scenario.colony.assign_job(id, hut).unwrap();
        scenario
    }

    pub fn given_upgrade(mut self, order: &str, building: &str) -> Self {
        let position = self.building(building);
        let (id, _) = self.colony.request_upgrade(position, &self.catalog).unwrap();
        self.work_orders.insert(order.to_string(), id);
        self
    }

    pub fn given_repair(mut self, order: &str, building: &str) -> Self {
        let position = self.building(building);
        let (id, _) = self.colony.request_repair(position, &self.catalog).unwrap();
        self.work_orders.insert(order.to_string(), id);
        self
    }

    pub fn given_decoration(mut self, order: &str, position: Position, structure: &str) -> Self {
        let (id, _) = self
            .colony
            .request_decoration(position, structure, 2, true, &self.catalog)
            .unwrap();
        self.work_orders.insert(order.to_string(), id);
        self
    }

    /// Building disappears without the colony noticing, e.g. broken by world.
    pub fn given_building_vanished(mut self, building: &str) -> Self {
        let position = self.building(building);
        self.colony.buildings.buildings.remove(&position);
        self
    }

    /// Order claims citizen whose job knows nothing about it.
    pub fn given_broken_claim(mut self, order: &str, citizen: &str) -> Self {
        let id = self.work_order(order);
        let citizen = self.citizen(citizen);
        let order = self.colony.working.get_work_order_mut(id).unwrap();
        order.claimed_by = Some(citizen);
        self
    }

    /// Observer already received its full resync.
    pub fn given_observer(mut self, observer: &str) -> Self {
        self.colony.subscribe(observer);
        self.colony.synchronize();
        self
    }

    pub fn given_colony_updated(mut self) -> Self {
        self.colony.update();
        self
    }

    pub fn when_colony_updates(mut self) -> Self {
        self.current_result = Ok(self.colony.update());
        self
    }

    pub fn when_colony_synchronizes(mut self) -> Self {
        self.deliveries = self.colony.synchronize();
        self
    }

    pub fn when_upgrade_requested(mut self, order: &str, building: &str) -> Self {
        let position = self.building(building);
        self.current_result = match self.colony.request_upgrade(position, &self.catalog) {
            Ok((id, events)) => {
                self.work_orders.insert(order.to_string(), id);
                Ok(events)
            }
            Err(error) => Err(error),
        };
        self
    }

    pub fn when_work_order_completed(mut self, order: &str) -> Self {
        let id = self.work_order(order);
        self.current_result = self.colony.complete_work_order(id);
        self
    }

    pub fn when_building_destroyed(mut self, building: &str) -> Self {
        let position = self.building(building);
        self.current_result = self.colony.destroy_building(position);
        self
    }

    pub fn when_citizen_employed(mut self, citizen: &str, hut: &str) -> Self {
        let id = self.citizen(citizen);
        let hut = self.building(hut);
        self.current_result = self.colony.assign_job(id, hut);
        self
    }

    pub fn when_citizen_spawned(mut self, citizen: &str) -> Self {
        let id = self.citizen(citizen);
        self.current_result = self.colony.spawn_citizen_if_null(id);
        self
    }

    pub fn when_building_placed(mut self, name: &str, role: Role, position: Position) -> Self {
        let placement = Placement {
            position,
            role,
            level: 0,
            rotation: 0,
            mirrored: false,
            style: "wooden".to_string(),
        };
        self.current_result = match self.colony.add_building(placement) {
            Ok((_, events)) => {
                self.buildings.insert(name.to_string(), position);
                Ok(events)
            }
            Err(error) => Err(error),
        };
        self
    }

    pub fn then_events_should_be<F>(mut self, expected_events: F) -> Self
    where
        F: FnOnce(&Self) -> Vec<Event>,
    {
        let result = std::mem::replace(&mut self.current_result, Ok(vec![]));
        let actual_events = format!("{:?}", result.unwrap());
        let expected_events = format!("{:?}", expected_events(&self));
        assert_eq!(actual_events, expected_events);
        self
    }

    pub fn then_action_should_fail<F>(mut self, expected_error: F) -> Self
    where
        F: FnOnce(&Self) -> ColonyError,
    {
        let result = std::mem::replace(&mut self.current_result, Ok(vec![]));
        let actual_error = format!("{:?}", result.unwrap_err());
        let expected_error = format!("{:?}", expected_error(&self));
        assert_eq!(actual_error, expected_error);
        self
    }

    pub fn then_work_order_should_be_claimed_by(self, order: &str, citizen: &str) -> Self {
        let id = self.work_order(order);
        let citizen = self.citizen(citizen);
        let order = self.colony.working.get_work_order(id).unwrap();
        assert_eq!(order.claimed_by, Some(citizen));
        let job = self.colony.get_citizen(citizen).unwrap().job.unwrap();
        assert_eq!(job.work_order(), Some(id));
        self
    }

    pub fn then_work_order_should_be_unclaimed(self, order: &str) -> Self {
        let id = self.work_order(order);
        let order = self.colony.working.get_work_order(id).unwrap();
        assert_eq!(order.claimed_by, None);
        self
    }

    pub fn then_work_order_should_be_removed(self, order: &str) -> Self {
        let id = self.work_order(order);
        assert!(self.colony.working.get_work_order(id).is_err());
        self
    }

    pub fn then_citizen_should_be_idle(self, citizen: &str) -> Self {
        let citizen = self.colony.get_citizen(self.citizen(citizen)).unwrap();
        assert_eq!(citizen.job.and_then(|job| job.work_order()), None);
        self
    }

    pub fn then_notices_should_be(self, observer: &str, expected: Vec<&str>) -> Self {
        let notices: Vec<&str> = self
            .deliveries
            .iter()
            .filter(|delivery| delivery.observer == observer)
            .filter_map(|delivery| match &delivery.message {
                ColonyMessage::Notice { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(notices, expected);
        self
    }

    pub fn then_home_residents_should_be(self, home: &str, expected: Vec<&str>) -> Self {
        let position = self.building(home);
        let expected: Vec<CitizenId> = expected.iter().map(|name| self.citizen(name)).collect();
        let building = self.colony.get_building(position).unwrap();
        assert_eq!(building.residents(), expected.as_slice());
        for citizen in expected {
            let citizen = self.colony.get_citizen(citizen).unwrap();
            assert_eq!(citizen.home_building, Some(position));
        }
        self
    }

    pub fn then_building_level_should_be(self, building: &str, level: u8) -> Self {
        let building = self.colony.get_building(self.building(building)).unwrap();
        assert_eq!(building.level, level);
        self
    }
}

use colony::building::{Placement, Role};
use colony::citizens::CitizenId;
use colony::structures::StructureCatalog;
use colony::tokens::TokenKind;
use colony::working::{WorkOrderId, WorkOrderKind};
use colony::Colony;
use datamap::{Compound, DataError};

use crate::testing::{at, register_warehouse, ColonyTestScenario};

mod testing;

fn housed_colony() -> ColonyTestScenario {
    ColonyTestScenario::new()
        .given_town_hall(1)
        .given_builder_hut("hut", 1, at(10, 0))
        .given_home("cottage", 1, at(20, 0))
        .given_builder("Bob", "hut")
        .given_upgrade("upgrade", "town hall")
        .given_colony_updated()
}

#[test]
fn test_colony_round_trip() {
    let scenario = housed_colony();
    let compound = scenario.colony.save().unwrap();

    let loaded = Colony::load(&compound, &scenario.catalog, register_warehouse).unwrap();

    assert_eq!(loaded.id, scenario.colony.id);
    assert_eq!(loaded.name, "Harbor");
    assert_eq!(loaded.owner(), Some("Alice"));
    assert_eq!(loaded.max_citizens, 1);
    let cottage = loaded.get_building(at(20, 0)).unwrap();
    assert_eq!(cottage.residents(), &[CitizenId(1)]);
    let order = loaded.working.get_work_order(WorkOrderId(1)).unwrap();
    assert_eq!(order.claimed_by, Some(CitizenId(1)));
    assert!(order.requested);
    let bob = loaded.get_citizen(CitizenId(1)).unwrap();
    assert_eq!(bob.job.unwrap().work_order(), Some(WorkOrderId(1)));
    assert_eq!(bob.home_building, Some(at(20, 0)));
    assert_eq!(loaded.requesting.resolver_names(), vec!["warehouse"]);
}

#[test]
fn test_sequences_continue_after_load() {
    let scenario = housed_colony();
    let compound = scenario.colony.save().unwrap();
    let mut loaded = Colony::load(&compound, &scenario.catalog, register_warehouse).unwrap();

    let (citizen, _) = loaded.add_citizen("Ann").unwrap();
    let placement = Placement {
        position: at(30, 0),
        role: Role::Builder,
        level: 1,
        rotation: 0,
        mirrored: false,
        style: "wooden".to_string(),
    };
    let (building, _) = loaded.add_building(placement).unwrap();

    assert_eq!(citizen, CitizenId(2));
    assert_eq!(building.kind(), TokenKind::Building);
    assert!(building.value() > scenario.colony.tokens.watermark());
}

#[test]
fn test_residents_omitted_when_empty() {
    let scenario = housed_colony();

    let compound = scenario.colony.save().unwrap();
    let buildings = compound.get_list("buildings").unwrap();

    for building in buildings {
        let role = building.get_string("role").unwrap();
        assert_eq!(building.contains("residents"), role == "home");
    }
}

#[test]
fn test_work_order_relocated_by_schematic_hash() {
    let scenario = housed_colony();
    let compound = scenario.colony.save().unwrap();
    let content = "schematics/wooden/townhall2 blocks";
    let mut catalog = StructureCatalog::default();
    catalog.register("schematics/classic/townhall2", content.as_bytes());

    let loaded = Colony::load(&compound, &catalog, register_warehouse).unwrap();

    let order = loaded.working.get_work_order(WorkOrderId(1)).unwrap();
    assert_eq!(order.structure_name, "schematics/classic/townhall2");
}

#[test]
fn test_broken_work_order_kept() {
    let scenario = housed_colony();
    let compound = scenario.colony.save().unwrap();

    let loaded = Colony::load(&compound, &StructureCatalog::default(), register_warehouse).unwrap();

    let order = loaded.working.get_work_order(WorkOrderId(1)).unwrap();
    assert_eq!(order.structure_name, "schematics/wooden/townhall2");
}

#[test]
fn test_claimed_work_order_requests_materials_again_after_load() {
    let scenario = housed_colony();
    let hut = scenario.building_token("hut");
    let compound = scenario.colony.save().unwrap();

    let mut loaded = Colony::load(&compound, &scenario.catalog, register_warehouse).unwrap();
    for _ in 0..3 {
        loaded.update();
    }

    let order = loaded.working.get_work_order(WorkOrderId(1)).unwrap();
    assert!(order.requested);
    assert_eq!(order.claimed_by, Some(CitizenId(1)));
    assert_eq!(loaded.requesting.len(), 1);
    assert_eq!(loaded.requesting.get_open_requests(hut).len(), 1);
}

fn with_first_building_int(compound: &Compound, key: &str, value: i64) -> Compound {
    let mut compound = compound.clone();
    let mut buildings = compound.get_list("buildings").unwrap();
    buildings[0].put_int(key, value);
    compound.put_list("buildings", buildings);
    compound
}

#[test]
fn test_out_of_range_building_level_is_inconsistent() {
    let scenario = housed_colony();
    let compound = with_first_building_int(&scenario.colony.save().unwrap(), "level", 260);

    let result = Colony::load(&compound, &scenario.catalog, register_warehouse);

    assert!(matches!(result, Err(DataError::Inconsistent { .. })));
}

#[test]
fn test_out_of_range_building_rotation_is_inconsistent() {
    let scenario = housed_colony();
    let compound = with_first_building_int(&scenario.colony.save().unwrap(), "rotation", 4);

    let result = Colony::load(&compound, &scenario.catalog, register_warehouse);

    assert!(matches!(result, Err(DataError::Inconsistent { .. })));
}

#[test]
fn test_decoration_order_saved_without_upgrade() {
    let scenario = housed_colony().given_decoration("statue", at(40, 0), "schematics/wooden/builder1");
    let statue = scenario.work_order("statue");

    let compound = scenario.colony.save().unwrap();
    let loaded = Colony::load(&compound, &scenario.catalog, register_warehouse).unwrap();

    let saved = compound
        .get_list("workOrders")
        .unwrap()
        .into_iter()
        .find(|order| order.get_int("id").unwrap() == statue.0 as i64)
        .unwrap();
    assert_eq!(saved.get_string("type").unwrap(), "decoration");
    assert!(!saved.contains("upgradeLevel"));
    assert!(!saved.contains("upgrade"));
    let order = loaded.working.get_work_order(statue).unwrap();
    assert_eq!(order.kind, WorkOrderKind::Decoration);
    assert_eq!(order.upgrade, None);
    assert_eq!(order.level(), 0);
    assert_eq!(order.rotation, 2);
    assert!(order.mirrored);
}

use colony::api::ObserverRequest;
use colony::building::Role;
use colony::math::Position;
use colony::permissions::Rank;
use colony::replication::{BuildingView, ColonyMessage, Delivery};
use colony::tokens::{Token, TokenKind};
use colony::view::{ColonyRead, ColonyView, Replicas};
use colony::working::WorkOrderId;

use crate::testing::{at, ColonyTestScenario, CENTER};

mod testing;

fn messages_for(deliveries: &[Delivery], observer: &str) -> Vec<ColonyMessage> {
    deliveries
        .iter()
        .filter(|delivery| delivery.observer == observer)
        .map(|delivery| delivery.message.clone())
        .collect()
}

fn settled_colony() -> ColonyTestScenario {
    ColonyTestScenario::new()
        .given_town_hall(1)
        .given_builder_hut("hut", 1, at(10, 0))
        .given_builder("Bob", "hut")
        .given_upgrade("upgrade", "town hall")
}

fn stale_building(colony: Token) -> ColonyMessage {
    ColonyMessage::Building {
        colony,
        building: BuildingView {
            id: Token::from_raw(TokenKind::Building, 99),
            position: at(-50, -50),
            role: Role::Builder,
            level: 1,
            max_level: 5,
            rotation: 0,
            mirrored: false,
            style: "wooden".to_string(),
            work_order: None,
            repairing: false,
            containers: vec![],
        },
    }
}

#[test]
fn test_new_subscriber_receives_full_resync() {
    let mut scenario = settled_colony();
    scenario.colony.subscribe("Alice");

    let messages = messages_for(&scenario.colony.synchronize(), "Alice");

    assert_eq!(messages.len(), 6);
    assert!(matches!(
        messages[0],
        ColonyMessage::View {
            new_subscription: true,
            ..
        }
    ));
    assert!(matches!(messages[1], ColonyMessage::Permissions { .. }));
    assert!(matches!(messages[2], ColonyMessage::Citizen { .. }));
    assert!(matches!(messages[3], ColonyMessage::Building { .. }));
    assert!(matches!(messages[4], ColonyMessage::Building { .. }));
    assert!(matches!(messages[5], ColonyMessage::WorkOrder { .. }));
}

#[test]
fn test_established_observer_receives_only_changes() {
    let mut scenario = settled_colony().given_observer("Alice");

    scenario.colony.rename("Bay");
    let renamed = messages_for(&scenario.colony.synchronize(), "Alice");
    let quiet = messages_for(&scenario.colony.synchronize(), "Alice");

    assert_eq!(renamed.len(), 1);
    match &renamed[0] {
        ColonyMessage::View {
            new_subscription,
            snapshot,
            ..
        } => {
            assert!(!new_subscription);
            assert_eq!(snapshot.name, "Bay");
        }
        message => panic!("unexpected message {:?}", message),
    }
    assert!(quiet.is_empty());
}

#[test]
fn test_removals_are_explicit() {
    let mut scenario = settled_colony().given_observer("Alice");
    let hut = scenario.building("hut");

    scenario.colony.destroy_building(hut).unwrap();
    let messages = messages_for(&scenario.colony.synchronize(), "Alice");

    assert_eq!(
        messages[0],
        ColonyMessage::RemoveBuilding {
            colony: scenario.colony.id,
            position: hut,
        }
    );
    assert!(!messages
        .iter()
        .any(|message| matches!(message, ColonyMessage::Building { .. })));
}

#[test]
fn test_view_mirrors_authority() {
    let mut scenario = settled_colony().given_colony_updated();
    scenario.colony.subscribe("Alice");
    let mut view = ColonyView::new(scenario.colony.id);

    for message in messages_for(&scenario.colony.synchronize(), "Alice") {
        view.apply(message);
    }

    let colony = &scenario.colony;
    assert_eq!(view.colony_name(), colony.colony_name());
    assert_eq!(view.colony_center(), Some(CENTER));
    assert_eq!(view.citizen_ids(), colony.citizen_ids());
    assert_eq!(view.building_positions(), colony.building_positions());
    assert_eq!(view.work_order_ids(), colony.work_order_ids());
    let order = view.get_work_order(WorkOrderId(1)).unwrap();
    assert_eq!(order.claimed_by, Some(scenario.citizen("Bob")));
    assert_eq!(view.rank_of("Alice"), Some(Rank::Owner));
}

#[test]
fn test_view_apply_is_idempotent() {
    let mut scenario = settled_colony();
    scenario.colony.subscribe("Alice");
    let messages = messages_for(&scenario.colony.synchronize(), "Alice");
    let mut once = ColonyView::new(scenario.colony.id);
    let mut twice = ColonyView::new(scenario.colony.id);

    for message in messages.iter() {
        once.apply(message.clone());
    }
    for message in messages.iter().chain(messages.iter()) {
        twice.apply(message.clone());
    }

    assert_eq!(once, twice);
}

#[test]
fn test_new_subscription_resets_collections() {
    let mut scenario = settled_colony();
    let id = scenario.colony.id;
    let mut view = ColonyView::new(id);
    view.apply(stale_building(id));
    scenario.colony.subscribe("Alice");

    for message in messages_for(&scenario.colony.synchronize(), "Alice") {
        view.apply(message);
    }

    assert!(view.get_building(at(-50, -50)).is_none());
    assert_eq!(view.building_positions(), scenario.colony.building_positions());
}

#[test]
fn test_unknown_entity_is_created_on_update() {
    let id = Token::from_raw(TokenKind::Colony, 1);
    let mut view = ColonyView::new(id);

    view.apply(stale_building(id));

    assert!(view.get_building(at(-50, -50)).is_some());
    assert_eq!(view.colony_name(), None);
}

#[test]
fn test_undecodable_work_order_dropped() {
    let id = Token::from_raw(TokenKind::Colony, 1);
    let mut view = ColonyView::new(id);

    view.apply(ColonyMessage::WorkOrder {
        colony: id,
        id: WorkOrderId(1),
        payload: vec![],
    });

    assert!(view.work_order_ids().is_empty());
}

#[test]
fn test_building_dirty_intent_requires_snapshot() {
    let id = Token::from_raw(TokenKind::Colony, 1);
    let mut view = ColonyView::new(id);
    let position = Position::new(1, 2, 3);

    let before = view.mark_building_dirty(position);
    let mut scenario = ColonyTestScenario::new();
    scenario.colony.subscribe("Alice");
    for message in messages_for(&scenario.colony.synchronize(), "Alice") {
        view.apply(message);
    }
    let after = view.mark_building_dirty(position);

    assert!(before.is_none());
    assert!(after.is_some());
}

#[test]
fn test_replicas_evicted_by_colony_removal() {
    let mut scenario = settled_colony();
    scenario.colony.subscribe("Alice");
    let mut replicas = Replicas::default();
    for message in messages_for(&scenario.colony.synchronize(), "Alice") {
        replicas.apply(message);
    }
    assert_eq!(replicas.len(), 1);

    for delivery in scenario.colony.evict_subscribers() {
        replicas.apply(delivery.message);
    }

    assert!(replicas.is_empty());
    assert!(scenario.colony.subscribers().is_empty());
}

#[test]
fn test_dirty_marks_batched_into_next_synchronization() {
    let mut scenario = settled_colony().given_observer("Alice");

    scenario.colony.mark_fields_dirty();
    scenario.colony.mark_citizens_dirty();
    scenario.colony.mark_buildings_dirty();
    let marked = messages_for(&scenario.colony.synchronize(), "Alice");
    let quiet = messages_for(&scenario.colony.synchronize(), "Alice");

    let views = marked
        .iter()
        .filter(|message| {
            matches!(
                message,
                ColonyMessage::View {
                    new_subscription: false,
                    ..
                }
            )
        })
        .count();
    let citizens = marked
        .iter()
        .filter(|message| matches!(message, ColonyMessage::Citizen { .. }))
        .count();
    let buildings = marked
        .iter()
        .filter(|message| matches!(message, ColonyMessage::Building { .. }))
        .count();
    assert_eq!(marked.len(), 4);
    assert_eq!((views, citizens, buildings), (1, 1, 2));
    assert!(quiet.is_empty());
}

#[test]
fn test_view_intents_leave_replica_untouched() {
    let mut scenario = settled_colony();
    scenario.colony.subscribe("Alice");
    let mut view = ColonyView::new(scenario.colony.id);
    for message in messages_for(&scenario.colony.synchronize(), "Alice") {
        view.apply(message);
    }
    let before = view.clone();

    let rename = view.rename("Bay");
    let promote = view.add_player("Bruno", Rank::Officer);

    assert_eq!(view, before);
    assert_eq!(view.colony_name(), Some("Harbor"));
    assert_eq!(view.snapshot().map(|snapshot| snapshot.name.as_str()), Some("Harbor"));
    assert!(view.permissions().is_some());
    assert!(view.notices().is_empty());
    assert!(matches!(rename, ObserverRequest::Rename { .. }));
    assert!(matches!(promote, ObserverRequest::AddPlayer { .. }));
}

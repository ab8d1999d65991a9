use colony::citizens::CitizenId;
use colony::requesting::RequestingError::{InvalidArgument, UnresolvableRequestKind};
use colony::requesting::{KindResolver, Payload, PayloadKind, RequestManager, RequestState};
use colony::tokens::{Token, TokenKind};

fn building(value: usize) -> Token {
    Token::from_raw(TokenKind::Building, value)
}

fn request(value: usize) -> Token {
    Token::from_raw(TokenKind::Request, value)
}

fn hammer() -> Payload {
    Payload::Tool {
        class: "hammer".to_string(),
        min_level: 1,
    }
}

fn planks(count: u32) -> Payload {
    Payload::Stack {
        item: "planks".to_string(),
        count,
    }
}

fn warehouse() -> RequestManager {
    let mut requesting = RequestManager::default();
    let kinds = [PayloadKind::Tool, PayloadKind::Stack, PayloadKind::Deliverable];
    requesting.register_resolver(Box::new(KindResolver::new("warehouse", 0, &kinds)));
    requesting
}

fn create(requesting: &mut RequestManager, token: Token, citizen: Option<CitizenId>, payload: Payload) {
    let create = requesting
        .create_request(token, building(1), citizen, payload)
        .unwrap();
    create();
}

#[test]
fn test_request_without_resolver_is_unresolvable() {
    let mut requesting = RequestManager::default();

    let result = requesting
        .create_request(request(1), building(1), None, hammer())
        .map(|_| ());

    assert_eq!(
        result,
        Err(UnresolvableRequestKind {
            kind: PayloadKind::Tool
        })
    );
}

#[test]
fn test_request_lifecycle_until_received() {
    let mut requesting = warehouse();
    let citizen = CitizenId(1);
    create(&mut requesting, request(1), Some(citizen), hammer());

    let events = requesting.resolve_requests();
    assert_eq!(events.len(), 1);
    assert_eq!(requesting.get_request(request(1)).unwrap().state, RequestState::Assigned);

    requesting.start_request(request(1)).unwrap()();
    assert_eq!(requesting.get_open_requests_for(building(1), citizen), vec![request(1)]);

    requesting.complete_request(request(1)).unwrap()();
    assert!(requesting.get_open_requests_for(building(1), citizen).is_empty());
    assert_eq!(requesting.get_completed_requests_for(building(1), citizen), vec![request(1)]);
    assert_eq!(requesting.get_open_requests(building(1)), vec![request(1)]);

    let events = requesting
        .mark_request_as_accepted(building(1), request(1))
        .unwrap()();
    let events = format!("{:?}", events);
    assert_eq!(
        events,
        format!(
            "[RequestStateChanged {{ request: {:?}, state: Received }}]",
            request(1)
        )
    );
    assert!(requesting.get_open_requests(building(1)).is_empty());
    assert!(requesting.get_request(request(1)).is_err());
}

#[test]
fn test_request_transitions_are_monotonic() {
    let mut requesting = warehouse();
    create(&mut requesting, request(1), None, hammer());

    let skip = requesting.complete_request(request(1)).map(|_| ());
    requesting.resolve_requests();
    requesting.start_request(request(1)).unwrap()();
    let again = requesting.start_request(request(1)).map(|_| ());

    assert!(matches!(skip, Err(InvalidArgument { .. })));
    assert!(matches!(again, Err(InvalidArgument { .. })));
    assert_eq!(requesting.get_request(request(1)).unwrap().state, RequestState::InProgress);
}

#[test]
fn test_accept_requires_completed_request_of_requester() {
    let mut requesting = warehouse();
    create(&mut requesting, request(1), None, hammer());
    requesting.resolve_requests();

    let not_completed = requesting
        .mark_request_as_accepted(building(1), request(1))
        .map(|_| ());
    let foreign = requesting
        .mark_request_as_accepted(building(2), request(1))
        .map(|_| ());
    let unknown = requesting
        .mark_request_as_accepted(building(1), request(9))
        .map(|_| ());

    assert!(matches!(not_completed, Err(InvalidArgument { .. })));
    assert!(matches!(foreign, Err(InvalidArgument { .. })));
    assert!(matches!(unknown, Err(InvalidArgument { .. })));
}

#[test]
fn test_cancel_detaches_request_synchronously() {
    let mut requesting = warehouse();
    create(&mut requesting, request(1), None, hammer());
    create(&mut requesting, request(2), None, planks(16));

    requesting.cancel_request(request(1)).unwrap()();
    let twice = requesting.cancel_request(request(1)).map(|_| ());

    assert_eq!(requesting.get_open_requests(building(1)), vec![request(2)]);
    assert!(matches!(twice, Err(InvalidArgument { .. })));
}

#[test]
fn test_open_requests_of_type() {
    let mut requesting = warehouse();
    create(&mut requesting, request(1), None, hammer());
    create(&mut requesting, request(2), None, planks(16));
    create(&mut requesting, request(3), None, planks(8));

    let stacks = requesting.get_open_requests_of_type(building(1), PayloadKind::Stack);

    assert_eq!(stacks, vec![request(2), request(3)]);
}

#[test]
fn test_cancel_requests_of_destroyed_building() {
    let mut requesting = warehouse();
    create(&mut requesting, request(1), None, hammer());
    create(&mut requesting, request(2), None, planks(16));

    let events = requesting.cancel_requests_of(building(1));

    assert_eq!(events.len(), 2);
    assert!(requesting.is_empty());
}

#[test]
fn test_resolver_chain_ordered_by_priority() {
    let mut requesting = RequestManager::default();
    let stacks = [PayloadKind::Stack];
    requesting.register_resolver(Box::new(KindResolver::new("rack", 0, &stacks)));
    requesting.register_resolver(Box::new(KindResolver::new("courier", 5, &stacks)));
    requesting.register_resolver(Box::new(KindResolver::new("cart", 5, &stacks)));
    create(&mut requesting, request(1), None, planks(4));

    requesting.resolve_requests();

    assert_eq!(requesting.resolver_names(), vec!["courier", "cart", "rack"]);
    let resolver = requesting.get_request(request(1)).unwrap().resolver.clone();
    assert_eq!(resolver, Some("courier".to_string()));
}

use colony::api::{AuthorityResponse, ColonyError, LoginResult, ObserverRequest, API_VERSION};
use colony::tokens::{Token, TokenKind};
use network::{Configuration, NetworkError, TcpClient, TcpServer, TransferMetrics};
use prometheus::Registry;
use std::thread;
use std::time::{Duration, Instant};

const PATIENCE: Duration = Duration::from_secs(5);

fn start_server(registry: &Registry, compression: bool) -> (TcpServer, String) {
    let config = Configuration {
        version: API_VERSION.to_string(),
        password: Some("secret".to_string()),
        port: 0,
        compression,
    };
    let metrics = TransferMetrics::new(registry, "server").unwrap();
    let server = TcpServer::startup(config, metrics).unwrap();
    let address = format!("127.0.0.1:{}", server.address().port());
    (server, address)
}

fn eventually<T>(mut poll: impl FnMut() -> Option<T>) -> T {
    let start = Instant::now();
    while start.elapsed() < PATIENCE {
        if let Some(value) = poll() {
            return value;
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("condition not reached in {:?}", PATIENCE)
}

#[test]
fn test_observer_request_reaches_authority() {
    let registry = Registry::new();
    let (mut server, address) = start_server(&registry, true);
    let client = TcpClient::connect(
        &address,
        "Alice".to_string(),
        Some("secret".to_string()),
        true,
        None,
    )
    .unwrap();

    let accepted = eventually(|| {
        let observers = server.accept_observers();
        (!observers.is_empty()).then_some(observers)
    });
    let colony = Token::from_raw(TokenKind::Colony, 1);
    client.send(ObserverRequest::Subscribe { colony });
    let request = eventually(|| {
        server
            .requests()
            .into_iter()
            .find(|request| !matches!(request.request, ObserverRequest::Heartbeat))
    });

    assert_eq!(accepted, vec!["Alice".to_string()]);
    assert_eq!(request.observer, "Alice");
    assert_eq!(
        format!("{:?}", request.request),
        format!("{:?}", ObserverRequest::Subscribe { colony })
    );
}

#[test]
fn test_authority_response_reaches_observer() {
    let registry = Registry::new();
    let (mut server, address) = start_server(&registry, false);
    let client = TcpClient::connect(
        &address,
        "Alice".to_string(),
        Some("secret".to_string()),
        false,
        None,
    )
    .unwrap();
    eventually(|| (!server.accept_observers().is_empty()).then_some(()));

    let error = ColonyError::ColonyNotFound {
        colony: Token::from_raw(TokenKind::Colony, 9),
    };
    server.send("Alice", AuthorityResponse::Rejected { error: error.clone() });
    let response = client.wait_response(PATIENCE).unwrap();

    assert_eq!(
        format!("{:?}", response),
        format!("{:?}", AuthorityResponse::Rejected { error })
    );
    assert!(registry
        .gather()
        .iter()
        .any(|family| family.get_name() == "server_sent_bytes"));
}

#[test]
fn test_invalid_password_is_rejected() {
    let registry = Registry::new();
    let (_server, address) = start_server(&registry, false);

    let result = TcpClient::connect(
        &address,
        "Mallory".to_string(),
        Some("guess".to_string()),
        false,
        None,
    );

    assert!(matches!(
        result,
        Err(NetworkError::Rejected(LoginResult::InvalidPassword))
    ));
}

#[test]
fn test_disconnected_observer_is_lost() {
    let registry = Registry::new();
    let (mut server, address) = start_server(&registry, true);
    let mut client = TcpClient::connect(
        &address,
        "Alice".to_string(),
        Some("secret".to_string()),
        true,
        None,
    )
    .unwrap();
    eventually(|| (!server.accept_observers().is_empty()).then_some(()));

    client.disconnect();
    let lost = eventually(|| {
        let lost = server.lost_observers();
        (!lost.is_empty()).then_some(lost)
    });

    assert!(client.is_connection_lost());
    assert_eq!(lost, vec!["Alice".to_string()]);
}

#[test]
fn test_invalid_address() {
    let result = TcpClient::connect("colony.local", "Alice".to_string(), None, false, None);

    assert!(matches!(result, Err(NetworkError::InvalidAddress(_))));
}

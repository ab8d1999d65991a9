use crate::transfer::{SyncReceiver, SyncSender};
use crate::{NetworkError, TransferMetrics};
use colony::api::{AuthorityResponse, LoginResult, ObserverRequest};
use log::{error, info, warn};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);
const ACCEPT_INTERVAL: Duration = Duration::from_millis(10);

pub struct Observer {
    pub name: String,
    connected: Arc<AtomicBool>,
    requests: Receiver<ObserverRequest>,
    responses: Sender<AuthorityResponse>,
}

impl Observer {
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}

pub struct TrustedRequest {
    pub observer: String,
    pub request: ObserverRequest,
}

#[derive(Clone)]
pub struct Configuration {
    pub version: String,
    pub password: Option<String>,
    pub port: u16,
    pub compression: bool,
}

pub struct TcpServer {
    running: Arc<AtomicBool>,
    address: SocketAddr,
    authorization: Receiver<Observer>,
    observers: HashMap<String, Observer>,
}

impl TcpServer {
    pub fn startup(config: Configuration, metrics: TransferMetrics) -> Result<Self, NetworkError> {
        let running = Arc::new(AtomicBool::new(true));
        let listener = TcpListener::bind(("0.0.0.0", config.port))?;
        listener.set_nonblocking(true)?;
        let address = listener.local_addr()?;
        info!(
            "Listen observer connections on {} with {} version",
            address, config.version
        );
        let (listener_authorization, authorization) = channel();
        spawn_listener(
            listener,
            running.clone(),
            config,
            metrics,
            listener_authorization,
        );
        Ok(Self {
            running,
            address,
            authorization,
            observers: HashMap::new(),
        })
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn accept_observers(&mut self) -> Vec<String> {
        let mut observers = vec![];
        for observer in self.authorization.try_iter() {
            let name = observer.name.clone();
            if self.observers.insert(name.clone(), observer).is_some() {
                warn!("Observer '{}' reconnected, previous connection replaced", name);
            }
            observers.push(name);
        }
        observers
    }

    pub fn requests(&mut self) -> Vec<TrustedRequest> {
        let mut requests = vec![];
        for observer in self.observers.values() {
            let observer_requests = observer
                .requests
                .try_iter()
                .map(|request| TrustedRequest {
                    observer: observer.name.clone(),
                    request,
                });
            requests.extend(observer_requests);
        }
        requests
    }

    pub fn broadcast(&mut self, response: AuthorityResponse) {
        for observer in self.observers.values() {
            if observer.responses.send(response.clone()).is_err() {
                error!(
                    "Unable to broadcast response, observer '{}' connection lost",
                    observer.name
                );
            }
        }
    }

    pub fn send(&mut self, observer: &str, response: AuthorityResponse) {
        match self.observers.get(observer) {
            Some(observer) => {
                if observer.responses.send(response).is_err() {
                    error!(
                        "Unable to send response, observer '{}' connection lost",
                        observer.name
                    );
                }
            }
            None => {
                error!("Unable to send response, observer '{}' not found", observer);
            }
        }
    }

    /// Forgets observers whose connection threads stopped.
    pub fn lost_observers(&mut self) -> Vec<String> {
        let lost: Vec<String> = self
            .observers
            .values()
            .filter(|observer| !observer.is_connected())
            .map(|observer| observer.name.clone())
            .collect();
        for name in &lost {
            self.observers.remove(name);
            info!("Observer '{}' connection lost", name);
        }
        lost
    }

    pub fn terminate(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn spawn_listener(
    listener: TcpListener,
    running: Arc<AtomicBool>,
    config: Configuration,
    metrics: TransferMetrics,
    authorization: Sender<Observer>,
) {
    thread::spawn(move || {
        while running.load(Ordering::Relaxed) {
            let (stream, peer) = match listener.accept() {
                Ok(connection) => connection,
                Err(error) if error.kind() == ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_INTERVAL);
                    continue;
                }
                Err(error) => {
                    error!("Unable to establish connection, {:?}", error);
                    continue;
                }
            };
            info!("New connection from {}", peer);
            // authorization blocks new observer connections
            match authorize(stream, &config, &metrics) {
                Ok(Some(observer)) => {
                    if authorization.send(observer).is_err() {
                        error!("Unable to authorize {}, server not working", peer);
                        break;
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    error!("Unable to authorize {}, {}", peer, error);
                }
            }
        }
        info!("Server listener terminated")
    });
}

fn authorize(
    stream: TcpStream,
    config: &Configuration,
    metrics: &TransferMetrics,
) -> Result<Option<Observer>, NetworkError> {
    stream.set_nonblocking(false)?;
    stream.set_read_timeout(Some(CONNECTION_TIMEOUT))?;
    stream.set_write_timeout(Some(CONNECTION_TIMEOUT))?;
    let peer = stream.peer_addr()?;

    let mut receiver = SyncReceiver {
        reader: stream.try_clone()?,
        metrics: Some(metrics.clone()),
    };
    let mut sender = SyncSender {
        writer: stream,
        compression: config.compression,
        metrics: Some(metrics.clone()),
    };

    let request: Option<(usize, ObserverRequest)> = receiver.receive();
    let name = match request {
        Some((
            _,
            ObserverRequest::Login {
                version,
                player,
                password,
            },
        )) => {
            if version != config.version {
                warn!(
                    "Unable to authorize '{}' {}, version mismatch {} != {}",
                    player, peer, version, config.version
                );
                reject(&mut sender, LoginResult::VersionMismatch);
                return Ok(None);
            }
            if password != config.password {
                warn!("Unable to authorize '{}' {}, invalid password", player, peer);
                reject(&mut sender, LoginResult::InvalidPassword);
                return Ok(None);
            }
            player
        }
        request => {
            warn!("Unable to authorize {}, invalid {:?}", peer, request);
            return Ok(None);
        }
    };

    let success = AuthorityResponse::Login {
        result: LoginResult::Success,
    };
    if sender.send(&success).is_none() {
        error!("Unable to authorize '{}' {}, connection lost", name, peer);
        return Ok(None);
    }

    let connected = Arc::new(AtomicBool::new(true));
    let (requests_sender, requests) = channel();
    let (responses, responses_receiver) = channel::<AuthorityResponse>();

    let observer_id = name.clone();
    let observer_connected = connected.clone();
    thread::spawn(move || {
        info!("Start observer '{}' requests thread", observer_id);
        while let Some((_, request)) = receiver.receive() {
            if requests_sender.send(request).is_err() {
                error!("Unable to receive request, server not working");
                break;
            }
        }
        observer_connected.store(false, Ordering::Relaxed);
        info!("Stop observer '{}' requests thread", observer_id);
    });

    let observer_id = name.clone();
    let observer_connected = connected.clone();
    thread::spawn(move || {
        info!("Start observer '{}' responses thread", observer_id);
        for response in responses_receiver.iter() {
            if sender.send(&response).is_none() {
                error!("Unable to send response, connection lost");
                break;
            }
        }
        observer_connected.store(false, Ordering::Relaxed);
        info!("Stop observer '{}' responses thread", observer_id);
    });

    Ok(Some(Observer {
        name,
        connected,
        requests,
        responses,
    }))
}

fn reject(sender: &mut SyncSender, result: LoginResult) {
    if sender.send(&AuthorityResponse::Login { result }).is_none() {
        error!("Unable to send login rejection");
    }
}

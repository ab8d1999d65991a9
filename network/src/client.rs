use crate::transfer::{SyncReceiver, SyncSender};
use crate::{NetworkError, TransferMetrics};
use colony::api::{AuthorityResponse, LoginResult, ObserverRequest, API_VERSION};
use log::{error, info};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryIter};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const HEARTBEAT: Duration = Duration::from_secs(2);

pub struct TcpClient {
    pub player: String,
    stream: TcpStream,
    connected: Arc<AtomicBool>,
    requests: Sender<ObserverRequest>,
    responses: Receiver<AuthorityResponse>,
}

impl TcpClient {
    /// Connects and logs in, returns once the authority accepted the player.
    pub fn connect(
        address: &str,
        player: String,
        password: Option<String>,
        compression: bool,
        metrics: Option<TransferMetrics>,
    ) -> Result<Self, NetworkError> {
        let address: SocketAddr = address
            .parse()
            .map_err(|_| NetworkError::InvalidAddress(address.to_string()))?;
        info!("Connect to {}, API version is {}", address, API_VERSION);

        let stream = TcpStream::connect(address)?;
        let mut receiver = SyncReceiver {
            reader: stream.try_clone()?,
            metrics: metrics.clone(),
        };
        let mut sender = SyncSender {
            writer: stream.try_clone()?,
            compression,
            metrics,
        };
        let authorization = ObserverRequest::Login {
            version: API_VERSION.to_string(),
            player: player.clone(),
            password,
        };
        if sender.send(&authorization).is_none() {
            return Err(NetworkError::UnexpectedResponse);
        }
        match receiver.receive::<AuthorityResponse>() {
            Some((_, AuthorityResponse::Login { result })) if result == LoginResult::Success => {
                info!("Authorization of '{}' successful", player);
            }
            Some((_, AuthorityResponse::Login { result })) => {
                error!("Unable to login '{}', {:?}", player, result);
                return Err(NetworkError::Rejected(result));
            }
            _ => {
                error!("Unable to login '{}', invalid response", player);
                return Err(NetworkError::UnexpectedResponse);
            }
        }

        let connected = Arc::new(AtomicBool::new(true));
        let (requests, requests_receiver) = channel::<ObserverRequest>();
        let (responses_sender, responses) = channel::<AuthorityResponse>();

        let responses_connected = connected.clone();
        thread::spawn(move || {
            info!("Start client responses thread");
            while let Some((_, response)) = receiver.receive() {
                if responses_sender.send(response).is_err() {
                    error!("Unable to receive response, client not working");
                    break;
                }
            }
            responses_connected.store(false, Ordering::Relaxed);
            info!("Stop client responses thread");
        });

        let requests_connected = connected.clone();
        thread::spawn(move || {
            info!("Start client requests thread");
            loop {
                let request = match requests_receiver.recv_timeout(HEARTBEAT) {
                    Ok(request) => request,
                    Err(RecvTimeoutError::Timeout) => ObserverRequest::Heartbeat,
                    Err(RecvTimeoutError::Disconnected) => break,
                };
                if sender.send(&request).is_none() {
                    error!("Unable to send request, network error");
                    break;
                }
            }
            requests_connected.store(false, Ordering::Relaxed);
            info!("Stop client requests thread");
        });

        Ok(TcpClient {
            player,
            stream,
            connected,
            requests,
            responses,
        })
    }

    #[inline]
    pub fn is_connection_lost(&self) -> bool {
        !self.connected.load(Ordering::Relaxed)
    }

    pub fn send(&self, request: ObserverRequest) {
        if self.requests.send(request).is_err() {
            error!("Unable to send request, client not working");
        }
    }

    #[inline]
    pub fn responses(&mut self) -> TryIter<AuthorityResponse> {
        self.responses.try_iter()
    }

    /// Blocks until next response or timeout, handy for tools and tests.
    pub fn wait_response(&self, timeout: Duration) -> Option<AuthorityResponse> {
        self.responses.recv_timeout(timeout).ok()
    }

    pub fn disconnect(&mut self) {
        if let Err(error) = self.stream.shutdown(Shutdown::Both) {
            error!("Unable to disconnect '{}', {}", self.player, error);
        }
        self.connected.store(false, Ordering::Relaxed);
    }
}

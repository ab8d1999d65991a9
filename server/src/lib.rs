use colony::api::{AuthorityResponse, Event};
use colony::manager::ColonyManager;
use colony::requesting::{KindResolver, PayloadKind, RequestManager};
use colony::structures::StructureCatalog;
use datamap::Storage;
use log::{error, info};
use network::{Configuration, TcpServer, TransferMetrics};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;
use std::time::Instant;

pub use catalog::*;
pub use config::*;
pub use errors::*;
pub use metrics::*;

mod catalog;
mod config;
mod errors;
mod metrics;

pub fn register_default_resolvers(requesting: &mut RequestManager) {
    let kinds = [PayloadKind::Tool, PayloadKind::Stack, PayloadKind::Deliverable];
    requesting.register_resolver(Box::new(KindResolver::new("warehouse", 0, &kinds)));
}

/// Authoritative side of the observer protocol: drains intents, advances
/// colonies and ships replication messages, one step per tick.
pub struct Authority {
    pub manager: ColonyManager,
    pub server: TcpServer,
    storage: Storage,
    save_ticks: u64,
    ticks: u64,
}

impl Authority {
    pub fn new(manager: ColonyManager, server: TcpServer, storage: Storage, save_ticks: u64) -> Self {
        Self {
            manager,
            server,
            storage,
            save_ticks: save_ticks.max(1),
            ticks: 0,
        }
    }

    pub fn tick(&mut self) -> Vec<Event> {
        let timer = METRIC_TICK_SECONDS.start_timer();
        let mut events = vec![];

        for observer in self.server.accept_observers() {
            info!("Add observer '{}'", observer);
            METRIC_OBSERVERS.inc();
        }
        for observer in self.server.lost_observers() {
            info!("Remove observer '{}' from every colony", observer);
            METRIC_OBSERVERS.dec();
            events.extend(self.manager.unsubscribe_everywhere(&observer));
        }

        for request in self.server.requests() {
            match self.manager.handle_intent(&request.observer, request.request) {
                Ok(intent_events) => events.extend(intent_events),
                Err(error) => {
                    self.server
                        .send(&request.observer, AuthorityResponse::Rejected { error });
                }
            }
        }

        events.extend(self.manager.update());
        for delivery in self.manager.synchronize() {
            let response = AuthorityResponse::Message {
                message: delivery.message,
            };
            self.server.send(&delivery.observer, response);
        }

        self.ticks += 1;
        if self.ticks % self.save_ticks == 0 {
            self.save();
        }

        METRIC_CLAIMS.inc_by(count_claims(&events));
        timer.observe_duration();
        events
    }

    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn save(&mut self) {
        if let Err(error) = self.manager.save(&self.storage) {
            error!("Unable to save colonies, {:?}", error);
        }
    }
}

pub struct LocalServerThread {
    pub running: Arc<AtomicBool>,
    pub address: String,
    handle: Option<JoinHandle<()>>,
}

impl LocalServerThread {
    pub fn spawn(config: ServerConfig, registry: &prometheus::Registry) -> Result<Self, ServerError> {
        let catalog = match &config.schematics {
            Some(directory) => load_catalog(directory)?,
            None => StructureCatalog::default(),
        };
        let storage = Storage::open(&config.database)?;
        let mut manager = ColonyManager::new(catalog, register_default_resolvers);
        manager.load(&storage)?;

        let network = Configuration {
            version: colony::api::API_VERSION.to_string(),
            password: config.password.clone(),
            port: config.port,
            compression: config.compression,
        };
        let metrics = TransferMetrics::new(registry, "server")?;
        let server = TcpServer::startup(network, metrics)?;
        let address = server.address().to_string();

        let running = Arc::new(AtomicBool::new(true));
        let running_thread = running.clone();
        let tick = config.tick;
        let mut authority = Authority::new(manager, server, storage, config.save_ticks);
        let handle = thread::spawn(move || {
            info!("Start colony server thread");
            while running_thread.load(Ordering::Relaxed) {
                let time = Instant::now();
                authority.tick();
                let elapsed = time.elapsed();
                if elapsed < tick {
                    thread::sleep(tick - elapsed);
                }
            }
            authority.server.terminate();
            authority.save();
            info!("Stop colony server thread");
        });
        Ok(Self {
            running,
            address,
            handle: Some(handle),
        })
    }

    /// Stops tick loop, colonies are saved once more before thread exit.
    pub fn terminate(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Colony server thread panicked");
            }
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

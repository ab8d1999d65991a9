use log::{error, info};
use server::{LocalServerThread, ServerConfig};
use std::thread;
use std::time::Duration;

fn main() {
    env_logger::init();
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            error!("Unable to configure colony server, {}", error);
            std::process::exit(1);
        }
    };
    info!(
        "Start colony server on port {} with database {:?}",
        config.port, config.database
    );
    let server = match LocalServerThread::spawn(config, prometheus::default_registry()) {
        Ok(server) => server,
        Err(error) => {
            error!("Unable to start colony server, {}", error);
            std::process::exit(1);
        }
    };
    info!("Colony server listens on {}", server.address);
    while server.is_running() {
        thread::sleep(Duration::from_secs(1));
    }
}

use crate::ServerError;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub password: Option<String>,
    pub database: PathBuf,
    pub tick: Duration,
    /// Colonies are saved every this many ticks.
    pub save_ticks: u64,
    pub compression: bool,
    pub schematics: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            password: None,
            database: PathBuf::from("./assets/database.sqlite"),
            tick: Duration::from_millis(50),
            save_ticks: 6000,
            compression: true,
            schematics: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Reads `COLONY_*` variables through lookup, missing ones keep defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let default = Self::default();
        let tick_millis = parse(&lookup, "COLONY_TICK_MILLIS")?;
        Ok(Self {
            port: parse(&lookup, "COLONY_PORT")?.unwrap_or(default.port),
            password: lookup("COLONY_PASSWORD").filter(|password| !password.is_empty()),
            database: lookup("COLONY_DATABASE")
                .map(PathBuf::from)
                .unwrap_or(default.database),
            tick: tick_millis.map(Duration::from_millis).unwrap_or(default.tick),
            save_ticks: parse(&lookup, "COLONY_SAVE_TICKS")?
                .filter(|ticks| *ticks > 0)
                .unwrap_or(default.save_ticks),
            compression: parse(&lookup, "COLONY_COMPRESSION")?.unwrap_or(default.compression),
            schematics: lookup("COLONY_SCHEMATICS").map(PathBuf::from),
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<T>, ServerError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ServerError::InvalidVariable {
                name: name.to_string(),
                value,
            }),
        None => Ok(None),
    }
}

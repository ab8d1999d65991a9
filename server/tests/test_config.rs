use server::{ServerConfig, ServerError};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn test_missing_variables_keep_defaults() {
    let config = ServerConfig::from_vars(vars(&[])).unwrap();

    assert_eq!(config, ServerConfig::default());
}

#[test]
fn test_variables_override_defaults() {
    let config = ServerConfig::from_vars(vars(&[
        ("COLONY_PORT", "9090"),
        ("COLONY_PASSWORD", "secret"),
        ("COLONY_DATABASE", "/tmp/colonies.sqlite"),
        ("COLONY_TICK_MILLIS", "25"),
        ("COLONY_SAVE_TICKS", "100"),
        ("COLONY_COMPRESSION", "false"),
        ("COLONY_SCHEMATICS", "/srv/schematics"),
    ]))
    .unwrap();

    assert_eq!(
        config,
        ServerConfig {
            port: 9090,
            password: Some("secret".to_string()),
            database: PathBuf::from("/tmp/colonies.sqlite"),
            tick: Duration::from_millis(25),
            save_ticks: 100,
            compression: false,
            schematics: Some(PathBuf::from("/srv/schematics")),
        }
    );
}

#[test]
fn test_empty_password_means_no_password() {
    let config = ServerConfig::from_vars(vars(&[("COLONY_PASSWORD", "")])).unwrap();

    assert_eq!(config.password, None);
}

#[test]
fn test_invalid_port() {
    let result = ServerConfig::from_vars(vars(&[("COLONY_PORT", "harbor")]));

    assert!(matches!(
        result,
        Err(ServerError::InvalidVariable { name, value })
            if name == "COLONY_PORT" && value == "harbor"
    ));
}
